//! Display lists for every layer of a frame.
//!
//! Layers are composited back to front: static connectome, activity glow,
//! food, body.

use crate::activation::ActivationModel;
use crate::config::RenderConfig;
use crate::food::FoodField;
use crate::ik::IkChain;
use crate::layout::NeuronLayout;
use wormsim_data::{Connection, Overlay, Point, Rgba};

pub const FOOD_COLOR: Rgba = Rgba::rgb(251, 192, 45);
pub const BODY_COLOR: Rgba = Rgba::rgb(100, 200, 100);
pub const JOINT_COLOR: Rgba = Rgba::rgb(50, 150, 50);
pub const HEAD_COLOR: Rgba = Rgba::rgb(0, 255, 0);

/// Gray level of a connection line: `min(|weight| * 10, 255)`.
#[must_use]
pub fn connection_intensity(weight: f64) -> u8 {
    (weight.abs() * 10.0).min(255.0) as u8
}

/// Draws the neuron graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronRenderer {
    neuron_radius: f64,
    glow_radius: f64,
    connection_alpha: u8,
    connection_thickness: f64,
    glow_alpha: u8,
}

impl NeuronRenderer {
    #[must_use]
    pub fn new(style: &RenderConfig) -> Self {
        Self {
            neuron_radius: style.neuron_radius,
            glow_radius: style.neuron_radius + style.glow_margin,
            connection_alpha: style.connection_alpha,
            connection_thickness: style.connection_thickness,
            glow_alpha: style.glow_alpha,
        }
    }

    /// Every neuron as a disc in its category color, then one gray line per
    /// connection. Connections with an endpoint missing from the layout are
    /// skipped.
    #[must_use]
    pub fn static_overlay(&self, layout: &NeuronLayout, connections: &[Connection]) -> Overlay {
        let mut overlay = Overlay::with_capacity(layout.len() + connections.len());
        for neuron in layout.iter() {
            overlay.circle(neuron.position, self.neuron_radius, neuron.category.color());
        }

        for connection in connections {
            let (Some(start), Some(end)) = (
                layout.position(&connection.source),
                layout.position(&connection.target),
            ) else {
                continue;
            };
            let level = connection_intensity(connection.weight);
            overlay.line(
                start,
                end,
                Rgba::gray(level, self.connection_alpha),
                self.connection_thickness,
            );
        }
        overlay
    }

    /// A translucent glow over every neuron currently above threshold.
    #[must_use]
    pub fn activity_overlay<M>(&self, layout: &NeuronLayout, model: &M) -> Overlay
    where
        M: ActivationModel + ?Sized,
    {
        let threshold = model.fire_threshold();
        let mut overlay = Overlay::new();
        for neuron in layout.iter() {
            let Some(activity) = model.activation(&neuron.id) else {
                continue;
            };
            if activity > threshold {
                overlay.circle(
                    neuron.position,
                    self.glow_radius,
                    neuron.category.color().with_alpha(self.glow_alpha),
                );
            }
        }
        overlay
    }
}

/// Food pellets as filled discs.
#[must_use]
pub fn food_overlay(food: &FoodField, style: &RenderConfig) -> Overlay {
    let mut overlay = Overlay::with_capacity(food.len());
    for marker in food.markers() {
        overlay.circle(marker.position, style.food_radius, FOOD_COLOR);
    }
    overlay
}

/// The body: a thick line through the rounded joints, a disc per joint and a
/// larger disc for the head.
#[must_use]
pub fn body_overlay(chain: &IkChain, style: &RenderConfig) -> Overlay {
    let points: Vec<Point> = chain.positions().map(|p| p.rounded()).collect();
    let Some(&head) = points.first() else {
        return Overlay::new();
    };

    let mut overlay = Overlay::with_capacity(points.len() + 2);
    overlay.polyline(points.clone(), BODY_COLOR, style.body_thickness);
    for joint in points {
        overlay.circle(joint, style.segment_radius, JOINT_COLOR);
    }
    overlay.circle(head, style.head_radius, HEAD_COLOR);
    overlay
}
