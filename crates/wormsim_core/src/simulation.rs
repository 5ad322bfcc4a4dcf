//! The per-tick pipeline tying the neural model to the body.

use crate::activation::ActivationModel;
use crate::config::{AppConfig, RenderConfig};
use crate::connectome::Connectome;
use crate::error::Result;
use crate::food::{FoodContact, FoodField};
use crate::ik::IkChain;
use crate::layout::NeuronLayout;
use crate::locomotion::LocomotionController;
use crate::metrics::Metrics;
use crate::overlay::{body_overlay, food_overlay, NeuronRenderer};
use std::path::Path;
use std::time::Instant;
use wormsim_data::{Overlay, Point};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub left: f64,
    pub right: f64,
    pub contact: FoodContact,
    pub target: Point,
}

/// Display lists for one frame, back to front.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    /// `None` while the neuron overlays are hidden.
    pub connectome: Option<&'a Overlay>,
    pub activity: Overlay,
    pub food: Overlay,
    pub body: Overlay,
}

impl Frame<'_> {
    pub fn layers(&self) -> impl Iterator<Item = &Overlay> {
        self.connectome
            .into_iter()
            .chain([&self.activity, &self.food, &self.body])
    }
}

pub struct Simulation<M: ActivationModel> {
    model: M,
    chain: IkChain,
    locomotion: LocomotionController,
    food: FoodField,
    layout: NeuronLayout,
    renderer: NeuronRenderer,
    connectome_overlay: Overlay,
    render: RenderConfig,
    metrics: Metrics,
    tick: u64,
}

impl Simulation<Connectome> {
    /// Builds a simulation driven by the connectome named in `config`, or the
    /// bundled one.
    pub fn with_connectome(config: &AppConfig) -> Result<Self> {
        let connectome = match &config.brain.connectome {
            Some(path) => Connectome::load(Path::new(path))?,
            None => Connectome::bundled()?,
        };
        let seed = config.world.seed.unwrap_or_else(rand::random);
        let model = connectome.with_spontaneous_activity(config.brain.spontaneous_rate, seed);
        Ok(Self::new(model, config))
    }
}

impl<M: ActivationModel> Simulation<M> {
    /// Lays out every neuron `model` exposes and places the worm, at rest,
    /// in the middle of the canvas. All segments start at the origin.
    pub fn new(model: M, config: &AppConfig) -> Self {
        let (width, height) = config.canvas_size();
        let layout = NeuronLayout::build(model.activations().keys(), width, height);
        let renderer = NeuronRenderer::new(&config.render);
        let connectome_overlay = renderer.static_overlay(&layout, &model.connections());

        tracing::info!(
            neurons = layout.len(),
            segments = config.body.segment_count,
            width,
            height,
            "Simulation initialized"
        );

        Self {
            model,
            chain: IkChain::new(config.body.segment_count, config.body.segment_length),
            locomotion: LocomotionController::new(config.locomotion.clone(), width, height),
            food: FoodField::new(),
            layout,
            renderer,
            connectome_overlay,
            render: config.render.clone(),
            metrics: Metrics::new(),
            tick: 0,
        }
    }

    /// Model, locomotion, food, then body.
    pub fn tick(&mut self) -> TickReport {
        let started = Instant::now();

        self.model.advance();
        let (left, right) = self.model.motor_accumulators();

        let contact = self.locomotion.integrate(left, right, &mut self.food);
        if contact.sensed {
            self.model.set_food_sensed(true);
        }
        if contact.consumed > 0 {
            self.metrics.record_consumed(contact.consumed);
            tracing::info!(
                tick = self.tick + 1,
                eaten = contact.consumed,
                remaining = self.food.len(),
                "Food consumed"
            );
        }

        let target = self.locomotion.target();
        self.chain.update(target);
        self.tick += 1;
        self.metrics
            .record_tick(started.elapsed(), self.food.len(), contact.sensed);

        tracing::trace!(tick = self.tick, left, right, x = target.x, y = target.y);

        TickReport {
            tick: self.tick,
            left,
            right,
            contact,
            target,
        }
    }

    pub fn add_food(&mut self, position: Point) {
        let (width, height) = self.locomotion.bounds();
        if !position.is_finite()
            || !(0.0..width).contains(&position.x)
            || !(0.0..height).contains(&position.y)
        {
            tracing::debug!(x = position.x, y = position.y, "Ignoring food outside canvas");
            return;
        }
        self.food.add(position);
        tracing::debug!(x = position.x, y = position.y, total = self.food.len(), "Food added");
    }

    pub fn clear_food(&mut self) {
        self.food.clear();
    }

    pub fn toggle_neurons(&mut self) {
        self.render.show_neurons = !self.render.show_neurons;
    }

    #[must_use]
    pub fn neurons_visible(&self) -> bool {
        self.render.show_neurons
    }

    /// Picks up locomotion and render changes from a reloaded config.
    ///
    /// Canvas and body geometry are fixed for the lifetime of a run.
    pub fn apply_config(&mut self, config: &AppConfig) {
        self.locomotion.set_params(config.locomotion.clone());

        let renderer = NeuronRenderer::new(&config.render);
        if renderer != self.renderer {
            self.connectome_overlay =
                renderer.static_overlay(&self.layout, &self.model.connections());
            self.renderer = renderer;
        }
        self.render = config.render.clone();
    }

    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        let (connectome, activity) = if self.render.show_neurons {
            (
                Some(&self.connectome_overlay),
                self.renderer.activity_overlay(&self.layout, &self.model),
            )
        } else {
            (None, Overlay::new())
        };

        Frame {
            connectome,
            activity,
            food: food_overlay(&self.food, &self.render),
            body: body_overlay(&self.chain, &self.render),
        }
    }

    /// The cached connectivity overlay, built once per render style.
    #[must_use]
    pub fn connectome_overlay(&self) -> &Overlay {
        &self.connectome_overlay
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    #[must_use]
    pub fn chain(&self) -> &IkChain {
        &self.chain
    }

    #[must_use]
    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    #[must_use]
    pub fn food(&self) -> &FoodField {
        &self.food
    }

    #[must_use]
    pub fn layout(&self) -> &NeuronLayout {
        &self.layout
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[must_use]
    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            world: crate::config::WorldConfig {
                seed: Some(42),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_at_center_with_body_at_origin() {
        let sim = Simulation::with_connectome(&config()).unwrap();
        assert_eq!(sim.locomotion().target(), Point::new(320.0, 180.0));
        assert!(sim.chain().positions().all(|p| p == Point::ORIGIN));
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn test_tick_moves_head_onto_target() {
        let mut sim = Simulation::with_connectome(&config()).unwrap();
        for _ in 0..5 {
            let report = sim.tick();
            assert_eq!(sim.chain().head().map(|s| s.position), Some(report.target));
        }
        assert_eq!(sim.metrics().tick_count(), 5);
    }

    #[test]
    fn test_food_outside_canvas_ignored() {
        let mut sim = Simulation::with_connectome(&config()).unwrap();
        sim.add_food(Point::new(-1.0, 10.0));
        sim.add_food(Point::new(10.0, 360.0));
        sim.add_food(Point::new(f64::NAN, 10.0));
        assert!(sim.food().is_empty());
        sim.add_food(Point::new(10.0, 10.0));
        assert_eq!(sim.food().len(), 1);
    }

    #[test]
    fn test_hidden_neurons_leave_body_and_food() {
        let mut sim = Simulation::with_connectome(&config()).unwrap();
        sim.add_food(Point::new(10.0, 10.0));
        sim.tick();
        assert_eq!(sim.frame().layers().count(), 4);

        sim.toggle_neurons();
        let frame = sim.frame();
        assert!(frame.connectome.is_none());
        assert!(frame.activity.is_empty());
        assert_eq!(frame.food.len(), 1);
        assert!(!frame.body.is_empty());
    }

    #[test]
    fn test_apply_config_rebuilds_static_overlay() {
        let mut sim = Simulation::with_connectome(&config()).unwrap();
        let before = sim.connectome_overlay().clone();

        let mut changed = config();
        changed.render.connection_alpha = 40;
        changed.locomotion.turn_step = 0.2;
        sim.apply_config(&changed);

        assert_ne!(sim.connectome_overlay(), &before);
        assert_eq!(sim.locomotion().params().turn_step, 0.2);
    }
}
