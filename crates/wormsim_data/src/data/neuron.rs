use super::overlay::Rgba;
use serde::{Deserialize, Serialize};

/// Visual class of a neuron. Decided purely from its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeuronCategory {
    Sensory,
    Inter,
    Motor,
    Other,
}

impl NeuronCategory {
    pub const ALL: [NeuronCategory; 4] = [
        NeuronCategory::Sensory,
        NeuronCategory::Inter,
        NeuronCategory::Motor,
        NeuronCategory::Other,
    ];

    #[must_use]
    pub fn color(self) -> Rgba {
        match self {
            NeuronCategory::Sensory => Rgba::rgb(255, 0, 0),
            NeuronCategory::Inter => Rgba::rgb(0, 255, 0),
            NeuronCategory::Motor => Rgba::rgb(0, 0, 255),
            NeuronCategory::Other => Rgba::rgb(255, 255, 255),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            NeuronCategory::Sensory => "sensory",
            NeuronCategory::Inter => "inter",
            NeuronCategory::Motor => "motor",
            NeuronCategory::Other => "other",
        }
    }
}

/// A weighted synapse from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub source: String,
    pub target: String,
    pub weight: f64,
}
