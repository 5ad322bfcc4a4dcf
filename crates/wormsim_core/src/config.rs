//! Configuration management for simulation parameters.
//!
//! Strongly-typed sections that map to `config.toml`. Missing sections fall
//! back to their defaults, so a file only needs the values it overrides.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! target_fps = 60
//!
//! [world]
//! width = 640
//! height = 360
//!
//! [body]
//! segment_count = 10
//! segment_length = 10.0
//!
//! [locomotion]
//! scaling = 20.0
//! turn_step = 0.1
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canvas dimensions. The world wraps around at both edges.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    pub segment_count: usize,
    pub segment_length: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            segment_count: 10,
            segment_length: 10.0,
        }
    }
}

/// Tuning of the motor-accumulator to heading/speed mapping.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Divides the accumulator difference into a turn fraction of π.
    pub scaling: f64,
    /// `target_speed = (|l| + |r|) / (scaling * speed_divisor)`
    pub speed_divisor: f64,
    /// `speed_step = (target_speed - speed) / (scaling * easing_divisor)`
    pub easing_divisor: f64,
    /// Fixed heading correction per tick, radians.
    pub turn_step: f64,
    pub sensing_radius: f64,
    pub consumption_radius: f64,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            scaling: 20.0,
            speed_divisor: 5.0,
            easing_divisor: 1.5,
            turn_step: 0.1,
            sensing_radius: 50.0,
            consumption_radius: 20.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub neuron_radius: f64,
    /// Added to `neuron_radius` for the glow of a firing neuron.
    pub glow_margin: f64,
    pub connection_alpha: u8,
    pub connection_thickness: f64,
    pub glow_alpha: u8,
    pub food_radius: f64,
    pub segment_radius: f64,
    pub head_radius: f64,
    pub body_thickness: f64,
    pub show_neurons: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            neuron_radius: 5.0,
            glow_margin: 5.0,
            connection_alpha: 128,
            connection_thickness: 1.0,
            glow_alpha: 128,
            food_radius: 10.0,
            segment_radius: 10.0,
            head_radius: 15.0,
            body_thickness: 20.0,
            show_neurons: true,
        }
    }
}

/// Settings for the bundled connectome model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BrainConfig {
    /// Connectome table to load instead of the bundled one.
    pub connectome: Option<String>,
    /// Per-tick probability that a random sensory neuron fires on its own.
    pub spontaneous_rate: f64,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            connectome: None,
            spontaneous_rate: 0.02,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub target_fps: u64,
    pub world: WorldConfig,
    pub body: BodyConfig,
    pub locomotion: LocomotionConfig,
    pub render: RenderConfig,
    pub brain: BrainConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            world: WorldConfig::default(),
            body: BodyConfig::default(),
            locomotion: LocomotionConfig::default(),
            render: RenderConfig::default(),
            brain: BrainConfig::default(),
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Err` describing the first rule that fails.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(self.world.width > 0, "World width must be positive");
        anyhow::ensure!(
            self.world.width <= 10_000,
            "World width too large (max 10000)"
        );
        anyhow::ensure!(self.world.height > 0, "World height must be positive");
        anyhow::ensure!(
            self.world.height <= 10_000,
            "World height too large (max 10000)"
        );

        // Body validation
        anyhow::ensure!(
            self.body.segment_count > 0,
            "Body needs at least one segment"
        );
        anyhow::ensure!(
            self.body.segment_count <= 1000,
            "Too many body segments (max 1000)"
        );
        anyhow::ensure!(
            self.body.segment_length > 0.0,
            "Segment length must be positive"
        );

        // Locomotion validation
        let loco = &self.locomotion;
        anyhow::ensure!(loco.scaling > 0.0, "Scaling must be positive");
        anyhow::ensure!(loco.speed_divisor > 0.0, "Speed divisor must be positive");
        anyhow::ensure!(
            loco.easing_divisor >= 1.0 / loco.scaling,
            "Easing divisor too small, speed would overshoot"
        );
        anyhow::ensure!(loco.turn_step > 0.0, "Turn step must be positive");
        anyhow::ensure!(
            loco.turn_step < std::f64::consts::PI,
            "Turn step must be below π"
        );
        anyhow::ensure!(
            loco.consumption_radius >= 0.0,
            "Consumption radius must be non-negative"
        );
        anyhow::ensure!(
            loco.consumption_radius <= loco.sensing_radius,
            "Consumption radius must not exceed sensing radius"
        );

        // Render validation
        anyhow::ensure!(
            self.render.neuron_radius > 0.0,
            "Neuron radius must be positive"
        );
        anyhow::ensure!(
            self.render.glow_margin >= 0.0,
            "Glow margin must be non-negative"
        );

        // Brain validation
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.brain.spontaneous_rate),
            "Spontaneous rate must be in [0.0, 1.0]"
        );

        // Target FPS validation
        anyhow::ensure!(self.target_fps > 0, "Target FPS must be positive");
        anyhow::ensure!(self.target_fps <= 240, "Target FPS too high (max 240)");

        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when it is missing or invalid.
    ///
    /// A missing file is created with the default values so it can be edited.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Rejected config, using defaults");
                }
            },
            Err(_) => {
                let default = Self::default();
                if let Ok(toml_str) = toml::to_string(&default) {
                    let _ = std::fs::write(path, toml_str);
                }
                return default;
            }
        }
        Self::default()
    }

    #[must_use]
    pub fn canvas_size(&self) -> (f64, f64) {
        (f64::from(self.world.width), f64::from(self.world.height))
    }
}
