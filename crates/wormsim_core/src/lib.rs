//! # Wormsim Core
//!
//! Simulation engine for a nematode-like worm steered by a neural model.
//!
//! This crate contains:
//! - The follow-the-leader IK chain that turns a moving head into a body
//! - Locomotion: motor accumulators to heading and speed on a toroidal canvas
//! - Food sensing and consumption
//! - Neuron layout, classification and overlay display lists
//! - The `ActivationModel` seam and a bundled connectome implementing it
//! - Configuration, errors, metrics and logging setup
//!
//! ## Example
//!
//! ```
//! use wormsim_core::config::AppConfig;
//! use wormsim_core::simulation::Simulation;
//! use wormsim_data::Point;
//!
//! let config = AppConfig::default();
//! let mut sim = Simulation::with_connectome(&config).unwrap();
//! sim.add_food(Point::new(100.0, 100.0));
//!
//! let report = sim.tick();
//! assert_eq!(report.tick, 1);
//! ```

pub mod activation;
pub mod config;
pub mod connectome;
pub mod error;
pub mod food;
pub mod ik;
pub mod layout;
pub mod locomotion;
pub mod metrics;
pub mod overlay;
pub mod simulation;
