//! Batch runs without a terminal.

use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::time::Instant;

use wormsim_core::activation::ActivationModel;
use wormsim_core::config::AppConfig;
use wormsim_core::simulation::Simulation;
use wormsim_data::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessOptions {
    pub ticks: u64,
    pub food: usize,
    pub seed: u64,
}

/// What a headless run reports on stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub seed: u64,
    pub food_placed: usize,
    pub food_eaten: u64,
    pub food_remaining: usize,
    pub food_sensed_ticks: u64,
    /// Sum of per-tick speeds, in canvas units.
    pub distance: f64,
    pub final_position: Point,
    pub final_heading: f64,
    pub final_speed: f64,
    pub firing_neurons: usize,
    pub elapsed_ms: u64,
}

/// Scatters `options.food` markers with a seeded RNG and runs the worm for
/// `options.ticks` ticks.
pub fn run<M: ActivationModel>(
    mut sim: Simulation<M>,
    config: &AppConfig,
    options: HeadlessOptions,
) -> Result<RunSummary> {
    let started = Instant::now();
    let (width, height) = config.canvas_size();
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    for _ in 0..options.food {
        let position = Point::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        sim.add_food(position);
    }
    tracing::info!(
        ticks = options.ticks,
        food = options.food,
        seed = options.seed,
        "Headless run started"
    );

    let mut distance = 0.0;
    for _ in 0..options.ticks {
        sim.tick();
        distance += sim.locomotion().state().speed.abs();
    }

    let state = *sim.locomotion().state();
    let model = sim.model();
    let firing_neurons = model
        .activations()
        .keys()
        .filter(|id| model.is_firing(id))
        .count();

    let summary = RunSummary {
        ticks: sim.tick_count(),
        seed: options.seed,
        food_placed: options.food,
        food_eaten: sim.metrics().food_eaten(),
        food_remaining: sim.food().len(),
        food_sensed_ticks: sim.metrics().food_sensed_ticks(),
        distance,
        final_position: state.target,
        final_heading: state.facing_direction,
        final_speed: state.speed,
        firing_neurons,
        elapsed_ms: started.elapsed().as_millis() as u64,
    };
    tracing::info!(
        eaten = summary.food_eaten,
        remaining = summary.food_remaining,
        elapsed_ms = summary.elapsed_ms,
        "Headless run finished"
    );
    Ok(summary)
}
