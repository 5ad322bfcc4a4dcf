//! Connectome-driven activation model.
//!
//! Each neuron keeps two activation slots, the live one and the one being
//! accumulated for the next tick. A tick stimulates either the food-sense or
//! the hunger neurons, lets every neuron above threshold fire into its
//! targets, sums the body-wall muscles into the two motor accumulators and then
//! promotes the accumulated slot to live.

use crate::activation::{ActivationModel, ActivationTable, WeightTable, STATE_COUNT};
use crate::error::{CoreError, Result};
use crate::layout::classify;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::path::Path;
use wormsim_data::NeuronCategory;

const BUNDLED: &str = include_str!("../data/connectome.toml");

#[derive(Debug, Deserialize)]
struct ConnectomeTable {
    fire_threshold: f64,
    #[serde(default)]
    food_sense: Vec<String>,
    #[serde(default)]
    hunger: Vec<String>,
    #[serde(default)]
    left_muscles: Vec<String>,
    #[serde(default)]
    right_muscles: Vec<String>,
    synapses: WeightTable,
}

pub struct Connectome {
    post_synaptic: ActivationTable,
    weights: WeightTable,
    fire_threshold: f64,
    food_sense: Vec<String>,
    hunger: Vec<String>,
    sensory: Vec<String>,
    left_muscles: Vec<String>,
    right_muscles: Vec<String>,
    this_state: usize,
    next_state: usize,
    accum_left: f64,
    accum_right: f64,
    food_sensed: bool,
    spontaneous_rate: f64,
    rng: ChaCha8Rng,
}

impl Connectome {
    /// The connectome shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_toml(BUNDLED)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let table: ConnectomeTable = toml::from_str(content)?;
        Self::from_table(table)
    }

    fn from_table(table: ConnectomeTable) -> Result<Self> {
        if !table.fire_threshold.is_finite() {
            return Err(CoreError::connectome("fire threshold must be finite"));
        }
        for (source, targets) in &table.synapses {
            if let Some((target, _)) = targets.iter().find(|(_, w)| !w.is_finite()) {
                return Err(CoreError::connectome(format!(
                    "weight {source} -> {target} is not finite"
                )));
            }
        }
        for id in table.food_sense.iter().chain(&table.hunger) {
            if !table.synapses.contains_key(id) {
                return Err(CoreError::connectome(format!(
                    "stimulus neuron {id} has no outgoing synapses"
                )));
            }
        }

        let mut post_synaptic = ActivationTable::new();
        for (source, targets) in &table.synapses {
            post_synaptic.insert(source.clone(), [0.0; STATE_COUNT]);
            for target in targets.keys() {
                post_synaptic.insert(target.clone(), [0.0; STATE_COUNT]);
            }
        }

        let sensory = table
            .synapses
            .keys()
            .filter(|id| classify(id) == NeuronCategory::Sensory)
            .cloned()
            .collect();

        tracing::debug!(
            neurons = post_synaptic.len(),
            sources = table.synapses.len(),
            "Connectome loaded"
        );

        Ok(Self {
            post_synaptic,
            weights: table.synapses,
            fire_threshold: table.fire_threshold,
            food_sense: table.food_sense,
            hunger: table.hunger,
            sensory,
            left_muscles: table.left_muscles,
            right_muscles: table.right_muscles,
            this_state: 0,
            next_state: 1,
            accum_left: 0.0,
            accum_right: 0.0,
            food_sensed: false,
            spontaneous_rate: 0.0,
            rng: ChaCha8Rng::seed_from_u64(0),
        })
    }

    /// Lets a random sensory neuron fire on its own with probability `rate`
    /// per tick.
    #[must_use]
    pub fn with_spontaneous_activity(mut self, rate: f64, seed: u64) -> Self {
        self.spontaneous_rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn is_muscle(&self, id: &str) -> bool {
        self.left_muscles
            .iter()
            .chain(&self.right_muscles)
            .any(|prefix| id.starts_with(prefix.as_str()))
    }

    #[must_use]
    pub fn food_sensed(&self) -> bool {
        self.food_sensed
    }

    /// Number of neurons whose live activation is above threshold.
    #[must_use]
    pub fn firing_count(&self) -> usize {
        let state = self.this_state;
        self.post_synaptic
            .values()
            .filter(|v| v[state] > self.fire_threshold)
            .count()
    }

    /// Adds every outgoing weight of `id` to its targets' next slot.
    pub fn fire(&mut self, id: &str) {
        let Some(targets) = self.weights.get(id) else {
            return;
        };
        let next = self.next_state;
        for (target, weight) in targets {
            if let Some(values) = self.post_synaptic.get_mut(target) {
                values[next] += weight;
            }
        }
    }

    fn stimulate(&mut self, group: &[String]) {
        for id in group {
            self.fire(id);
        }
    }

    fn run_connectome(&mut self) {
        let this = self.this_state;
        let next = self.next_state;
        let firing: Vec<String> = self
            .post_synaptic
            .iter()
            .filter(|(id, values)| values[this] > self.fire_threshold && !self.is_muscle(id))
            .map(|(id, _)| id.clone())
            .collect();

        for id in &firing {
            self.fire(id);
            if let Some(values) = self.post_synaptic.get_mut(id) {
                values[next] = 0.0;
            }
        }
    }

    fn motor_control(&mut self) {
        let next = self.next_state;
        let mut left = 0.0;
        let mut right = 0.0;
        let left_prefixes = &self.left_muscles;
        let right_prefixes = &self.right_muscles;
        for (id, values) in self.post_synaptic.iter_mut() {
            let is_left = left_prefixes.iter().any(|p| id.starts_with(p.as_str()));
            let is_right = right_prefixes.iter().any(|p| id.starts_with(p.as_str()));
            if is_left {
                left += values[next];
            }
            if is_right {
                right += values[next];
            }
            if is_left || is_right {
                values[next] = 0.0;
            }
        }
        self.accum_left = left;
        self.accum_right = right;
    }
}

impl ActivationModel for Connectome {
    fn activations(&self) -> &ActivationTable {
        &self.post_synaptic
    }

    fn current_state(&self) -> usize {
        self.this_state
    }

    fn weights(&self) -> &WeightTable {
        &self.weights
    }

    fn fire_threshold(&self) -> f64 {
        self.fire_threshold
    }

    fn motor_accumulators(&self) -> (f64, f64) {
        (self.accum_left, self.accum_right)
    }

    fn advance(&mut self) {
        if self.food_sensed {
            let group = std::mem::take(&mut self.food_sense);
            self.stimulate(&group);
            self.food_sense = group;
            self.food_sensed = false;
        } else {
            let group = std::mem::take(&mut self.hunger);
            self.stimulate(&group);
            self.hunger = group;
        }

        if self.spontaneous_rate > 0.0
            && !self.sensory.is_empty()
            && self.rng.gen_bool(self.spontaneous_rate)
        {
            let pick = self.rng.gen_range(0..self.sensory.len());
            let id = self.sensory[pick].clone();
            self.fire(&id);
        }

        self.run_connectome();
        self.motor_control();

        let (this, next) = (self.this_state, self.next_state);
        for values in self.post_synaptic.values_mut() {
            values[this] = values[next];
        }
        std::mem::swap(&mut self.this_state, &mut self.next_state);
    }

    fn set_food_sensed(&mut self, sensed: bool) {
        self.food_sensed = sensed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &str = r#"
        fire_threshold = 30.0
        food_sense = ["ADFL"]
        hunger = ["AWCL"]
        left_muscles = ["MDL"]
        right_muscles = ["MDR"]

        [synapses.ADFL]
        AIYL = 40.0

        [synapses.AWCL]
        AIYL = 12.0

        [synapses.AIYL]
        MDL01 = 20.0
        MDR01 = 5.0
    "#;

    #[test]
    fn test_bundled_loads() {
        let brain = Connectome::bundled().unwrap();
        assert!(brain.activations().len() > 50);
        assert_eq!(brain.fire_threshold(), 30.0);
        assert!(brain.activations().contains_key("MDL01"));
        assert!(brain.is_muscle("MVR04"));
        assert!(!brain.is_muscle("AVBL"));
    }

    #[test]
    fn test_targets_are_in_activation_table() {
        let brain = Connectome::from_toml(TINY).unwrap();
        let ids: Vec<&str> = brain.activations().keys().map(String::as_str).collect();
        assert_eq!(ids, ["ADFL", "AIYL", "AWCL", "MDL01", "MDR01"]);
    }

    #[test]
    fn test_hunger_accumulates_until_threshold() {
        let mut brain = Connectome::from_toml(TINY).unwrap();

        for expected in [12.0, 24.0, 36.0] {
            brain.advance();
            assert_eq!(brain.activation("AIYL"), Some(expected));
            assert_eq!(brain.motor_accumulators(), (0.0, 0.0));
        }
        assert!(brain.is_firing("AIYL"));

        // AIYL fires into the muscles and resets
        brain.advance();
        assert_eq!(brain.motor_accumulators(), (20.0, 5.0));
        assert_eq!(brain.activation("AIYL"), Some(0.0));
        assert_eq!(brain.activation("MDL01"), Some(0.0));
    }

    #[test]
    fn test_food_flag_switches_stimulus_and_clears() {
        let mut brain = Connectome::from_toml(TINY).unwrap();
        brain.set_food_sensed(true);
        brain.advance();

        assert!(!brain.food_sensed());
        assert_eq!(brain.activation("AIYL"), Some(40.0));
        assert_eq!(brain.firing_count(), 1);
    }

    #[test]
    fn test_state_index_alternates() {
        let mut brain = Connectome::from_toml(TINY).unwrap();
        assert_eq!(brain.current_state(), 0);
        brain.advance();
        assert_eq!(brain.current_state(), 1);
        brain.advance();
        assert_eq!(brain.current_state(), 0);
    }

    #[test]
    fn test_unknown_stimulus_neuron_rejected() {
        let err = Connectome::from_toml(
            r#"
            fire_threshold = 30.0
            hunger = ["NOPE"]
            [synapses.AIYL]
            MDL01 = 1.0
            "#,
        )
        .err()
        .unwrap();
        assert!(matches!(err, CoreError::Connectome(_)));
    }

    #[test]
    fn test_bad_toml_rejected() {
        let err = Connectome::from_toml("fire_threshold = ").err().unwrap();
        assert!(matches!(err, CoreError::Toml(_)));
    }

    #[test]
    fn test_missing_file_is_filesystem_error() {
        let err = Connectome::load(Path::new("/nonexistent/wormsim/connectome.toml"))
            .err()
            .unwrap();
        assert!(matches!(err, CoreError::FileSystem(_)));
        assert!(err.to_string().starts_with("File system error"));
    }

    #[test]
    fn test_spontaneous_activity_is_seeded() {
        let run = |seed| {
            let mut brain = Connectome::bundled()
                .unwrap()
                .with_spontaneous_activity(0.5, seed);
            let mut trace = Vec::new();
            for _ in 0..50 {
                brain.advance();
                trace.push(brain.motor_accumulators());
            }
            trace
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_bundled_worm_moves_eventually() {
        let mut brain = Connectome::bundled().unwrap();
        let moved = (0..300).any(|_| {
            brain.advance();
            brain.motor_accumulators() != (0.0, 0.0)
        });
        assert!(moved);
    }
}
