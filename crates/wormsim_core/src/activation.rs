//! The narrow interface through which the simulation sees a neural model.

use std::collections::BTreeMap;
use wormsim_data::Connection;

/// Number of activation slots kept per neuron (current and next).
pub const STATE_COUNT: usize = 2;

/// Neuron identifier to per-state activation values.
pub type ActivationTable = BTreeMap<String, [f64; STATE_COUNT]>;

/// Source identifier to (target identifier to synaptic weight).
pub type WeightTable = BTreeMap<String, BTreeMap<String, f64>>;

/// A neural model the worm can be driven by.
///
/// The simulation reads activations, weights, the threshold and the two motor
/// accumulators, calls [`advance`](ActivationModel::advance) once per tick and
/// raises the food flag. Everything else is the model's own business.
pub trait ActivationModel {
    fn activations(&self) -> &ActivationTable;

    /// Which slot of each [`ActivationTable`] entry holds the live value.
    fn current_state(&self) -> usize;

    fn weights(&self) -> &WeightTable;

    fn fire_threshold(&self) -> f64;

    /// `(left, right)` motor accumulators produced by the last advance.
    fn motor_accumulators(&self) -> (f64, f64);

    fn advance(&mut self);

    fn set_food_sensed(&mut self, sensed: bool);

    /// Live activation of `id`, if the model knows it.
    fn activation(&self, id: &str) -> Option<f64> {
        let state = self.current_state();
        self.activations()
            .get(id)
            .and_then(|values| values.get(state).copied())
    }

    fn is_firing(&self, id: &str) -> bool {
        self.activation(id)
            .is_some_and(|value| value > self.fire_threshold())
    }

    /// Flattened weight table in source, then target order.
    fn connections(&self) -> Vec<Connection> {
        self.weights()
            .iter()
            .flat_map(|(source, targets)| {
                targets.iter().map(move |(target, weight)| Connection {
                    source: source.clone(),
                    target: target.clone(),
                    weight: *weight,
                })
            })
            .collect()
    }
}
