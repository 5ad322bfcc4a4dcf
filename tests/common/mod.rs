use std::collections::BTreeMap;
use wormsim_core::activation::{ActivationModel, ActivationTable, WeightTable};
use wormsim_core::config::AppConfig;
use wormsim_core::simulation::Simulation;
use wormsim_data::Point;

/// A model that replays fixed motor outputs and records the food flag.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct ScriptedModel {
    pub activations: ActivationTable,
    pub weights: WeightTable,
    pub threshold: f64,
    pub outputs: Vec<(f64, f64)>,
    pub advances: usize,
    pub food_flags: Vec<bool>,
    pub state: usize,
    current: (f64, f64),
}

#[allow(dead_code)]
impl ScriptedModel {
    /// Motionless model with no neurons.
    pub fn still() -> Self {
        Self::with_outputs(vec![(0.0, 0.0)])
    }

    /// Replays `outputs` in a loop, one pair per advance.
    pub fn with_outputs(outputs: Vec<(f64, f64)>) -> Self {
        Self {
            threshold: 30.0,
            outputs,
            ..Self::default()
        }
    }

    pub fn with_neuron(mut self, id: &str, value: f64) -> Self {
        self.activations.insert(id.to_string(), [value, value]);
        self
    }

    /// Sets both activation slots of `id` independently.
    pub fn with_slots(mut self, id: &str, slots: [f64; 2]) -> Self {
        self.activations.insert(id.to_string(), slots);
        self
    }

    pub fn on_state(mut self, state: usize) -> Self {
        self.state = state;
        self
    }

    pub fn with_synapse(mut self, source: &str, target: &str, weight: f64) -> Self {
        self.weights
            .entry(source.to_string())
            .or_insert_with(BTreeMap::new)
            .insert(target.to_string(), weight);
        self
    }
}

impl ActivationModel for ScriptedModel {
    fn activations(&self) -> &ActivationTable {
        &self.activations
    }

    fn current_state(&self) -> usize {
        self.state
    }

    fn weights(&self) -> &WeightTable {
        &self.weights
    }

    fn fire_threshold(&self) -> f64 {
        self.threshold
    }

    fn motor_accumulators(&self) -> (f64, f64) {
        self.current
    }

    fn advance(&mut self) {
        if !self.outputs.is_empty() {
            self.current = self.outputs[self.advances % self.outputs.len()];
        }
        self.advances += 1;
    }

    fn set_food_sensed(&mut self, sensed: bool) {
        self.food_flags.push(sensed);
    }
}

#[allow(dead_code)]
pub struct SimulationBuilder {
    config: AppConfig,
    model: ScriptedModel,
    food: Vec<Point>,
}

#[allow(dead_code)]
impl SimulationBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(42);
        Self {
            config,
            model: ScriptedModel::still(),
            food: Vec::new(),
        }
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_model(mut self, model: ScriptedModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_food_at(mut self, x: f64, y: f64) -> Self {
        self.food.push(Point::new(x, y));
        self
    }

    pub fn build(self) -> Simulation<ScriptedModel> {
        let mut sim = Simulation::new(self.model, &self.config);
        for position in self.food {
            sim.add_food(position);
        }
        sim
    }
}
