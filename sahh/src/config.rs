use anyhow::{Result, ensure};
use ccbp::engine::{Feature, Heuristic};
use serde::{Deserialize, Serialize};

/// Configuration of the hyper-heuristic experiment
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SAHHConfig {
    /// Features spanning the space in which the conditions live
    pub features: Vec<Feature>,
    /// Heuristics the hyper-heuristic chooses from, one condition each
    pub heuristics: Vec<Heuristic>,
    /// Configuration of the simulated annealing trainer
    pub sa: SAConfig,
}

/// Configuration of the simulated annealing trainer
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct SAConfig {
    /// Seed for the PRNG. If not defined, the trainer will run in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
    /// Number of passes over the training instances
    pub epochs: usize,
    /// Temperature at the start of training, cooled linearly to zero over all steps
    pub initial_temperature: f64,
    /// How a condition is moved towards an observed state
    #[serde(default)]
    pub condition_update: ConditionUpdate,
}

/// Rule to move a condition `c` towards a state `s` by a random fraction `r` of their difference
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConditionUpdate {
    /// `c += r * (s - c)`
    #[default]
    Additive,
    /// `c = r * (s - c)`, the condition restarts from the origin every update
    Overwrite,
}

impl SAHHConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.features.is_empty(), "at least one feature is required");
        ensure!(!self.heuristics.is_empty(), "at least one heuristic is required");
        self.sa.validate()
    }
}

impl SAConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.initial_temperature.is_finite() && self.initial_temperature > 0.0,
            "initial temperature must be positive, got {}",
            self.initial_temperature
        );
        Ok(())
    }
}

impl Default for SAHHConfig {
    fn default() -> Self {
        Self {
            features: Feature::ALL.to_vec(),
            heuristics: Heuristic::ALL.to_vec(),
            sa: SAConfig::default(),
        }
    }
}

impl Default for SAConfig {
    fn default() -> Self {
        Self {
            prng_seed: Some(1),
            epochs: 10,
            initial_temperature: 10.0,
            condition_update: ConditionUpdate::Additive,
        }
    }
}
