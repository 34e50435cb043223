use anyhow::{Result, bail};
use ccbp::engine::{Feature, Heuristic, PackingEngine};
use ccbp::entities::CCBPInstance;
use rand::SeedableRng;
use rand::prelude::SmallRng;

use crate::hh::{ConditionSet, HyperHeuristic};

/// Applies the heuristic whose condition is closest to the current state, without any learning.
/// With random conditions it serves as the baseline for trained hyper-heuristics.
#[derive(Clone, Debug)]
pub struct NearestConditionHH {
    pub conditions: ConditionSet,
}

impl NearestConditionHH {
    pub fn new(features: Vec<Feature>, heuristics: Vec<Heuristic>, prng_seed: Option<u64>) -> Self {
        let mut rng = match prng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::from_conditions(ConditionSet::random(features, heuristics, &mut rng))
    }

    pub fn from_conditions(conditions: ConditionSet) -> Self {
        Self { conditions }
    }
}

impl HyperHeuristic for NearestConditionHH {
    fn choose_heuristic(&self, engine: &PackingEngine) -> Heuristic {
        let state = self.conditions.state(engine);
        self.conditions.closest_heuristic(&state)
    }

    fn train(&mut self, _instances: &[CCBPInstance]) -> Result<()> {
        bail!("nearest condition hyper-heuristic cannot be trained, use a trainer instead")
    }

    fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }
}
