use std::time::Instant;

use anyhow::Result;
use ccbp::engine::{Feature, Heuristic, PackingEngine};
use ccbp::entities::CCBPInstance;
use log::{debug, info, warn};
use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};
use thousands::Separable;

use crate::config::SAConfig;
use crate::hh::{ConditionSet, HyperHeuristic};

/// Trains a [`ConditionSet`] with simulated annealing.
///
/// At every step of every training instance, the heuristic of the condition closest to the current
/// state is compared with the heuristic whose single step would result in the lowest cost.
/// One of both conditions is then pulled towards the state: the closest one with probability
/// `exp((closest_cost - best_cost) / T)`, the best one otherwise.
/// The temperature `T` decreases linearly to zero over all training steps.
pub struct SATrainer {
    pub conditions: ConditionSet,
    pub config: SAConfig,
    /// SmallRng is a fast, non-cryptographic PRNG <https://rust-random.github.io/book/guide-rngs.html>
    pub rng: SmallRng,
    /// Accumulated over all calls to [`HyperHeuristic::train`]
    pub stats: TrainingStats,
}

/// Outcome of probing every heuristic on the current state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosestBest {
    /// Index of the condition closest to the state
    pub closest: usize,
    /// Index of the heuristic with the lowest step cost. Ties go to the lowest index.
    pub best: usize,
    pub closest_cost: f64,
    pub best_cost: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrainingStats {
    pub n_steps: usize,
    pub n_closest_moved: usize,
    pub n_best_moved: usize,
    /// Steps in which the closest condition also belonged to the best heuristic
    pub n_agreements: usize,
}

impl SATrainer {
    /// Creates a trainer with random initial conditions.
    /// The initial conditions are the first draws of the trainer's PRNG.
    pub fn new(features: Vec<Feature>, heuristics: Vec<Heuristic>, config: SAConfig) -> Self {
        let mut rng = match config.prng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let conditions = ConditionSet::random(features, heuristics, &mut rng);
        Self {
            conditions,
            config,
            rng,
            stats: TrainingStats::default(),
        }
    }

    /// Simulates a single step of every heuristic on a copy of `engine` and compares the results.
    pub fn closest_best(&self, engine: &PackingEngine, state: &[f64]) -> ClosestBest {
        let costs = self
            .conditions
            .heuristics
            .iter()
            .map(|&h| step_cost(&engine.simulate_step(h)))
            .collect::<Vec<f64>>();

        let closest = self.conditions.closest(state);

        let mut best = 0;
        for (idx, &cost) in costs.iter().enumerate() {
            if cost < costs[best] {
                best = idx;
            }
        }

        ClosestBest {
            closest,
            best,
            closest_cost: costs[closest],
            best_cost: costs[best],
        }
    }

    /// Performs one training step on `engine`: moves a condition and advances the engine
    /// with the heuristic of the closest condition.
    /// Returns the index of the moved condition along with the probing outcome.
    pub fn train_step(
        &mut self,
        engine: &mut PackingEngine,
        temperature: f64,
    ) -> (usize, ClosestBest) {
        let state = self.conditions.state(engine);
        let cb = self.closest_best(engine, &state);

        let p_closest = ((cb.closest_cost - cb.best_cost) / temperature).exp();
        let moved = match self.rng.random::<f64>() < p_closest {
            true => cb.closest,
            false => cb.best,
        };
        self.conditions
            .move_towards(moved, &state, &mut self.rng, self.config.condition_update);

        engine.solve_one_step(self.conditions.heuristics[cb.closest]);
        (moved, cb)
    }
}

/// Cost of the state after a step: average waste plus average number of colors per bin
pub fn step_cost(probe: &PackingEngine) -> f64 {
    probe.feature(Feature::AvgW) + probe.feature(Feature::ColorF)
}

impl HyperHeuristic for SATrainer {
    fn choose_heuristic(&self, engine: &PackingEngine) -> Heuristic {
        let state = self.conditions.state(engine);
        self.conditions.closest_heuristic(&state)
    }

    fn train(&mut self, instances: &[CCBPInstance]) -> Result<()> {
        self.config.validate()?;

        let n_items = instances.iter().map(|i| i.n_items()).sum::<usize>();
        let total_steps = self.config.epochs * n_items;
        if total_steps == 0 {
            warn!(
                "[SA] nothing to train on ({} epochs, {} instances)",
                self.config.epochs,
                instances.len()
            );
            return Ok(());
        }

        let initial_temperature = self.config.initial_temperature;
        let cooling_rate = initial_temperature / total_steps as f64;
        let mut temperature = initial_temperature;
        let mut stats = TrainingStats::default();
        let start = Instant::now();

        for epoch in 0..self.config.epochs {
            info!(
                "[SA] epoch {}/{} starting at temperature {:.4}",
                epoch + 1,
                self.config.epochs,
                temperature
            );
            for instance in instances {
                let mut engine = PackingEngine::new(instance);
                while engine.n_remaining_items() > 1 {
                    let (moved, cb) = self.train_step(&mut engine, temperature);
                    temperature -= cooling_rate;

                    stats.n_steps += 1;
                    match moved == cb.closest {
                        true => stats.n_closest_moved += 1,
                        false => stats.n_best_moved += 1,
                    }
                    let heuristics = &self.conditions.heuristics;
                    if heuristics[cb.closest] == heuristics[cb.best] {
                        stats.n_agreements += 1;
                    }
                }
                debug!("[SA] epoch {} finished instance {}", epoch + 1, instance.name);
            }
        }

        info!(
            "[SA] training finished in {:.3}ms ({} steps, final temperature {:.4})",
            start.elapsed().as_secs_f64() * 1000.0,
            stats.n_steps.separate_with_commas(),
            temperature
        );
        info!(
            "[SA] moved closest condition {} times, best condition {} times, agreement {:.2}%",
            stats.n_closest_moved.separate_with_commas(),
            stats.n_best_moved.separate_with_commas(),
            stats.n_agreements as f64 / stats.n_steps.max(1) as f64 * 100.0
        );

        self.stats.n_steps += stats.n_steps;
        self.stats.n_closest_moved += stats.n_closest_moved;
        self.stats.n_best_moved += stats.n_best_moved;
        self.stats.n_agreements += stats.n_agreements;
        Ok(())
    }

    fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }
}
