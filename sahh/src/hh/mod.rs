use anyhow::Result;
use ccbp::engine::{Heuristic, PackingEngine};
use ccbp::entities::{CCBPInstance, CCBPSolution};

mod conditions;
mod nearest_condition;
mod sa_trainer;

pub use conditions::ConditionSet;
pub use conditions::euclidean_distance;
pub use nearest_condition::NearestConditionHH;
pub use sa_trainer::ClosestBest;
pub use sa_trainer::SATrainer;
pub use sa_trainer::TrainingStats;
pub use sa_trainer::step_cost;

/// Selects, before every packing step, which low-level [`Heuristic`] packs the next item.
pub trait HyperHeuristic {
    fn choose_heuristic(&self, engine: &PackingEngine) -> Heuristic;

    /// Adapts the hyper-heuristic to a set of training instances
    fn train(&mut self, instances: &[CCBPInstance]) -> Result<()>;

    /// The conditions the hyper-heuristic currently uses to select heuristics
    fn conditions(&self) -> &ConditionSet;

    /// Solves an instance, consulting [`HyperHeuristic::choose_heuristic`] before every step.
    fn solve(&self, instance: &CCBPInstance) -> CCBPSolution {
        let mut engine = PackingEngine::new(instance);
        engine.solve_all_by(|e| self.choose_heuristic(e))
    }
}
