use std::fmt::{Display, Formatter};

use anyhow::{Result, ensure};
use ccbp::engine::{Feature, Heuristic, PackingEngine};
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConditionUpdate;

/// One condition per heuristic: a point in the space spanned by `features`.
/// A state is mapped to the heuristic whose condition lies closest to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionSet {
    pub features: Vec<Feature>,
    pub heuristics: Vec<Heuristic>,
    /// `points[i]` is the condition of `heuristics[i]`, one coordinate per feature
    pub points: Vec<Vec<f64>>,
}

impl ConditionSet {
    pub fn new(
        features: Vec<Feature>,
        heuristics: Vec<Heuristic>,
        points: Vec<Vec<f64>>,
    ) -> Result<Self> {
        ensure!(!features.is_empty(), "at least one feature is required");
        ensure!(!heuristics.is_empty(), "at least one heuristic is required");
        ensure!(
            points.len() == heuristics.len(),
            "expected {} conditions, found {}",
            heuristics.len(),
            points.len()
        );
        ensure!(
            points.iter().all(|p| p.len() == features.len()),
            "every condition needs exactly {} coordinates",
            features.len()
        );
        Ok(Self {
            features,
            heuristics,
            points,
        })
    }

    /// Draws every coordinate uniformly from `[0, 1)`, heuristic by heuristic.
    pub fn random(features: Vec<Feature>, heuristics: Vec<Heuristic>, rng: &mut impl Rng) -> Self {
        assert!(!features.is_empty() && !heuristics.is_empty());
        let points = (0..heuristics.len())
            .map(|_| (0..features.len()).map(|_| rng.random::<f64>()).collect())
            .collect();
        Self {
            features,
            heuristics,
            points,
        }
    }

    /// The state of the engine, expressed in the features of this set
    pub fn state(&self, engine: &PackingEngine) -> Vec<f64> {
        engine.features(&self.features)
    }

    /// Index of the condition closest to `state`. Ties go to the lowest index.
    /// Falls back to the first condition if no distance is comparable (e.g. `NaN` features).
    pub fn closest(&self, state: &[f64]) -> usize {
        let mut closest = (0, f64::INFINITY);
        for (idx, point) in self.points.iter().enumerate() {
            let distance = euclidean_distance(state, point);
            if distance < closest.1 {
                closest = (idx, distance);
            }
        }
        closest.0
    }

    pub fn closest_heuristic(&self, state: &[f64]) -> Heuristic {
        self.heuristics[self.closest(state)]
    }

    /// Moves condition `idx` towards `state`.
    /// Every coordinate `c` draws its own fraction `r` in `[0, 1)` of the difference with `s`.
    pub fn move_towards(
        &mut self,
        idx: usize,
        state: &[f64],
        rng: &mut impl Rng,
        update: ConditionUpdate,
    ) {
        for (c, &s) in self.points[idx].iter_mut().zip(state) {
            let step = rng.random::<f64>() * (s - *c);
            match update {
                ConditionUpdate::Additive => *c += step,
                ConditionUpdate::Overwrite => *c = step,
            }
        }
    }

    pub fn n_conditions(&self) -> usize {
        self.points.len()
    }
}

pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

impl Display for ConditionSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}]", self.features.iter().join(", "))?;
        for (heuristic, point) in self.heuristics.iter().zip(&self.points) {
            let coords = point.iter().map(|c| format!("{c:.4}")).join(", ");
            writeln!(f, "[{coords}] => {heuristic}")?;
        }
        Ok(())
    }
}
