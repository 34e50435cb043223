use ccbp::engine::{Feature, Heuristic, PackingEngine};
use ccbp::entities::CCBPInstance;
use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;

use crate::hh::HyperHeuristic;

/// Table with one row per instance and one value per column
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportRow {
    pub instance: String,
    pub values: Vec<f64>,
}

impl Report {
    /// Comma separated table with a header line `File, <column>, ...`.
    /// Values are written with four decimals.
    pub fn to_csv(&self) -> String {
        let header = std::iter::once("File")
            .chain(self.columns.iter().map(String::as_str))
            .join(", ");
        let rows = self.rows.iter().map(|row| {
            std::iter::once(row.instance.clone())
                .chain(row.values.iter().map(|v| format!("{v:.4}")))
                .join(", ")
        });
        std::iter::once(header).chain(rows).join("\n") + "\n"
    }

    /// Mean of every column over all rows
    pub fn column_means(&self) -> Vec<f64> {
        (0..self.columns.len())
            .map(|col| {
                let sum = self.rows.iter().map(|row| row.values[col]).sum::<f64>();
                sum / self.rows.len() as f64
            })
            .collect()
    }
}

/// Initial value of each feature for every instance
pub fn characterize_set(instances: &[CCBPInstance], features: &[Feature]) -> Report {
    let rows = instances
        .par_iter()
        .map(|instance| ReportRow {
            instance: instance.name.clone(),
            values: PackingEngine::new(instance).features(features),
        })
        .collect();

    Report {
        columns: features.iter().map(|f| f.to_string()).collect(),
        rows,
    }
}

/// Average waste obtained by each heuristic on its own for every instance
pub fn solve_set(instances: &[CCBPInstance], heuristics: &[Heuristic]) -> Report {
    let rows = instances
        .par_iter()
        .map(|instance| ReportRow {
            instance: instance.name.clone(),
            values: heuristics
                .iter()
                .map(|&h| PackingEngine::new(instance).solve_all(h).avg_waste())
                .collect(),
        })
        .collect();

    Report {
        columns: heuristics.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

/// Average waste obtained by a hyper-heuristic for every instance
pub fn solve_set_hh<H: HyperHeuristic + Sync>(instances: &[CCBPInstance], hh: &H) -> Report {
    let rows = instances
        .par_iter()
        .map(|instance| ReportRow {
            instance: instance.name.clone(),
            values: vec![hh.solve(instance).avg_waste()],
        })
        .collect();

    Report {
        columns: vec!["Hyper-heuristic".to_string()],
        rows,
    }
}
