use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Error, anyhow};
use serde::{Deserialize, Serialize};

use crate::entities::{Bin, Item};

pub const N_HEURISTICS: usize = 12;

/// Rule deciding which open bin receives the next item.
///
/// Every heuristic is the combination of a [`BinSelection`] strategy and a [`ColorPreference`]:
/// the `Sc` variants only consider bins which already contain the item's color,
/// the `Dc` variants only bins which do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Heuristic {
    FirstFit,
    FirstFitSc,
    FirstFitDc,
    BestFit,
    BestFitSc,
    BestFitDc,
    WorstFit,
    WorstFitSc,
    WorstFitDc,
    AlmostWorstFit,
    AlmostWorstFitSc,
    AlmostWorstFitDc,
}

/// Tie-break strategy over the candidate bins
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinSelection {
    /// Earliest created candidate
    FirstFit,
    /// Candidate with the least leftover capacity after packing
    BestFit,
    /// Candidate with the most leftover capacity after packing
    WorstFit,
    /// Candidate with the second most leftover capacity after packing
    AlmostWorstFit,
}

/// Color condition a bin has to satisfy to be a candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorPreference {
    Any,
    /// The bin already contains the item's color
    Same,
    /// The bin does not contain the item's color yet
    Different,
}

impl ColorPreference {
    pub fn admits(&self, bin: &Bin, item: &Item) -> bool {
        match self {
            ColorPreference::Any => true,
            ColorPreference::Same => bin.contains_color(item.color),
            ColorPreference::Different => !bin.contains_color(item.color),
        }
    }
}

impl Heuristic {
    pub const ALL: [Heuristic; N_HEURISTICS] = [
        Heuristic::FirstFit,
        Heuristic::FirstFitSc,
        Heuristic::FirstFitDc,
        Heuristic::BestFit,
        Heuristic::BestFitSc,
        Heuristic::BestFitDc,
        Heuristic::WorstFit,
        Heuristic::WorstFitSc,
        Heuristic::WorstFitDc,
        Heuristic::AlmostWorstFit,
        Heuristic::AlmostWorstFitSc,
        Heuristic::AlmostWorstFitDc,
    ];

    /// Splits the heuristic into its selection strategy and color preference.
    pub fn decompose(&self) -> (BinSelection, ColorPreference) {
        use BinSelection as S;
        use ColorPreference as C;
        match self {
            Heuristic::FirstFit => (S::FirstFit, C::Any),
            Heuristic::FirstFitSc => (S::FirstFit, C::Same),
            Heuristic::FirstFitDc => (S::FirstFit, C::Different),
            Heuristic::BestFit => (S::BestFit, C::Any),
            Heuristic::BestFitSc => (S::BestFit, C::Same),
            Heuristic::BestFitDc => (S::BestFit, C::Different),
            Heuristic::WorstFit => (S::WorstFit, C::Any),
            Heuristic::WorstFitSc => (S::WorstFit, C::Same),
            Heuristic::WorstFitDc => (S::WorstFit, C::Different),
            Heuristic::AlmostWorstFit => (S::AlmostWorstFit, C::Any),
            Heuristic::AlmostWorstFitSc => (S::AlmostWorstFit, C::Same),
            Heuristic::AlmostWorstFitDc => (S::AlmostWorstFit, C::Different),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Heuristic::FirstFit => "FIRST_FIT",
            Heuristic::FirstFitSc => "FIRST_FIT_SC",
            Heuristic::FirstFitDc => "FIRST_FIT_DC",
            Heuristic::BestFit => "BEST_FIT",
            Heuristic::BestFitSc => "BEST_FIT_SC",
            Heuristic::BestFitDc => "BEST_FIT_DC",
            Heuristic::WorstFit => "WORST_FIT",
            Heuristic::WorstFitSc => "WORST_FIT_SC",
            Heuristic::WorstFitDc => "WORST_FIT_DC",
            Heuristic::AlmostWorstFit => "ALMOST_WORST_FIT",
            Heuristic::AlmostWorstFitSc => "ALMOST_WORST_FIT_SC",
            Heuristic::AlmostWorstFitDc => "ALMOST_WORST_FIT_DC",
        }
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("unknown heuristic: {s:?}"))
    }
}
