use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Error, anyhow};
use serde::{Deserialize, Serialize};

pub const N_FEATURES: usize = 10;

/// Statistic describing the current state of a [`PackingEngine`](crate::engine::PackingEngine).
///
/// Item based features are computed over the items which remain to be packed,
/// bin based features over all bins (open and closed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Feature {
    /// Mean item size relative to the largest item
    AvgL,
    /// Standard deviation of the item sizes relative to the largest item
    StdL,
    /// Fraction of items smaller than half the bin capacity
    Small,
    /// Fraction of items smaller than a quarter of the bin capacity
    VSmall,
    /// Fraction of items larger than half the bin capacity
    Large,
    /// Fraction of items larger than three quarters of the bin capacity
    VLarge,
    /// Ratio between the color budget of a bin and the number of distinct colors, capped at 1
    ColorC,
    /// Fraction of bins which are still open
    OBins,
    /// Average remaining capacity per bin
    AvgW,
    /// Average number of distinct colors per bin
    ColorF,
}

impl Feature {
    pub const ALL: [Feature; N_FEATURES] = [
        Feature::AvgL,
        Feature::StdL,
        Feature::Small,
        Feature::VSmall,
        Feature::Large,
        Feature::VLarge,
        Feature::ColorC,
        Feature::OBins,
        Feature::AvgW,
        Feature::ColorF,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::AvgL => "AVGL",
            Feature::StdL => "STDL",
            Feature::Small => "SMALL",
            Feature::VSmall => "VSMALL",
            Feature::Large => "LARGE",
            Feature::VLarge => "VLARGE",
            Feature::ColorC => "COLORC",
            Feature::OBins => "OBINS",
            Feature::AvgW => "AVGW",
            Feature::ColorF => "COLORF",
        }
    }
}

impl Display for Feature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("unknown feature: {s:?}"))
    }
}
