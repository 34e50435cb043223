use crate::entities::{Bin, Item};

/// Snapshot of a [`PackingEngine`](crate::engine::PackingEngine) after (partially) solving an instance.
#[derive(Debug, Clone)]
pub struct CCBPSolution {
    /// All bins, the closed ones first followed by the ones still open
    pub bins: Vec<Bin>,
    /// Number of leading entries of `bins` that are closed (full)
    pub n_closed_bins: usize,
    /// Items which were not packed yet
    pub remaining_items: Vec<Item>,
    /// Items which were dropped because they exceed the bin capacity
    pub skipped_items: Vec<Item>,
}

impl CCBPSolution {
    pub fn closed_bins(&self) -> &[Bin] {
        &self.bins[..self.n_closed_bins]
    }

    pub fn open_bins(&self) -> &[Bin] {
        &self.bins[self.n_closed_bins..]
    }

    pub fn n_packed_items(&self) -> usize {
        self.bins.iter().map(|b| b.items().len()).sum()
    }

    /// Average remaining capacity over all bins
    pub fn avg_waste(&self) -> f64 {
        let total = self
            .bins
            .iter()
            .map(|b| b.remaining_capacity() as f64)
            .sum::<f64>();
        total / self.bins.len() as f64
    }
}
