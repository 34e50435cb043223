use std::cmp::Reverse;
use std::collections::VecDeque;

use itertools::Itertools;
use log::{debug, trace, warn};

use crate::engine::{BinSelection, Feature, Heuristic, N_FEATURES};
use crate::entities::{Bin, CCBPInstance, CCBPSolution, Item};
use crate::util::assertions::{bin_is_valid, engine_matches_solution};
use crate::util::stats;

/// Result of a single [`PackingEngine::solve_one_step`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The item was packed in the bin with the given id. `closed` is set if the bin became full.
    Packed { item: Item, bin_id: usize, closed: bool },
    /// The item exceeds the bin capacity and was dropped
    Skipped(Item),
    /// No items remain
    Exhausted,
}

/// Dynamic counterpart of [`CCBPInstance`].
/// Streams the items of the instance, front first, into bins chosen by a [`Heuristic`].
#[derive(Clone, Debug)]
pub struct PackingEngine {
    capacity: u64,
    max_colors: usize,
    remaining_items: VecDeque<Item>,
    /// Bins which can still receive items, in creation order
    open_bins: Vec<Bin>,
    /// Bins with no capacity left, in order of closing
    closed_bins: Vec<Bin>,
    skipped_items: Vec<Item>,
    n_bins_created: usize,
}

impl PackingEngine {
    /// Creates an engine for the instance with all items pending and a single empty bin open.
    pub fn new(instance: &CCBPInstance) -> Self {
        let mut engine = Self {
            capacity: instance.capacity,
            max_colors: instance.max_colors,
            remaining_items: instance.items.iter().copied().collect(),
            open_bins: vec![],
            closed_bins: vec![],
            skipped_items: vec![],
            n_bins_created: 0,
        };
        engine.open_new_bin();
        engine
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    pub fn remaining_items(&self) -> &VecDeque<Item> {
        &self.remaining_items
    }

    pub fn n_remaining_items(&self) -> usize {
        self.remaining_items.len()
    }

    pub fn open_bins(&self) -> &[Bin] {
        &self.open_bins
    }

    pub fn closed_bins(&self) -> &[Bin] {
        &self.closed_bins
    }

    pub fn skipped_items(&self) -> &[Item] {
        &self.skipped_items
    }

    /// Current layout: closed bins followed by open bins
    pub fn bins(&self) -> impl Iterator<Item = &Bin> {
        self.closed_bins.iter().chain(self.open_bins.iter())
    }

    pub fn n_bins(&self) -> usize {
        self.open_bins.len() + self.closed_bins.len()
    }

    /// Returns the index (in [`PackingEngine::open_bins`]) of the bin which should receive `item`
    /// according to `heuristic`. If no open bin qualifies, a new one is opened.
    pub fn select_bin(&mut self, heuristic: Heuristic, item: &Item) -> usize {
        let (selection, color_pref) = heuristic.decompose();

        //candidate bins together with their leftover capacity after packing
        let candidates = self
            .open_bins
            .iter()
            .enumerate()
            .filter(|(_, bin)| bin.can_pack(item) && color_pref.admits(bin, item))
            .map(|(idx, bin)| (idx, bin.remaining_capacity() - item.size));

        //all min_by_key calls return the first of equally ranked candidates
        let selected = match selection {
            BinSelection::FirstFit => candidates.map(|(idx, _)| idx).next(),
            BinSelection::BestFit => candidates
                .min_by_key(|&(_, leftover)| leftover)
                .map(|(idx, _)| idx),
            BinSelection::WorstFit => candidates
                .min_by_key(|&(_, leftover)| Reverse(leftover))
                .map(|(idx, _)| idx),
            BinSelection::AlmostWorstFit => second_loosest(candidates),
        };

        match selected {
            Some(idx) => idx,
            None => self.open_new_bin(),
        }
    }

    /// Takes the front item and packs it using `heuristic`.
    /// Oversized items are dropped. A bin whose capacity reaches zero is closed.
    pub fn solve_one_step(&mut self, heuristic: Heuristic) -> StepOutcome {
        let Some(item) = self.remaining_items.pop_front() else {
            return StepOutcome::Exhausted;
        };

        if item.size > self.capacity {
            debug!("[ENG] skipping item {item}, exceeds bin capacity {}", self.capacity);
            self.skipped_items.push(item);
            return StepOutcome::Skipped(item);
        }

        let idx = self.select_bin(heuristic, &item);
        let bin = &mut self.open_bins[idx];
        if !bin.pack(item) {
            //only possible for instances which allow no colors at all
            warn!("[ENG] item {item} cannot be packed in any bin, skipping");
            self.skipped_items.push(item);
            return StepOutcome::Skipped(item);
        }
        debug_assert!(bin_is_valid(bin, self.capacity));

        let bin_id = bin.id;
        let closed = bin.is_full();
        if closed {
            let bin = self.open_bins.remove(idx);
            self.closed_bins.push(bin);
        }
        trace!("[ENG] {heuristic} packed {item} in bin {bin_id} (closed: {closed})");

        StepOutcome::Packed { item, bin_id, closed }
    }

    /// Packs all items but the last one using a single heuristic.
    pub fn solve_all(&mut self, heuristic: Heuristic) -> CCBPSolution {
        self.solve_all_by(|_| heuristic)
    }

    /// Packs all items but the last one.
    /// Before every step `chooser` is consulted with the current state to pick the heuristic.
    pub fn solve_all_by(
        &mut self,
        mut chooser: impl FnMut(&PackingEngine) -> Heuristic,
    ) -> CCBPSolution {
        while self.remaining_items.len() > 1 {
            let heuristic = chooser(self);
            self.solve_one_step(heuristic);
        }
        self.save()
    }

    /// Performs one step with `heuristic` on an independent copy of the engine.
    /// `self` is left untouched.
    pub fn simulate_step(&self, heuristic: Heuristic) -> PackingEngine {
        let mut probe = self.clone();
        probe.solve_one_step(heuristic);
        probe
    }

    /// Creates a snapshot of the current state of the engine as a [`CCBPSolution`].
    pub fn save(&self) -> CCBPSolution {
        let solution = CCBPSolution {
            bins: self.bins().cloned().collect(),
            n_closed_bins: self.closed_bins.len(),
            remaining_items: self.remaining_items.iter().copied().collect(),
            skipped_items: self.skipped_items.clone(),
        };

        debug_assert!(engine_matches_solution(self, &solution));

        solution
    }

    /// Computes a single feature of the current state.
    /// Item based features are `NaN` when no items remain.
    pub fn feature(&self, feature: Feature) -> f64 {
        let capacity = self.capacity as f64;
        let n_bins = self.n_bins() as f64;

        match feature {
            Feature::AvgL => {
                let sizes = self.remaining_sizes();
                stats::relative_to_max(stats::mean(&sizes), stats::max(&sizes))
            }
            Feature::StdL => {
                let sizes = self.remaining_sizes();
                stats::relative_to_max(stats::stdev(&sizes), stats::max(&sizes))
            }
            Feature::Small => self.fraction_of_items(|s| s < 0.50 * capacity),
            Feature::VSmall => self.fraction_of_items(|s| s < 0.25 * capacity),
            Feature::Large => self.fraction_of_items(|s| s > 0.50 * capacity),
            Feature::VLarge => self.fraction_of_items(|s| s > 0.75 * capacity),
            Feature::ColorC => {
                let n_colors = self
                    .remaining_items
                    .iter()
                    .map(|item| item.color)
                    .unique()
                    .count();
                f64::min(1.0, self.max_colors as f64 / n_colors as f64)
            }
            Feature::OBins => self.open_bins.len() as f64 / n_bins,
            Feature::AvgW => {
                let waste = self.bins().map(|b| b.remaining_capacity() as f64).sum::<f64>();
                waste / n_bins
            }
            Feature::ColorF => {
                let n_colors = self.bins().map(|b| b.n_colors() as f64).sum::<f64>();
                n_colors / n_bins
            }
        }
    }

    /// Computes the given features of the current state, in order.
    pub fn features(&self, features: &[Feature]) -> Vec<f64> {
        features.iter().map(|&f| self.feature(f)).collect()
    }

    /// All ten features, in the order of [`Feature::ALL`]
    pub fn feature_vector(&self) -> [f64; N_FEATURES] {
        Feature::ALL.map(|f| self.feature(f))
    }

    fn fraction_of_items(&self, pred: impl Fn(f64) -> bool) -> f64 {
        let n_matching = self
            .remaining_items
            .iter()
            .filter(|item| pred(item.size as f64))
            .count();
        n_matching as f64 / self.remaining_items.len() as f64
    }

    fn remaining_sizes(&self) -> Vec<f64> {
        self.remaining_items.iter().map(|item| item.size as f64).collect()
    }

    fn open_new_bin(&mut self) -> usize {
        let bin = Bin::new(self.n_bins_created, self.capacity, self.max_colors);
        self.n_bins_created += 1;
        self.open_bins.push(bin);
        debug!("[ENG] opened bin {}", self.n_bins_created - 1);
        self.open_bins.len() - 1
    }
}

/// Returns the candidate with the second largest leftover capacity.
/// Candidates tying with the largest rank behind it. A single candidate is returned as is.
fn second_loosest(candidates: impl Iterator<Item = (usize, u64)>) -> Option<usize> {
    let mut first: Option<(usize, u64)> = None;
    let mut second: Option<(usize, u64)> = None;
    for (idx, leftover) in candidates {
        match first {
            Some((_, first_leftover)) if leftover <= first_leftover => {
                if second.is_none_or(|(_, second_leftover)| leftover > second_leftover) {
                    second = Some((idx, leftover));
                }
            }
            _ => {
                second = first;
                first = Some((idx, leftover));
            }
        }
    }
    second.or(first).map(|(idx, _)| idx)
}
