use itertools::Itertools;

use crate::engine::PackingEngine;
use crate::entities::{Bin, CCBPInstance, CCBPSolution};

//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

/// Checks the capacity and color invariants of a bin with initial capacity `capacity`.
pub fn bin_is_valid(bin: &Bin, capacity: u64) -> bool {
    let packed_size = bin.items().iter().map(|item| item.size).sum::<u64>();
    packed_size + bin.remaining_capacity() == capacity
        && bin.n_colors() <= bin.max_colors()
        && bin.colors().iter().all_unique()
        && bin.items().iter().all(|item| bin.contains_color(item.color))
        && bin.colors().iter().all(|&c| bin.items().iter().any(|item| item.color == c))
}

pub fn engine_matches_solution(engine: &PackingEngine, sol: &CCBPSolution) -> bool {
    assert_eq!(engine.n_bins(), sol.bins.len());
    assert_eq!(engine.closed_bins().len(), sol.n_closed_bins);
    assert_eq!(engine.n_remaining_items(), sol.remaining_items.len());
    assert_eq!(engine.skipped_items(), sol.skipped_items.as_slice());

    engine
        .bins()
        .zip(sol.bins.iter())
        .all(|(b, sb)| b.id == sb.id && b.items() == sb.items())
}

/// Checks that every item of the instance is either pending, packed or skipped,
/// and that exactly the full bins are closed.
pub fn engine_is_consistent(engine: &PackingEngine, instance: &CCBPInstance) -> bool {
    let n_packed = engine.bins().map(|b| b.items().len()).sum::<usize>();
    let n_accounted = n_packed + engine.n_remaining_items() + engine.skipped_items().len();

    n_accounted == instance.n_items()
        && engine.capacity() == instance.capacity
        && engine.max_colors() == instance.max_colors
        && engine.bins().all(|b| bin_is_valid(b, engine.capacity()))
        && engine.closed_bins().iter().all(|b| b.is_full())
        && engine.open_bins().iter().all(|b| !b.is_full())
        && engine.bins().map(|b| b.id).all_unique()
}
