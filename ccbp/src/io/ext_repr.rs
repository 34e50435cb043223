use serde::{Deserialize, Serialize};

use crate::entities::Item;

/// Class-constrained bin packing instance
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtCCBPInstance {
    /// The name of the instance
    pub name: String,
    /// Capacity of every bin
    pub capacity: u64,
    /// Maximum number of distinct colors per bin
    pub max_colors: usize,
    /// Items in packing order
    pub items: Vec<Item>,
}

/// A bin and its contents
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtBin {
    /// Creation index of the bin
    pub id: usize,
    /// Capacity left after packing
    pub remaining_capacity: u64,
    /// Distinct colors in the bin, in order of first appearance
    pub colors: Vec<u32>,
    /// Packed items, in packing order
    pub items: Vec<Item>,
    /// Whether the bin was full and closed
    pub closed: bool,
}

/// Class-constrained bin packing solution
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtCCBPSolution {
    /// Bins which compose the solution, closed ones first
    pub bins: Vec<ExtBin>,
    /// Average remaining capacity per bin
    pub avg_waste: f64,
    /// Items which were not packed (the last item of the queue is never packed)
    pub unpacked_items: Vec<Item>,
    /// Items which exceeded the bin capacity
    pub skipped_items: Vec<Item>,
    /// The time it took to generate the solution in seconds
    pub run_time_sec: f64,
}
