use crate::entities::{CCBPInstance, CCBPSolution};
use crate::io::ext_repr::{ExtBin, ExtCCBPInstance, ExtCCBPSolution};

/// Exports a solution out of the library
pub fn export(solution: &CCBPSolution, run_time_sec: f64) -> ExtCCBPSolution {
    let bins = solution
        .bins
        .iter()
        .enumerate()
        .map(|(i, bin)| ExtBin {
            id: bin.id,
            remaining_capacity: bin.remaining_capacity(),
            colors: bin.colors().to_vec(),
            items: bin.items().to_vec(),
            closed: i < solution.n_closed_bins,
        })
        .collect();

    ExtCCBPSolution {
        bins,
        avg_waste: solution.avg_waste(),
        unpacked_items: solution.remaining_items.clone(),
        skipped_items: solution.skipped_items.clone(),
        run_time_sec,
    }
}

/// Exports an instance out of the library
pub fn export_instance(instance: &CCBPInstance) -> ExtCCBPInstance {
    ExtCCBPInstance {
        name: instance.name.clone(),
        capacity: instance.capacity,
        max_colors: instance.max_colors,
        items: instance.items.clone(),
    }
}
