mod feature;
mod heuristic;
mod packing_engine;

#[doc(inline)]
pub use feature::Feature;

#[doc(inline)]
pub use feature::N_FEATURES;

#[doc(inline)]
pub use heuristic::BinSelection;

#[doc(inline)]
pub use heuristic::ColorPreference;

#[doc(inline)]
pub use heuristic::Heuristic;

#[doc(inline)]
pub use heuristic::N_HEURISTICS;

#[doc(inline)]
pub use packing_engine::PackingEngine;

#[doc(inline)]
pub use packing_engine::StepOutcome;
