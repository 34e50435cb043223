//! Engine for the one-dimensional class-constrained bin packing problem (CCBPP).
//!
//! Items carry a size and a color. Bins are limited both in capacity and in the number of
//! distinct colors they may hold. The [`PackingEngine`](engine::PackingEngine) streams the items
//! of an instance through one of twelve placement [`Heuristic`](engine::Heuristic)s and exposes
//! ten [`Feature`](engine::Feature)s describing the current packing state.

/// Items, bins and problem instances
pub mod entities;

/// Packing engine, heuristics and features
pub mod engine;

/// Importing instances and exporting solutions
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
