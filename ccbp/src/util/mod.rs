/// Set of functions used throughout to assure the correctness of the library.
pub mod assertions;

/// Descriptive statistics used by the features
pub mod stats;
