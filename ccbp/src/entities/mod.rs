mod bin;
mod instance;
mod item;
mod solution;

#[doc(inline)]
pub use bin::Bin;

#[doc(inline)]
pub use instance::CCBPInstance;

#[doc(inline)]
pub use item::Item;

#[doc(inline)]
pub use solution::CCBPSolution;
