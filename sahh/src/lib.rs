use std::sync::LazyLock;
use std::time::Instant;

pub mod config;
pub mod hh;
pub mod io;
pub mod report;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);
