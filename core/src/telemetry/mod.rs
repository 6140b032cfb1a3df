//! telemetry/mod.rs
//! Encoder statistics.
//!
//! Counts are plain values owned by the session; `Commands::stats()` hands
//! out a snapshot clone.

pub mod stats;

pub use stats::*;
