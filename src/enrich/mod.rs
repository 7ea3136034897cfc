//! Concurrent review enrichment.
//!
//! Responsibilities:
//!
//! - run a fixed pool of workers over the shared input (fan-out)
//! - publish enriched reviews onto one bounded channel (fan-in)
//! - close the channel exactly once, after the last worker returns

pub mod pool;

pub use pool::*;
