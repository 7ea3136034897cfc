//! `review-sentiment` library crate.
//!
//! The binary (`sentiment`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes
//! - reader, enrichment and writer stages can be driven independently

pub mod app;
pub mod cli;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod io;
pub mod lookup;
pub mod report;
