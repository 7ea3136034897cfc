//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input/output records (`RawReview`, `Review`) and the sentiment `Label`
//! - run configuration (`RunConfig`, `DispatchMode`, `ErrorPolicy`)

pub mod types;

pub use types::*;
