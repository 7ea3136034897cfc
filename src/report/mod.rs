//! Reporting utilities: run summary and rule listing.

pub mod format;

pub use format::*;
