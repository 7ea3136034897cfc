//! Input/output helpers.
//!
//! - CSV ingest (`ingest`)
//! - enriched CSV export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
