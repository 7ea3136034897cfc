//! Static rating → sentiment lookup.
//!
//! The table is a process-wide constant, so workers share it without locking.

pub mod table;

pub use table::*;
