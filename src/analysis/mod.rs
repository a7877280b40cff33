//! Analysis modules.
//!
//! `aggregator` holds the pure statistics over record slices and
//! `analyzer` wraps a loaded dataset with the query surface.

pub mod aggregator;
pub mod analyzer;

pub use aggregator::*;
pub use analyzer::Analyzer;
