//! Report generation.
//!
//! Renders a [`Summary`](crate::models::Summary) as the plain-text
//! summary or as a JSON document.

pub mod generator;

pub use generator::*;
