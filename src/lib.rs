//! datasummary - summarize flat JSON record sets.
//!
//! Load a JSON array of flat objects into a [`Dataset`], wrap it in an
//! [`Analyzer`] and query it:
//!
//! ```
//! use datasummary::Analyzer;
//!
//! let analyzer = Analyzer::from_json(
//!     r#"[{"name": "Alice", "role": "engineer", "age": 32, "city": "New York"}]"#,
//! );
//! assert_eq!(analyzer.record_count(), 1);
//! assert_eq!(analyzer.filter_by_city("new york").len(), 1);
//! println!("{}", analyzer.summarize());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod loader;
pub mod models;
pub mod report;

pub use analysis::{Analyzer, Distribution};
pub use loader::{load, parse_records, LoadError};
pub use models::{Dataset, FieldValue, Record, Summary};
