//! The query surface over a loaded dataset.

use super::aggregator::{average, distribution, filter_eq_ignore_case, Distribution};
use crate::config::{FieldNames, SummaryOptions};
use crate::loader;
use crate::models::{Dataset, FieldValue, Highlight, Record, Summary, MISSING_CATEGORY};
use crate::report;
use tracing::debug;

/// Read-only analyzer that owns one dataset.
///
/// Every query is recomputed from the stored records; nothing is cached
/// and nothing is mutated, so repeated calls return identical results.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    dataset: Dataset,
    fields: FieldNames,
}

impl Analyzer {
    /// Wrap a dataset using the conventional field names.
    pub fn new(dataset: Dataset) -> Self {
        Self::with_fields(dataset, FieldNames::default())
    }

    /// Wrap a dataset, reading the given field names.
    pub fn with_fields(dataset: Dataset, fields: FieldNames) -> Self {
        debug!("Analyzer over {} records ({:?})", dataset.len(), fields);
        Self { dataset, fields }
    }

    /// Load `raw` JSON with the soft-fail policy and wrap the result.
    pub fn from_json(raw: &str) -> Self {
        Self::new(loader::load(raw))
    }

    /// The underlying dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Number of records.
    pub fn record_count(&self) -> usize {
        self.dataset.len()
    }

    /// Mean age across all records, treating a missing age as 0.
    pub fn average_age(&self) -> f64 {
        average(self.dataset.records(), &self.fields.age)
    }

    /// Number of records per role, with missing roles under `"N/A"`.
    pub fn role_distribution(&self) -> Distribution {
        distribution(self.dataset.records(), &self.fields.role)
    }

    /// Records located in `city_name`, compared case-insensitively.
    pub fn filter_by_city(&self, city_name: &str) -> Vec<&Record> {
        filter_eq_ignore_case(self.dataset.records(), &self.fields.city, city_name)
    }

    /// Names of records in `city` whose role is exactly `role`.
    pub fn highlighted_names(&self, city: &str, role: &str) -> Vec<String> {
        self.filter_by_city(city)
            .into_iter()
            .filter(|r| r.get(&self.fields.role).and_then(FieldValue::as_str) == Some(role))
            .map(|r| r.text_or(&self.fields.name, MISSING_CATEGORY).to_string())
            .collect()
    }

    /// Collect every statistic the report shows.
    pub fn summary(&self, options: &SummaryOptions) -> Summary {
        Summary {
            total_records: self.record_count(),
            average_age: self.average_age(),
            role_distribution: self.role_distribution().to_counts(),
            highlight: Highlight {
                city: options.highlight_city.clone(),
                role: options.highlight_role.clone(),
                names: self.highlighted_names(&options.highlight_city, &options.highlight_role),
            },
        }
    }

    /// Render the default text summary (engineers in New York).
    pub fn summarize(&self) -> String {
        report::generate_text_report(&self.summary(&SummaryOptions::default()))
    }
}
