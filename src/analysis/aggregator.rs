//! Record aggregation and statistics.
//!
//! Free functions over a slice of records. Each one is a pure
//! computation; the [`Analyzer`](super::Analyzer) composes them.

use crate::models::{FieldValue, Record};
use indexmap::IndexMap;
use serde::Serialize;

/// Frequency count of a categorical field, keyed by raw value.
///
/// Iteration follows the order in which each value was first seen.
/// Keys are compared exactly, so `"Engineer"` and `"engineer"` are
/// counted separately, as are `1` and `"1"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    counts: IndexMap<FieldValue, usize>,
}

/// One rendered entry of a [`Distribution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

impl Distribution {
    /// Count for a string value, if it was observed.
    pub fn get(&self, value: &str) -> Option<usize> {
        self.get_value(&FieldValue::String(value.to_string()))
    }

    /// Count for any raw value, if it was observed.
    pub fn get_value(&self, value: &FieldValue) -> Option<usize> {
        self.counts.get(value).copied()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(value, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldValue, usize)> {
        self.counts.iter().map(|(value, &count)| (value, count))
    }

    /// Entries with display text for rendering, in first-seen order.
    pub fn to_counts(&self) -> Vec<CategoryCount> {
        self.iter()
            .map(|(value, count)| CategoryCount {
                value: value.to_string(),
                count,
            })
            .collect()
    }
}

impl FromIterator<FieldValue> for Distribution {
    fn from_iter<I: IntoIterator<Item = FieldValue>>(iter: I) -> Self {
        let mut counts: IndexMap<FieldValue, usize> = IndexMap::new();
        for value in iter {
            *counts.entry(value).or_default() += 1;
        }
        Self { counts }
    }
}

/// Arithmetic mean of a numeric field; absent values count as 0.
///
/// Returns exactly 0.0 for an empty slice.
pub fn average(records: &[Record], field: &str) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let total: f64 = records.iter().map(|r| r.number_or(field, 0.0)).sum();
    total / records.len() as f64
}

/// Frequency count of a categorical field; absent values count as `"N/A"`.
pub fn distribution(records: &[Record], field: &str) -> Distribution {
    records.iter().map(|r| r.category(field)).collect()
}

/// Records whose string `field` equals `value` ignoring case.
///
/// Records without the field (or with a non-string value) never match a
/// non-empty query.
pub fn filter_eq_ignore_case<'a>(
    records: &'a [Record],
    field: &str,
    value: &str,
) -> Vec<&'a Record> {
    let wanted = value.to_lowercase();

    records
        .iter()
        .filter(|r| r.text_or(field, "").to_lowercase() == wanted)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MISSING_CATEGORY;

    fn create_test_record(role: Option<&str>, age: Option<i64>, city: Option<&str>) -> Record {
        let mut fields = Vec::new();
        if let Some(role) = role {
            fields.push(("role", FieldValue::String(role.to_string())));
        }
        if let Some(age) = age {
            fields.push(("age", FieldValue::Integer(age)));
        }
        if let Some(city) = city {
            fields.push(("city", FieldValue::String(city.to_string())));
        }
        fields.into_iter().collect()
    }

    #[test]
    fn test_average_empty() {
        assert_eq!(average(&[], "age"), 0.0);
    }

    #[test]
    fn test_average_missing_counts_as_zero() {
        let records = vec![
            create_test_record(None, Some(30), None),
            create_test_record(None, None, None),
            create_test_record(None, Some(60), None),
        ];
        assert_eq!(average(&records, "age"), 30.0);
    }

    #[test]
    fn test_distribution_counts_and_order() {
        let records = vec![
            create_test_record(Some("designer"), None, None),
            create_test_record(Some("engineer"), None, None),
            create_test_record(Some("designer"), None, None),
            create_test_record(None, None, None),
        ];

        let dist = distribution(&records, "role");
        let entries: Vec<(String, usize)> = dist
            .to_counts()
            .into_iter()
            .map(|e| (e.value, e.count))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("designer".to_string(), 2),
                ("engineer".to_string(), 1),
                (MISSING_CATEGORY.to_string(), 1)
            ]
        );
        assert_eq!(dist.total(), records.len());
        assert_eq!(dist.get("engineer"), Some(1));
        assert_eq!(dist.get("manager"), None);
    }

    #[test]
    fn test_distribution_is_case_sensitive() {
        let records = vec![
            create_test_record(Some("Engineer"), None, None),
            create_test_record(Some("engineer"), None, None),
        ];

        let dist = distribution(&records, "role");
        assert_eq!(dist.len(), 2);
        assert_eq!(dist.get("Engineer"), Some(1));
        assert_eq!(dist.get("engineer"), Some(1));
    }

    #[test]
    fn test_distribution_empty() {
        let dist = distribution(&[], "role");
        assert!(dist.is_empty());
        assert_eq!(dist.total(), 0);
        assert!(dist.to_counts().is_empty());
    }

    #[test]
    fn test_distribution_keys_by_raw_value() {
        let records: Vec<Record> = [
            FieldValue::Integer(1),
            FieldValue::String("1".to_string()),
            FieldValue::Bool(true),
            FieldValue::String("true".to_string()),
            FieldValue::Null,
        ]
        .into_iter()
        .map(|role| [("role", role)].into_iter().collect::<Record>())
        .collect();

        let dist = distribution(&records, "role");
        assert_eq!(dist.len(), 5);
        assert!(dist.iter().all(|(_, count)| count == 1));
        assert_eq!(dist.get_value(&FieldValue::Integer(1)), Some(1));
        assert_eq!(dist.get("1"), Some(1));
        assert_eq!(dist.get_value(&FieldValue::Null), Some(1));
        assert_eq!(dist.get(MISSING_CATEGORY), None);
        assert_eq!(dist.total(), records.len());
    }

    #[test]
    fn test_filter_ignores_case() {
        let records = vec![
            create_test_record(None, None, Some("New York")),
            create_test_record(None, None, Some("london")),
            create_test_record(None, None, None),
            create_test_record(None, None, Some("NEW YORK")),
        ];

        let matched = filter_eq_ignore_case(&records, "city", "new york");
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].text_or("city", ""), "New York");
        assert_eq!(matched[1].text_or("city", ""), "NEW YORK");

        assert!(filter_eq_ignore_case(&records, "city", "Paris").is_empty());
    }
}
