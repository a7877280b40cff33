//! Text and JSON report generation.

use crate::models::{Highlight, Record, Report, Summary};
use anyhow::Result;
use std::path::Path;

/// Generate the plain-text summary report.
pub fn generate_text_report(summary: &Summary) -> String {
    let mut output = String::new();

    output.push_str("--- Data Analysis Summary ---\n");
    output.push_str(&format!("Total Records: {}\n", summary.total_records));
    output.push_str(&format!("Average Age: {:.2}\n", summary.average_age));

    output.push_str(&generate_distribution_section(summary));
    output.push_str(&generate_highlight_section(&summary.highlight));

    output.push_str("---------------------------\n");

    output
}

/// Generate the role distribution block.
fn generate_distribution_section(summary: &Summary) -> String {
    let mut section = String::new();

    section.push_str("\nRole Distribution:\n");
    for entry in &summary.role_distribution {
        section.push_str(&format!("  - {}: {}\n", capitalize(&entry.value), entry.count));
    }

    section
}

/// Generate the called-out subset, e.g. "Engineers in New York".
fn generate_highlight_section(highlight: &Highlight) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "\n{}s in {}:\n",
        capitalize(&highlight.role),
        highlight.city
    ));
    section.push_str(&format!("  - {}\n", highlight.names.join(", ")));

    section
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Render a list of records as a pretty JSON array.
pub fn generate_records_json(records: &[&Record]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(Into::into)
}

/// Write rendered output to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}
