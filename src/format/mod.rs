//! Report rendering module implementation

mod json;
mod csv;

pub use self::json::*;
pub use self::csv::*;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::classify::frequency::{FrequencyReport, SortOrder};
use crate::classify::ClassificationReport;
use crate::ListingError;

/// Supported output formats for analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Plain text tables (default)
    Text,
    /// JSON format (hierarchical)
    Json,
    /// CSV format (comma-separated values)
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

impl ReportFormat {
    /// Get all available report formats
    pub fn available_formats() -> &'static [Self] {
        &[ReportFormat::Text, ReportFormat::Json, ReportFormat::Csv]
    }

    /// Get a formatter for this report format.
    ///
    /// `sort` selects the row order of frequency reports; classification
    /// rows always render in extension priority order with unmatched
    /// mnemonics by descending count.
    pub fn get_formatter(&self, sort: Option<SortOrder>) -> Box<dyn ReportFormatter> {
        let order = sort.unwrap_or(SortOrder::CountDescending);
        match self {
            ReportFormat::Text => Box::new(TextFormatter { order }),
            ReportFormat::Json => Box::new(JsonFormatter { order }),
            ReportFormat::Csv => Box::new(CsvFormatter { order }),
        }
    }
}

/// Unified analysis output handed to formatters.
#[derive(Debug, Clone)]
pub enum Report {
    /// Extension-bucket classification
    Classification(ClassificationReport),
    /// Raw mnemonic frequency
    Frequency(FrequencyReport),
}

/// Formatter trait for report output
pub trait ReportFormatter {
    /// Format an analysis report
    fn format(&self, report: &Report) -> Result<String, ListingError>;
}

/// Format reports as plain text tables
pub struct TextFormatter {
    pub(crate) order: SortOrder,
}

/// Format reports as JSON
pub struct JsonFormatter {
    pub(crate) order: SortOrder,
}

/// Format reports as CSV
pub struct CsvFormatter {
    pub(crate) order: SortOrder,
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String, ListingError> {
        let mut output = String::new();

        match report {
            Report::Classification(report) => {
                output.push_str("Instruction Extension Proportions:\n");
                for (extension, count, percentage) in report.extension_rows() {
                    output.push_str(&format!(
                        "{} Extension: {:.6}% ({} instructions)\n",
                        extension, percentage, count
                    ));
                }
                output.push_str(&format!(
                    "Unmatched: {:.6}% ({} instructions)\n",
                    report.unmatched_percentage(),
                    report.unmatched_total()
                ));

                let unmatched = report.unmatched_by_frequency();
                if !unmatched.is_empty() {
                    output.push_str("\nUnmatched Instructions Summary:\n");
                    for (mnemonic, count) in unmatched {
                        output.push_str(&format!("{}: appeared {} times\n", mnemonic, count));
                    }
                }

                output.push_str(&format!("\nTotal matched: {}\n", report.total_matched()));
            }
            Report::Frequency(report) => {
                output.push_str(&format!("{:<30} {:<10}\n", "Instruction", "Count"));
                output.push_str(&format!("{}\n", "-".repeat(40)));

                for (mnemonic, count) in report.sorted(self.order) {
                    output.push_str(&format!("{:<30} {:<10}\n", mnemonic, count));
                }

                output.push_str(&format!("{}\n", "-".repeat(40)));
                output.push_str(&format!("{:<30} {:<10}\n", "Total", report.total()));
            }
        }

        Ok(output)
    }
}
