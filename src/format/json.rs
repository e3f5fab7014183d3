//! JSON report formatter

use serde::{Deserialize, Serialize};

use super::{Report, ReportFormatter};
use crate::ListingError;

/// Serializable extension row for JSON output
#[derive(Serialize, Deserialize)]
struct ExtensionRowJson {
    /// Extension name ("I", "M", "A", "F/D", "C", "V")
    extension: String,
    /// Instructions classified into this extension
    count: u64,
    /// Share of all matched instructions
    percentage: f64,
}

/// Serializable unmatched-mnemonic row for JSON output
#[derive(Serialize, Deserialize)]
struct UnmatchedRowJson {
    mnemonic: String,
    count: u64,
}

/// Serializable classification report for JSON output
#[derive(Serialize, Deserialize)]
struct ClassificationJson {
    total_matched: u64,
    extensions: Vec<ExtensionRowJson>,
    unmatched_percentage: f64,
    unmatched: Vec<UnmatchedRowJson>,
}

/// Serializable frequency report for JSON output
#[derive(Serialize, Deserialize)]
struct FrequencyJson {
    width_filter: String,
    total: u64,
    unique: usize,
    mnemonics: Vec<UnmatchedRowJson>,
}

impl ReportFormatter for super::JsonFormatter {
    fn format(&self, report: &Report) -> Result<String, ListingError> {
        let value = match report {
            Report::Classification(report) => {
                let extensions = report
                    .extension_rows()
                    .into_iter()
                    .map(|(extension, count, percentage)| ExtensionRowJson {
                        extension: extension.to_string(),
                        count,
                        percentage,
                    })
                    .collect();

                let unmatched = report
                    .unmatched_by_frequency()
                    .into_iter()
                    .map(|(mnemonic, count)| UnmatchedRowJson {
                        mnemonic: mnemonic.to_string(),
                        count,
                    })
                    .collect();

                serde_json::to_string_pretty(&ClassificationJson {
                    total_matched: report.total_matched(),
                    extensions,
                    unmatched_percentage: report.unmatched_percentage(),
                    unmatched,
                })
            }
            Report::Frequency(report) => {
                let mnemonics = report
                    .sorted(self.order)
                    .into_iter()
                    .map(|(mnemonic, count)| UnmatchedRowJson {
                        mnemonic: mnemonic.to_string(),
                        count,
                    })
                    .collect();

                serde_json::to_string_pretty(&FrequencyJson {
                    width_filter: report.filter().to_string(),
                    total: report.total(),
                    unique: report.unique(),
                    mnemonics,
                })
            }
        };

        value.map_err(|e| ListingError::Serialization(format!("JSON serialization error: {}", e)))
    }
}
