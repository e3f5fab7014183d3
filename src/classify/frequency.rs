//! Raw mnemonic frequency counting
//!
//! The simpler companion to extension classification: counts how often each
//! mnemonic appears, optionally restricted to one encoding width, with no
//! dependency on the pseudo or extension tables.

use std::collections::HashMap;
use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use crate::{EncodingWidth, Tokenize};

/// Optional encoding-width restriction for frequency counting.
#[derive(Copy, Clone, ValueEnum, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthFilter {
    /// Count every tokenized instruction
    Any,
    /// Only 4-hex-digit (2-byte) encodings
    Narrow,
    /// Only 8-hex-digit (4-byte) encodings
    Normal,
}

impl WidthFilter {
    /// Whether an encoding width passes this filter.
    pub fn admits(&self, width: EncodingWidth) -> bool {
        match self {
            WidthFilter::Any => true,
            WidthFilter::Narrow => width == EncodingWidth::Narrow,
            WidthFilter::Normal => width == EncodingWidth::Normal,
        }
    }
}

impl fmt::Display for WidthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidthFilter::Any => write!(f, "any"),
            WidthFilter::Narrow => write!(f, "narrow"),
            WidthFilter::Normal => write!(f, "normal"),
        }
    }
}

/// Sort order for frequency report rows.
#[derive(Copy, Clone, ValueEnum, Debug, PartialEq, Eq)]
pub enum SortOrder {
    /// Descending count, alphabetical on ties
    CountDescending,
    /// Alphabetical by mnemonic
    Alphabetical,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::CountDescending => write!(f, "count"),
            SortOrder::Alphabetical => write!(f, "alphabetical"),
        }
    }
}

/// Mnemonic frequency over one listing.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyReport {
    counts: HashMap<String, u64>,
    filter: WidthFilter,
}

impl FrequencyReport {
    /// The width restriction this report was gathered under.
    pub fn filter(&self) -> WidthFilter {
        self.filter
    }

    /// Total instructions counted.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct mnemonics seen.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// Count for one mnemonic.
    pub fn count(&self, mnemonic: &str) -> u64 {
        self.counts.get(mnemonic).copied().unwrap_or(0)
    }

    /// Report rows in the requested order.
    pub fn sorted(&self, order: SortOrder) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(mnemonic, count)| (mnemonic.as_str(), *count))
            .collect();
        match order {
            SortOrder::CountDescending => {
                entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)))
            }
            SortOrder::Alphabetical => entries.sort_by(|a, b| a.0.cmp(b.0)),
        }
        entries
    }
}

/// Count mnemonic frequency across `lines`, honoring the width filter.
pub fn run(lines: &[String], tokenizer: &dyn Tokenize, filter: WidthFilter) -> FrequencyReport {
    let mut counts: HashMap<String, u64> = HashMap::new();

    for line in lines {
        if let Some(inst) = tokenizer.tokenize(line) {
            if filter.admits(inst.encoding_width()) {
                *counts.entry(inst.mnemonic.to_string()).or_insert(0) += 1;
            }
        }
    }

    log::debug!(
        "Counted {} mnemonics ({} filter)",
        counts.len(),
        filter
    );

    FrequencyReport { counts, filter }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::LineTokenizer;

    fn count(lines: &[&str], filter: WidthFilter) -> FrequencyReport {
        let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        run(&lines, &LineTokenizer::new(), filter)
    }

    const LISTING: &[&str] = &[
        "  10:\t00b50533          \tadd\ta0,a0,a1",
        "  14:\t952e              \tadd\ta0,a1",
        "  18:\t02c58533          \tmul\ta0,a1,a2",
        "  1c:\t4505              \tli\ta0,1",
        "  20:\t00b50533          \tadd\ta0,a0,a1",
        "0000000000010400 <main>:",
    ];

    #[test]
    fn test_counts_all_widths_by_default() {
        let report = count(LISTING, WidthFilter::Any);
        assert_eq!(report.count("add"), 3);
        assert_eq!(report.count("mul"), 1);
        assert_eq!(report.count("li"), 1);
        assert_eq!(report.total(), 5);
        assert_eq!(report.unique(), 3);
    }

    #[test]
    fn test_width_filters() {
        let narrow = count(LISTING, WidthFilter::Narrow);
        assert_eq!(narrow.count("add"), 1);
        assert_eq!(narrow.count("li"), 1);
        assert_eq!(narrow.count("mul"), 0);
        assert_eq!(narrow.total(), 2);

        let normal = count(LISTING, WidthFilter::Normal);
        assert_eq!(normal.count("add"), 2);
        assert_eq!(normal.count("mul"), 1);
        assert_eq!(normal.total(), 3);
    }

    #[test]
    fn test_sort_by_descending_count_with_alpha_ties() {
        let report = count(LISTING, WidthFilter::Any);
        let rows = report.sorted(SortOrder::CountDescending);
        assert_eq!(rows[0], ("add", 3));
        assert_eq!(rows[1], ("li", 1));
        assert_eq!(rows[2], ("mul", 1));
    }

    #[test]
    fn test_sort_alphabetical() {
        let report = count(LISTING, WidthFilter::Any);
        let rows = report.sorted(SortOrder::Alphabetical);
        assert_eq!(rows[0].0, "add");
        assert_eq!(rows[1].0, "li");
        assert_eq!(rows[2].0, "mul");
    }

    #[test]
    fn test_empty_listing() {
        let report = count(&[], WidthFilter::Any);
        assert_eq!(report.total(), 0);
        assert_eq!(report.unique(), 0);
        assert!(report.sorted(SortOrder::Alphabetical).is_empty());
    }
}
