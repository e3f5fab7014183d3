//! Extension-bucket classification over a whole listing

use std::collections::HashMap;

use serde::Serialize;

use crate::tables::ExtensionTable;
use crate::{Extension, Tokenize};

pub mod frequency;

/// Decimal places kept on reported percentages.
const PERCENT_DECIMALS: i32 = 6;

pub(crate) fn round_percentage(value: f64) -> f64 {
    let scale = 10f64.powi(PERCENT_DECIMALS);
    (value * scale).round() / scale
}

/// Aggregated classification result for one listing.
///
/// Conservation invariant: the extension counts plus the unmatched counts
/// always sum to `total_matched`, the number of lines the tokenizer
/// recognized. Lines the tokenizer rejects are skipped entirely and appear
/// in neither side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassificationReport {
    counts: HashMap<Extension, u64>,
    unmatched: HashMap<String, u64>,
    total_matched: u64,
}

impl ClassificationReport {
    /// Number of tokenizer-matched instruction lines.
    pub fn total_matched(&self) -> u64 {
        self.total_matched
    }

    /// Count of instructions classified into one extension.
    pub fn count(&self, extension: Extension) -> u64 {
        self.counts.get(&extension).copied().unwrap_or(0)
    }

    /// Sum of all extension counts (excludes unmatched).
    pub fn classified_total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Sum of all unmatched-mnemonic counts.
    pub fn unmatched_total(&self) -> u64 {
        self.unmatched.values().sum()
    }

    /// Share of one extension over all matched instructions, in percent.
    /// Zero when the listing had no matched instructions at all.
    pub fn percentage(&self, extension: Extension) -> f64 {
        if self.total_matched == 0 {
            return 0.0;
        }
        round_percentage(self.count(extension) as f64 / self.total_matched as f64 * 100.0)
    }

    /// Share of unmatched mnemonics over all matched instructions, in
    /// percent. Together with the extension percentages this sums to ~100.
    pub fn unmatched_percentage(&self) -> f64 {
        if self.total_matched == 0 {
            return 0.0;
        }
        round_percentage(self.unmatched_total() as f64 / self.total_matched as f64 * 100.0)
    }

    /// Raw unmatched-mnemonic counts.
    pub fn unmatched(&self) -> &HashMap<String, u64> {
        &self.unmatched
    }

    /// Unmatched mnemonics sorted by descending frequency, alphabetical on
    /// ties, for reporting.
    pub fn unmatched_by_frequency(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .unmatched
            .iter()
            .map(|(mnemonic, count)| (mnemonic.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// (extension, count, percentage) rows in priority order, for reporting.
    pub fn extension_rows(&self) -> Vec<(Extension, u64, f64)> {
        Extension::ALL
            .iter()
            .map(|&ext| (ext, self.count(ext), self.percentage(ext)))
            .collect()
    }
}

/// Classify every tokenizer-matched line of `lines` into extension buckets.
///
/// Each mnemonic goes to the first extension set containing it, in
/// `Extension::ALL` priority order; mnemonics in no set accumulate in the
/// unmatched mapping, never silently dropped.
pub fn run(lines: &[String], tokenizer: &dyn Tokenize, table: &ExtensionTable) -> ClassificationReport {
    let mut report = ClassificationReport::default();

    for line in lines {
        if let Some(inst) = tokenizer.tokenize(line) {
            report.total_matched += 1;
            match table.classify(inst.mnemonic) {
                Some(ext) => *report.counts.entry(ext).or_insert(0) += 1,
                None => *report.unmatched.entry(inst.mnemonic.to_string()).or_insert(0) += 1,
            }
        }
    }

    log::debug!(
        "Classified {} instructions ({} unmatched mnemonics)",
        report.total_matched,
        report.unmatched.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::LineTokenizer;

    fn listing(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn classify(lines: &[&str]) -> ClassificationReport {
        run(&listing(lines), &LineTokenizer::new(), ExtensionTable::builtin())
    }

    #[test]
    fn test_extension_bucketing() {
        let report = classify(&[
            "  10:\t00b50533          \tadd\ta0,a0,a1",
            "  14:\t02c58533          \tmul\ta0,a1,a2",
            "  18:\t4505              \tc.li\ta0,1",
            "  1c:\t0005a507          \tflw\tfa0,0(a1)",
            "  20:\t0d0075d7          \tvsetvli\ta1,zero,e8,m8,ta,ma",
        ]);

        assert_eq!(report.count(Extension::I), 1);
        assert_eq!(report.count(Extension::M), 1);
        assert_eq!(report.count(Extension::C), 1);
        assert_eq!(report.count(Extension::Fd), 1);
        assert_eq!(report.count(Extension::A), 0);
        assert_eq!(report.count(Extension::V), 0);
        assert_eq!(report.unmatched().get("vsetvli"), Some(&1));
        assert_eq!(report.total_matched(), 5);
    }

    #[test]
    fn test_conservation_invariant() {
        let report = classify(&[
            "0000000000010400 <main>:",
            "  10:\t00b50533          \tadd\ta0,a0,a1",
            "  14:\t0d0075d7          \tvsetvli\ta1,zero,e8,m8,ta,ma",
            "  18:\t0d0075d7          \tvsetvli\ta1,zero,e8,m8,ta,ma",
            "not an instruction line",
        ]);
        assert_eq!(
            report.classified_total() + report.unmatched_total(),
            report.total_matched()
        );
        assert_eq!(report.total_matched(), 3);
    }

    #[test]
    fn test_empty_listing_yields_zero_percentages() {
        let report = classify(&[]);
        assert_eq!(report.total_matched(), 0);
        for ext in Extension::ALL {
            assert_eq!(report.count(ext), 0);
            assert_eq!(report.percentage(ext), 0.0);
        }
        assert!(report.unmatched().is_empty());
        assert_eq!(report.unmatched_percentage(), 0.0);
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let report = classify(&[
            "  10:\t00b50533          \tadd\ta0,a0,a1",
            "  14:\t02c58533          \tmul\ta0,a1,a2",
            "  18:\t0d0075d7          \tvsetvli\ta1,zero,e8,m8,ta,ma",
        ]);
        let sum: f64 = Extension::ALL.iter().map(|&e| report.percentage(e)).sum::<f64>()
            + report.unmatched_percentage();
        assert!((sum - 100.0).abs() < 1e-4, "percentages sum to {}", sum);
        for ext in Extension::ALL {
            let p = report.percentage(ext);
            assert!((0.0..=100.0).contains(&p));
        }
    }

    #[test]
    fn test_unmatched_sorted_by_descending_frequency() {
        let report = classify(&[
            "  10:\t0d0075d7          \tvsetvli\ta1,zero,e8,m8,ta,ma",
            "  14:\t0205f507          \tvle8.v\tv10,(a1)",
            "  18:\t0d0075d7          \tvsetvli\ta0,zero,e8,m8,ta,ma",
            "  1c:\t0205e527          \tvse8.v\tv10,(a1)",
        ]);
        let unmatched = report.unmatched_by_frequency();
        assert_eq!(unmatched[0], ("vsetvli", 2));
        // Alphabetical tie-break among the single-count entries
        assert_eq!(unmatched[1], ("vle8.v", 1));
        assert_eq!(unmatched[2], ("vse8.v", 1));
    }

    #[test]
    fn test_rounding_precision() {
        // 1/3 of the listing per mnemonic: 33.333333% after rounding
        let report = classify(&[
            "  10:\t00b50533          \tadd\ta0,a0,a1",
            "  14:\t02c58533          \tmul\ta0,a1,a2",
            "  18:\t40b50533          \tsub\ta0,a0,a1",
        ]);
        assert_eq!(report.percentage(Extension::M), 33.333333);
        assert_eq!(report.percentage(Extension::I), 66.666667);
    }
}
