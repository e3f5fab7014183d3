//! CSV report formatter

use super::{Report, ReportFormatter};
use crate::ListingError;

impl ReportFormatter for super::CsvFormatter {
    fn format(&self, report: &Report) -> Result<String, ListingError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        match report {
            Report::Classification(report) => {
                writer
                    .write_record(["kind", "name", "count", "percentage"])
                    .map_err(csv_error)?;

                for (extension, count, percentage) in report.extension_rows() {
                    writer
                        .write_record([
                            "extension",
                            extension.name(),
                            count.to_string().as_str(),
                            format!("{:.6}", percentage).as_str(),
                        ])
                        .map_err(csv_error)?;
                }

                for (mnemonic, count) in report.unmatched_by_frequency() {
                    writer
                        .write_record(["unmatched", mnemonic, count.to_string().as_str(), ""])
                        .map_err(csv_error)?;
                }
            }
            Report::Frequency(report) => {
                writer.write_record(["mnemonic", "count"]).map_err(csv_error)?;
                for (mnemonic, count) in report.sorted(self.order) {
                    writer
                        .write_record([mnemonic, count.to_string().as_str()])
                        .map_err(csv_error)?;
                }
            }
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ListingError::Serialization(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| ListingError::Serialization(format!("CSV encoding error: {}", e)))
    }
}

fn csv_error(e: csv::Error) -> ListingError {
    ListingError::Serialization(format!("CSV serialization error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::super::{Report, ReportFormat};
    use crate::classify::{self, frequency::{self, WidthFilter}};
    use crate::tables::ExtensionTable;
    use crate::tokenizer::LineTokenizer;

    #[test]
    fn test_csv_classification_rows() {
        let lines = vec![
            "  10:\t00b50533          \tadd\ta0,a0,a1".to_string(),
            "  18:\t0d0075d7          \tvsetvli\ta1,zero,e8,m8,ta,ma".to_string(),
        ];
        let report = classify::run(&lines, &LineTokenizer::new(), ExtensionTable::builtin());
        let formatter = ReportFormat::Csv.get_formatter(None);

        let result = formatter.format(&Report::Classification(report)).unwrap();
        let mut lines = result.lines();

        assert_eq!(lines.next(), Some("kind,name,count,percentage"));
        assert_eq!(lines.next(), Some("extension,I,1,50.000000"));
        // Header + six extensions + one unmatched row
        assert_eq!(result.lines().count(), 8);
        assert!(result.lines().last().unwrap().starts_with("unmatched,vsetvli,1"));
    }

    #[test]
    fn test_csv_frequency_rows() {
        let lines = vec![
            "  10:\t00b50533          \tadd\ta0,a0,a1".to_string(),
            "  14:\t00b50533          \tadd\ta0,a0,a1".to_string(),
        ];
        let report = frequency::run(&lines, &LineTokenizer::new(), WidthFilter::Any);
        let formatter = ReportFormat::Csv.get_formatter(None);

        let result = formatter.format(&Report::Frequency(report)).unwrap();
        assert_eq!(result, "mnemonic,count\nadd,2\n");
    }
}
