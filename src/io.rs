//! Listing file I/O plumbing.
//!
//! The analysis passes never touch the filesystem themselves; these helpers
//! are the one place a listing enters or leaves the process. A missing or
//! unreadable input and an unwritable output are fatal for the run.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::ListingError;

/// Read a disassembly listing into lines, stripping line terminators.
pub fn read_listing<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ListingError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        // BufRead::lines strips '\n' but leaves a CR from CRLF input
        lines.push(line.trim_end_matches('\r').to_string());
    }

    log::debug!("Read {} lines from {}", lines.len(), path.as_ref().display());
    Ok(lines)
}

/// Write listing lines to a file, one per line.
pub fn write_listing<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<(), ListingError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;

    log::debug!("Wrote {} lines to {}", lines.len(), path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.asm");

        let lines: Vec<String> = vec![
            "0000000000010400 <main>:".into(),
            "  10:\t00008067          \tret".into(),
            "".into(),
            "  14:\t4505              \tli\ta0,1".into(),
        ];

        write_listing(&path, &lines).unwrap();
        let read_back = read_listing(&path).unwrap();
        assert_eq!(read_back, lines);
    }

    #[test]
    fn test_crlf_input_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.asm");
        std::fs::write(&path, "  10:\t00008067          \tret\r\n").unwrap();

        let lines = read_listing(&path).unwrap();
        assert_eq!(lines, vec!["  10:\t00008067          \tret".to_string()]);
    }

    #[test]
    fn test_missing_input_fails_loudly() {
        let result = read_listing("/nonexistent/listing.asm");
        assert!(matches!(result, Err(ListingError::IoError(_))));
    }
}
