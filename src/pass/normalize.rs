//! Width-aware pseudo-instruction normalization pass

use rayon::prelude::*;

use super::splice;
use crate::tables::PseudoTable;
use crate::{EncodingWidth, Tokenize, COMPRESSED_PREFIX};

/// Rewrite one line's pseudo-mnemonic into its canonical form.
///
/// A 4-byte (8 hex digit) encoding takes the canonical mnemonic unprefixed;
/// a 2-byte (4 hex digit) encoding takes it with the compressed-form marker.
/// Any other encoding width, any unrecognized line shape, and any mnemonic
/// the table does not know all pass through unchanged.
pub fn rewrite_line(line: &str, tokenizer: &dyn Tokenize, table: &PseudoTable) -> String {
    if let Some(inst) = tokenizer.tokenize(line) {
        if let Some(canonical) = table.canonical(inst.mnemonic) {
            let replacement = match inst.encoding_width() {
                EncodingWidth::Normal => canonical.to_string(),
                EncodingWidth::Narrow => format!("{}{}", COMPRESSED_PREFIX, canonical),
                // No rewrite rule exists for other widths
                EncodingWidth::Other => return line.to_string(),
            };
            return splice(line, inst.mnemonic_span, &replacement);
        }
    }
    line.to_string()
}

/// Normalize a whole listing, one independent line at a time.
pub fn run(lines: &[String], tokenizer: &dyn Tokenize, table: &PseudoTable) -> Vec<String> {
    log::debug!("Normalizing {} listing lines", lines.len());

    let out: Vec<String> = lines
        .par_iter()
        .map(|line| rewrite_line(line, tokenizer, table))
        .collect();

    log::debug!(
        "Normalization complete: {} lines rewritten",
        out.iter().zip(lines).filter(|(a, b)| *a != *b).count()
    );

    out
}
