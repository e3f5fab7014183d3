//! Idempotent compressed-form tagging pass
//!
//! Runs after normalization as a safety net: any narrow-encoding mnemonic
//! the pseudo table did not cover still gets the compressed-form marker.

use rayon::prelude::*;

use super::splice;
use crate::{EncodingWidth, Tokenize, COMPRESSED_PREFIX};

/// Tag one line's mnemonic with the compressed-form marker if its encoding
/// is exactly 4 hex digits and the marker is not already present.
pub fn rewrite_line(line: &str, tokenizer: &dyn Tokenize) -> String {
    if let Some(inst) = tokenizer.tokenize(line) {
        if inst.encoding_width() == EncodingWidth::Narrow && !inst.is_compressed_form() {
            let tagged = format!("{}{}", COMPRESSED_PREFIX, inst.mnemonic);
            return splice(line, inst.mnemonic_span, &tagged);
        }
    }
    line.to_string()
}

/// Tag a whole listing, one independent line at a time.
pub fn run(lines: &[String], tokenizer: &dyn Tokenize) -> Vec<String> {
    log::debug!("Tagging narrow encodings across {} listing lines", lines.len());

    lines
        .par_iter()
        .map(|line| rewrite_line(line, tokenizer))
        .collect()
}
