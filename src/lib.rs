//! Core types, tables, and passes for the riscv_listing analyzer.
//!
//! This library annotates and analyzes textual disassembly listings
//! (addresses, raw hex encodings, mnemonics, operands). It rewrites
//! pseudo-instructions into their canonical machine-level form, width-aware,
//! and classifies mnemonics into instruction-set-extension buckets with
//! frequency and coverage statistics. It never decodes raw bytes: the input
//! is text that already contains mnemonics.
//!
//! # Basic Usage
//!
//! ```rust
//! use riscv_listing::{
//!     tokenizer::LineTokenizer,
//!     tables::{PseudoTable, ExtensionTable},
//!     pass::Pass,
//!     classify,
//! };
//!
//! let listing: Vec<String> = vec![
//!     "   10:\t00008067          \tret".into(),
//!     "   14:\t02c58533          \tmul\ta0,a1,a2".into(),
//! ];
//!
//! // Rewrite pseudo-instructions in place (ret -> jalr here)
//! let tokenizer = LineTokenizer::new();
//! let rewritten = Pass::Normalize.run(&listing, &tokenizer, PseudoTable::builtin());
//! assert!(rewritten[0].contains("jalr"));
//!
//! // Classify the listing into extension buckets
//! let report = classify::run(&rewritten, &tokenizer, ExtensionTable::builtin());
//! assert_eq!(report.total_matched(), 2);
//! ```

pub mod tokenizer;
pub mod tables;
pub mod pass;
pub mod classify;
pub mod format;
pub mod io;
#[cfg(feature = "extension-module")]
pub mod python;

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Marker prefix carried by mnemonics of compressed (2-byte) encodings.
pub const COMPRESSED_PREFIX: &str = "c.";

/// One tokenized instruction line, borrowed from the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInstruction<'a> {
    /// Hex address field (without the trailing colon)
    pub address: &'a str,
    /// Raw encoding field, possibly space-separated byte groups
    pub encoding: &'a str,
    /// Mnemonic token (word characters and dots, e.g. "fcvt.w.s")
    pub mnemonic: &'a str,
    /// Byte span of the mnemonic within the source line
    pub mnemonic_span: Range<usize>,
    /// Trailing operand text, if any (not parsed further)
    pub operands: Option<&'a str>,
}

impl ParsedInstruction<'_> {
    /// Width class of the recorded machine code.
    pub fn encoding_width(&self) -> EncodingWidth {
        EncodingWidth::of(self.encoding)
    }

    /// Returns true if the mnemonic already carries the compressed-form marker.
    pub fn is_compressed_form(&self) -> bool {
        self.mnemonic.starts_with(COMPRESSED_PREFIX)
    }
}

impl fmt::Display for ParsedInstruction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operands {
            Some(ops) => write!(f, "{}: {} {} {}", self.address, self.encoding, self.mnemonic, ops),
            None => write!(f, "{}: {} {}", self.address, self.encoding, self.mnemonic),
        }
    }
}

/// Width class of an instruction encoding, derived from its hex digit count.
///
/// Only the two common RISC-V widths take part in pseudo-instruction
/// rewriting. Everything else (`.insn`-style or vector encodings, byte-pair
/// runs of other lengths) still tokenizes for classification but is exempt
/// from width-based rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingWidth {
    /// 4 hex digits: 2-byte compressed encoding
    Narrow,
    /// 8 hex digits: 4-byte normal encoding
    Normal,
    /// Any other digit count
    Other,
}

impl EncodingWidth {
    /// Classify an encoding field; whitespace between byte groups is ignored.
    pub fn of(encoding: &str) -> Self {
        let digits = encoding.chars().filter(|c| !c.is_whitespace()).count();
        match digits {
            4 => EncodingWidth::Narrow,
            8 => EncodingWidth::Normal,
            _ => EncodingWidth::Other,
        }
    }
}

impl fmt::Display for EncodingWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingWidth::Narrow => write!(f, "narrow (2-byte)"),
            EncodingWidth::Normal => write!(f, "normal (4-byte)"),
            EncodingWidth::Other => write!(f, "other"),
        }
    }
}

/// Named instruction-set extensions.
///
/// Declaration order is the classification priority order: the first
/// extension whose mnemonic set contains a given mnemonic wins, so a
/// mnemonic is never double-counted across sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Extension {
    /// Integer base
    I,
    /// Multiply/divide
    M,
    /// Atomics
    A,
    /// Single/double floating point
    #[serde(rename = "F/D")]
    Fd,
    /// Compressed
    C,
    /// Vector
    V,
}

impl Extension {
    /// All extensions, in classification priority order.
    pub const ALL: [Extension; 6] = [
        Extension::I,
        Extension::M,
        Extension::A,
        Extension::Fd,
        Extension::C,
        Extension::V,
    ];

    /// Short display name, as used in report tables.
    pub fn name(&self) -> &'static str {
        match self {
            Extension::I => "I",
            Extension::M => "M",
            Extension::A => "A",
            Extension::Fd => "F/D",
            Extension::C => "C",
            Extension::V => "V",
        }
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Tokenizer trait: recognize the address/encoding/mnemonic shape of a line.
///
/// Implementors must be `Send + Sync` so the listing-level drivers can
/// tokenize lines in parallel.
pub trait Tokenize: Send + Sync {
    /// Tokenize a single listing line.
    ///
    /// # Arguments
    /// * `line` - One line of disassembly text
    ///
    /// # Returns
    /// Some(ParsedInstruction) if the line has the instruction shape,
    /// None otherwise (data lines, labels, blank lines)
    fn tokenize<'a>(&self, line: &'a str) -> Option<ParsedInstruction<'a>>;
}

/// Error type for listing operations
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// Invalid lookup table supplied
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Output serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
