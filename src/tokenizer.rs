//! Regex-based tokenizer for disassembly listing lines.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{ParsedInstruction, Tokenize};

/// Byte-pair encoding field (x86 objdump style): each group is exactly two
/// hex digits followed by whitespace, e.g. "  67: 48 89 e5   mov rbp,rsp".
static PAIR_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9a-fA-F]+):\s+((?:[0-9a-fA-F]{2}\s+)+)([\w.]+)")
        .expect("pair-run pattern is valid")
});

/// Contiguous encoding field (RISC-V objdump style): a single hex run,
/// e.g. "  10:  00008067  ret".
static CONTIGUOUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9a-fA-F]+):\s+([0-9a-fA-F]+)\s+([\w.]+)")
        .expect("contiguous pattern is valid")
});

/// A tokenizer that recognizes both objdump encoding-field shapes.
#[derive(Debug, Default)]
pub struct LineTokenizer;

impl LineTokenizer {
    /// Construct a new LineTokenizer.
    pub fn new() -> Self {
        LineTokenizer
    }
}

impl fmt::Display for LineTokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineTokenizer")
    }
}

impl Tokenize for LineTokenizer {
    fn tokenize<'a>(&self, line: &'a str) -> Option<ParsedInstruction<'a>> {
        // The pair-run shape must be tried first: on "55 89 e5 mov" the
        // contiguous pattern would stop at "55" and take "89" for the
        // mnemonic. The pair-run pattern cannot match a contiguous run like
        // "4505" (no whitespace after the first two digits), so the order is
        // unambiguous.
        let caps = PAIR_RUN.captures(line).or_else(|| CONTIGUOUS.captures(line))?;

        let mnemonic_match = caps.get(3).expect("mnemonic group always captures");
        let mnemonic = mnemonic_match.as_str();

        // A token of pure digits is a data column misaligned into the
        // mnemonic position, not an instruction.
        if mnemonic.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let rest = line[mnemonic_match.end()..].trim();
        Some(ParsedInstruction {
            address: caps.get(1).expect("address group always captures").as_str(),
            encoding: caps.get(2).expect("encoding group always captures").as_str().trim_end(),
            mnemonic,
            mnemonic_span: mnemonic_match.start()..mnemonic_match.end(),
            operands: if rest.is_empty() { None } else { Some(rest) },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EncodingWidth;

    fn tokenize(line: &str) -> Option<ParsedInstruction<'_>> {
        LineTokenizer::new().tokenize(line)
    }

    #[test]
    fn test_contiguous_encoding() {
        let inst = tokenize("  10:\t00008067          \tret").unwrap();
        assert_eq!(inst.address, "10");
        assert_eq!(inst.encoding, "00008067");
        assert_eq!(inst.mnemonic, "ret");
        assert_eq!(inst.operands, None);
        assert_eq!(inst.encoding_width(), EncodingWidth::Normal);
    }

    #[test]
    fn test_narrow_encoding_with_operands() {
        let inst = tokenize("  12:\t4505              \tli\ta0,1").unwrap();
        assert_eq!(inst.encoding, "4505");
        assert_eq!(inst.mnemonic, "li");
        assert_eq!(inst.operands, Some("a0,1"));
        assert_eq!(inst.encoding_width(), EncodingWidth::Narrow);
    }

    #[test]
    fn test_pair_run_encoding() {
        let inst = tokenize("  67:\t48 89 e5             \tmov    rbp,rsp").unwrap();
        assert_eq!(inst.address, "67");
        assert_eq!(inst.encoding, "48 89 e5");
        assert_eq!(inst.mnemonic, "mov");
        assert_eq!(inst.operands, Some("rbp,rsp"));
        // Six digits: exempt from width-based rewriting
        assert_eq!(inst.encoding_width(), EncodingWidth::Other);
    }

    #[test]
    fn test_multi_part_mnemonics() {
        let inst = tokenize("  40:\td2f42553          \tfcvt.w.s\ta0,fa0").unwrap();
        assert_eq!(inst.mnemonic, "fcvt.w.s");

        let inst = tokenize("  44:\t0085859b          \t.insn\t4, 0x85859b").unwrap();
        assert_eq!(inst.mnemonic, ".insn");
    }

    #[test]
    fn test_non_instruction_lines_do_not_match() {
        let tok = LineTokenizer::new();
        assert!(tok.tokenize("").is_none());
        assert!(tok.tokenize("0000000000010400 <main>:").is_none());
        assert!(tok.tokenize("Disassembly of section .text:").is_none());
        assert!(tok.tokenize("\t...").is_none());
    }

    #[test]
    fn test_digit_only_mnemonic_rejected() {
        // Data words misaligned into the mnemonic column
        assert!(tokenize("  18:\t0000 1234").is_none());
        assert!(tokenize("  1c:\t00000013 42").is_none());
    }

    #[test]
    fn test_mnemonic_span_round_trip() {
        let line = "  10:\t00008067          \tret";
        let inst = tokenize(line).unwrap();
        let rebuilt = format!(
            "{}{}{}",
            &line[..inst.mnemonic_span.start],
            inst.mnemonic,
            &line[inst.mnemonic_span.end..]
        );
        assert_eq!(rebuilt, line);
    }

    #[test]
    fn test_vector_width_is_other() {
        let inst = tokenize("  50:\t0d0075d7          \tvsetvli\ta1,zero,e8,m8,ta,ma").unwrap();
        assert_eq!(inst.mnemonic, "vsetvli");
        assert_eq!(inst.encoding_width(), EncodingWidth::Normal);

        // A 6-byte encoding tokenizes but gets no width class
        let inst = tokenize("  54:\t001f00001f          \t.insn").unwrap();
        assert_eq!(inst.encoding_width(), EncodingWidth::Other);
    }
}
