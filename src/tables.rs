//! Static lookup tables: pseudo-instruction mapping and extension membership.
//!
//! Both tables are immutable configuration data, constructed once and
//! read-only for the lifetime of a pass. Updating a table means building a
//! new one, never mutating in place. Both are serde-(de)serializable so
//! callers can supply them as versioned data files.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{Extension, ListingError};

/// Built-in pseudo-instruction to canonical-instruction pairs.
const PSEUDO_TO_CANONICAL: &[(&str, &str)] = &[
    ("beqz", "beq"),
    ("bnez", "bne"),
    ("j", "jal"),
    ("jr", "jalr"),
    ("mv", "addi"),
    ("nop", "addi"),
    ("ret", "jalr"),
    ("sext.w", "addiw"),
    ("bgez", "bge"),
    ("bgtz", "blt"),
    ("blez", "bge"),
    ("bltz", "blt"),
    ("neg", "sub"),
    ("negw", "subw"),
    ("not", "xori"),
    ("seqz", "sltiu"),
    ("sgtz", "slt"),
    ("snez", "sltu"),
    ("fabs.s", "fsgnjx.s"),
    ("fmv.s", "fsgnj.s"),
    ("fneg.s", "fsgnjn.s"),
    ("frflags", "csrrs"),
    ("fsflags", "csrrw"),
    ("bgt", "blt"),
    ("ble", "bge"),
    ("bgtu", "bltu"),
    ("bleu", "bgeu"),
    ("csrc", "csrrc"),
    ("csrci", "csrrci"),
    ("csrr", "csrrs"),
    ("csrsi", "csrrsi"),
    ("csrw", "csrrw"),
    ("csrwi", "csrrwi"),
    ("frcsr", "csrrs"),
    ("frrm", "csrrs"),
    ("fscsr", "csrrw"),
    ("fsflagsi", "csrrwi"),
    ("fsrm", "csrrw"),
    ("fsrmi", "csrrwi"),
    ("la", "addi"),
    ("rdcycle", "csrrs"),
    ("rdinstret", "csrrs"),
    ("rdtime", "csrrs"),
    ("sltz", "slt"),
    ("tail", "auipc"),
    ("call", "auipc"),
];

/// Built-in extension membership, in classification priority order.
const EXTENSION_MEMBERS: &[(Extension, &[&str])] = &[
    (Extension::I, &[
        "add", "addw", "addi", "addiw", "sub", "subw", "and", "andi", "or",
        "ori", "xor", "xori", "sll", "sllw", "slli", "slliw", "srl", "srlw",
        "srli", "srliw", "sra", "sraw", "srai", "sraiw", "slt", "sltu",
        "slti", "sltiu", "lui", "auipc", "beq", "bne", "blt", "bge", "bltu",
        "bgeu", "jal", "jalr", "lb", "lbu", "lh", "lhu", "lw", "lwu", "ld",
        "sb", "sh", "sw", "sd", "csrrw", "csrrs", "csrrc", "csrrwi",
        "csrrsi", "csrrci", "wfi", "mret", "sret", "fence", "fence.i",
        "sfence.vma", "ecall", "ebreak", "seqz", "li",
    ]),
    (Extension::M, &[
        "mul", "mulw", "mulh", "mulhs", "mulhu", "div", "divw", "divu",
        "divuw", "rem", "remw", "remu", "remuw",
    ]),
    (Extension::A, &[
        "lr.w", "lr.d", "sc.w", "sc.d", "amoswap.w", "amoswap.d",
        "amoadd.w", "amoadd.d.aqrl", "amoxor.w", "amoxor.d", "amoand.w",
        "amoand.d", "amoor.w", "amoor.d", "amomin.w", "amomin.d",
        "amomax.w", "amomax.d", "amominu.w", "amominu.d", "amomaxu.w",
        "amomaxu.d", "sc.d.rl", "amoadd.d.aq", "amoadd.w.aq", "amoand.w.aq",
        "amoor.w.aq", "amoswap.w.aq", "lr.d.aq", "lr.w.aq", "sc.d.aq",
        "sc.w.aq",
    ]),
    (Extension::Fd, &[
        "fadd.s", "fsub.s", "fmul.s", "fmadd.s", "fmsub.s", "fnmadd.s",
        "fnmsub.s", "fdiv.s", "fsqrt.s", "fsgnj.s", "fsgnjn.s", "fsgnjx.s",
        "fmv.x.w", "fmv.w.x", "fmin.s", "fmax.s", "feq.s", "flt.s", "fle.s",
        "fcvt.w.s", "fcvt.wu.s", "fcvt.s.w", "fcvt.s.wu", "fcvt.l.s",
        "fcvt.lu.s", "fcvt.s.l", "fcvt.s.lu", "flw", "fsw", "fclass.s",
        "fadd.d", "fcvt.d.l", "fcvt.d.lu", "fcvt.l.d", "fcvt.lu.d", "fld",
        "flt.d", "fmul.d", "fmv.d.x", "fmv.x.d", "fneg.d", "fsub.d", "fsd",
        "fabs.d", "fcvt.d.s", "fcvt.d.w", "fcvt.d.wu", "fcvt.s.d",
        "fcvt.w.d", "fcvt.wu.d", "fdiv.d", "feq.d", "fle.d", "fmadd.d",
        "fmsub.d", "fmv.d", "fsqrt.d", "fnmsub.d",
    ]),
    (Extension::C, &[
        "c.add", "c.addw", "c.addi", "c.addiw", "c.sub", "c.subw",
        "c.addi16sp", "c.addi4spn", "c.and", "c.andi", "c.or", "c.xor",
        "c.slli", "c.srli", "c.srai", "c.li", "c.lui", "c.beq", "c.bne",
        "c.jal", "c.jalr", "c.lw", "c.sw", "c.lwsp", "c.swsp", "c.ld",
        "c.sd", "c.ldsp", "c.sdsp", "c.ebreak", "c.fsd", "c.fld",
    ]),
    // No vector instructions classified yet
    (Extension::V, &[]),
];

static BUILTIN_PSEUDO: Lazy<PseudoTable> = Lazy::new(|| {
    PseudoTable::from_pairs(PSEUDO_TO_CANONICAL.iter().map(|&(p, c)| (p.to_string(), c.to_string())))
        .expect("built-in pseudo table has unique keys")
});

static BUILTIN_EXTENSIONS: Lazy<ExtensionTable> = Lazy::new(|| {
    ExtensionTable::from_members(
        EXTENSION_MEMBERS
            .iter()
            .map(|&(ext, members)| (ext, members.iter().map(|m| m.to_string()).collect())),
    )
});

/// Immutable mapping from pseudo-mnemonic to canonical mnemonic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PseudoTable {
    map: HashMap<String, String>,
}

impl PseudoTable {
    /// The built-in RISC-V pseudo-instruction table.
    pub fn builtin() -> &'static PseudoTable {
        &BUILTIN_PSEUDO
    }

    /// Build a table from (pseudo, canonical) pairs.
    ///
    /// Keys are case-sensitive and must be unique; a duplicate key is a
    /// construction error rather than a silent overwrite.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ListingError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = HashMap::new();
        for (pseudo, canonical) in pairs {
            if map.insert(pseudo.clone(), canonical).is_some() {
                return Err(ListingError::InvalidTable(format!(
                    "duplicate pseudo-instruction key: {}",
                    pseudo
                )));
            }
        }
        Ok(PseudoTable { map })
    }

    /// Canonical mnemonic for a pseudo-mnemonic, if the table knows it.
    pub fn canonical(&self, mnemonic: &str) -> Option<&str> {
        self.map.get(mnemonic).map(String::as_str)
    }

    /// Number of pseudo-instructions in the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Immutable mapping from extension to its set of canonical mnemonics.
///
/// Lookup order is always `Extension::ALL` order regardless of how the
/// table was built, keeping classification deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionTable {
    sets: HashMap<Extension, HashSet<String>>,
}

impl ExtensionTable {
    /// The built-in RISC-V extension membership table.
    pub fn builtin() -> &'static ExtensionTable {
        &BUILTIN_EXTENSIONS
    }

    /// Build a table from per-extension mnemonic sets. An extension absent
    /// from `members` behaves like an empty set.
    pub fn from_members<I>(members: I) -> Self
    where
        I: IntoIterator<Item = (Extension, HashSet<String>)>,
    {
        ExtensionTable {
            sets: members.into_iter().collect(),
        }
    }

    /// First extension whose set contains the mnemonic, in priority order.
    pub fn classify(&self, mnemonic: &str) -> Option<Extension> {
        Extension::ALL
            .iter()
            .copied()
            .find(|ext| self.sets.get(ext).is_some_and(|set| set.contains(mnemonic)))
    }

    /// Mnemonic set for one extension (empty if unconfigured).
    pub fn members(&self, extension: Extension) -> Option<&HashSet<String>> {
        self.sets.get(&extension)
    }
}
