//! C function bodies for each encoding family.
//!
//! Bodies are plain statement lists with no surrounding braces or
//! indentation; the emitter wraps them. Every body reads and writes through
//! `instr`, a pointer to the generated record, and the decode body reads
//! the `binary` parameter.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::{BINARY_FIELD, Family, Layout};

/// Field names that become members of a generated record when they occur
/// in the owning segment.
pub const FIELD_NAMES: [&str; 12] = [
    "regidx", "uop", "bop", "rop", "sop", "iop", "imm", "rd", "rs1", "rs2", "funct3", "funct7",
];

static FIELD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b({})\b", FIELD_NAMES.join("|"))).unwrap());

/// Rendered encode, decode and disassembly bodies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bodies {
    pub encode: String,
    pub decode: String,
    pub disassemble: String,
}

/// Render the three bodies for `family`.
///
/// `mnemonic` overrides the representative mnemonic of the family in the
/// disassembly body.
pub fn render(family: Family, mnemonic: Option<&str>) -> Bodies {
    let layout = family.layout();
    Bodies {
        encode: encode_body(layout),
        decode: decode_body(layout),
        disassemble: disassemble_body(layout, mnemonic.unwrap_or(layout.mnemonic)),
    }
}

fn encode_body(layout: &Layout) -> String {
    let mut out = String::new();
    for f in layout.fields {
        let _ = writeln!(out, "uint32_t {0} = instr->{0};", f.name);
    }

    let mut terms: Vec<String> = layout
        .fields
        .iter()
        .map(|f| {
            if f.shift == 0 {
                f.name.to_string()
            } else {
                format!("({} << {})", f.name, f.shift)
            }
        })
        .collect();
    if layout.fixed_bits != 0 {
        terms.push(format!("{:#b}", layout.fixed_bits));
    }
    if layout.carries_binary {
        terms.push(format!("instr->{BINARY_FIELD}"));
    }
    let _ = write!(out, "instr->{BINARY_FIELD} = {};", terms.join(" | "));
    out
}

fn decode_body(layout: &Layout) -> String {
    layout
        .fields
        .iter()
        .map(|f| {
            if f.shift == 0 {
                format!("instr->{} = binary & {:#X};", f.name, f.mask())
            } else {
                format!(
                    "instr->{} = (binary >> {}) & {:#X};",
                    f.name,
                    f.shift,
                    f.mask()
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn disassemble_body(layout: &Layout, mnemonic: &str) -> String {
    let conversions: Vec<&str> = layout.operands.iter().map(|op| op.conversion()).collect();
    let mut args = format!("\"{}\"", escape_c_string(mnemonic));
    for op in layout.operands {
        let _ = write!(args, ", instr->{}", op.field());
    }
    format!("printf(\"%s {}\", {args});", conversions.join(", "))
}

fn escape_c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '%' => out.push_str("%%"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

/// Record members for an instruction: every whitelisted field name found in
/// `segment`, distinct, in order of first occurrence, then `binary`.
pub fn infer_fields(segment: &str) -> Vec<&'static str> {
    let mut fields: Vec<&'static str> = Vec::new();
    for m in FIELD_TOKEN.find_iter(segment) {
        let Some(&name) = FIELD_NAMES.iter().find(|&&n| n == m.as_str()) else {
            continue;
        };
        if !fields.contains(&name) {
            fields.push(name);
        }
    }
    if !fields.contains(&BINARY_FIELD) {
        fields.push(BINARY_FIELD);
    }
    fields
}
