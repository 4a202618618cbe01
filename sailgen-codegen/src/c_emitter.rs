use std::fmt::Write;

use sailgen_isa::{Family, template};
use sailgen_parser::{ClauseKind, InstructionRecord, SailFile};

use crate::options::{EmitOptions, MnemonicStyle};

/// Include lines that open every generated file.
pub const HEADER: [&str; 2] = ["#include <stdio.h>", "#include <stdint.h>"];

/// Emit C stubs for every record of `file`, in table order.
///
/// Records with neither an encdec nor an assembly clause produce nothing.
pub fn generate(file: &SailFile<'_>, options: &EmitOptions) -> String {
    let mut blocks = vec![HEADER.join("\n")];
    for record in file.records() {
        let Some(segment) = file.owning_segment(record) else {
            log::warn!("Instruction `{}` has no owning segment", record.name);
            continue;
        };
        match render_instruction(record, segment.text, options) {
            Some(block) => blocks.push(block),
            None => log::trace!("Skipping `{}`: no encdec or assembly clause", record.name),
        }
    }
    log::debug!("Emitted {} instruction blocks", blocks.len() - 1);

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

/// Emit the record type and functions for one instruction.
///
/// `segment` is the text of the instruction's owning segment; it decides the
/// encoding family and the record fields. Returns `None` when the record has
/// neither an encdec nor an assembly clause.
pub fn render_instruction(
    record: &InstructionRecord,
    segment: &str,
    options: &EmitOptions,
) -> Option<String> {
    let encdec = record.has(ClauseKind::EncDec);
    let assembly = record.has(ClauseKind::Assembly);
    if !encdec && !assembly {
        return None;
    }

    let name = &record.name;
    let ty = format!("struct {name}_t");
    let family = Family::classify(segment);
    let mnemonic = match options.mnemonic {
        MnemonicStyle::Family => None,
        MnemonicStyle::Instruction => Some(name.to_uppercase()),
    };
    let bodies = template::render(family, mnemonic.as_deref());
    log::trace!("`{name}` classified as {family}");

    let mut decls = Vec::with_capacity(4);

    let mut record_decl = format!("{ty} {{\n");
    for field in template::infer_fields(segment) {
        let _ = writeln!(record_decl, "    uint32_t {field};");
    }
    record_decl.push_str("};");
    decls.push(record_decl);

    if encdec {
        decls.push(function(
            &format!("void encode_{name}({ty} *instr)"),
            &bodies.encode,
        ));
        decls.push(function(
            &format!("void decode_{name}(uint32_t binary, {ty} *instr)"),
            &bodies.decode,
        ));
    }
    if assembly {
        decls.push(function(
            &format!("void print_assembly_{name}({ty} *instr)"),
            &bodies.disassemble,
        ));
    }

    Some(decls.join("\n\n"))
}

fn function(signature: &str, body: &str) -> String {
    let mut out = format!("{signature} {{\n");
    for line in body.lines() {
        let _ = writeln!(out, "    {line}");
    }
    out.push('}');
    out
}
