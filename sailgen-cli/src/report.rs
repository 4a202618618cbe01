use std::fmt::Write;

use sailgen_isa::Family;
use sailgen_parser::{ClauseKind, InstructionRecord, SailFile};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct InstructionReport<'a> {
    name: &'a str,
    declared: &'a str,
    family: String,
    clauses: Clauses,
    fragments: Vec<FragmentReport<'a>>,
}

#[derive(Debug, Serialize)]
struct Clauses {
    union: bool,
    encdec: bool,
    assembly: bool,
}

#[derive(Debug, Serialize)]
struct FragmentReport<'a> {
    kind: String,
    text: &'a str,
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "YES" } else { "NO" }
}

fn owner<'f>(file: &'f SailFile<'_>, record: &InstructionRecord) -> (&'f str, Family) {
    file.owning_segment(record)
        .map_or(("", Family::Generic), |seg| {
            (seg.declared, Family::classify(seg.text))
        })
}

/// Human-readable dump: clause flags and extracted fragments per instruction.
pub fn text(file: &SailFile<'_>) -> String {
    let mut out = String::new();
    for record in file.records() {
        let (declared, family) = owner(file, record);
        let _ = writeln!(out, "\nInstruction: {}", record.name);
        let _ = writeln!(out, "variant: {declared} ({family})");
        for kind in ClauseKind::ALL {
            let _ = writeln!(out, "{}: {}", kind.marker(), yes_no(record.has(kind)));
        }
        for fragment in &record.fragments {
            let _ = writeln!(out, "{}", fragment.text);
        }
    }
    out
}

/// The same dump as YAML.
pub fn yaml(file: &SailFile<'_>) -> Result<String, serde_yaml::Error> {
    let reports: Vec<InstructionReport<'_>> = file
        .records()
        .map(|record| {
            let (declared, family) = owner(file, record);
            InstructionReport {
                name: &record.name,
                declared,
                family: family.to_string(),
                clauses: Clauses {
                    union: record.has(ClauseKind::Union),
                    encdec: record.has(ClauseKind::EncDec),
                    assembly: record.has(ClauseKind::Assembly),
                },
                fragments: record
                    .fragments
                    .iter()
                    .map(|f| FragmentReport {
                        kind: f.kind.to_string(),
                        text: &f.text,
                    })
                    .collect(),
            }
        })
        .collect();
    serde_yaml::to_string(&reports)
}
