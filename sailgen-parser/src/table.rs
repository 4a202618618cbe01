use std::collections::HashMap;

use bitflags::bitflags;

use crate::clause::Fragment;

/// Clause kinds tracked per instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    /// A union variant declaration.
    Union,
    /// An encode/decode mapping.
    EncDec,
    /// An assembly mapping.
    Assembly,
}

impl ClauseKind {
    pub const ALL: [ClauseKind; 3] = [ClauseKind::Union, ClauseKind::EncDec, ClauseKind::Assembly];

    /// Literal text whose presence marks the clause.
    pub const fn marker(self) -> &'static str {
        match self {
            ClauseKind::Union => "union clause",
            ClauseKind::EncDec => "mapping clause encdec",
            ClauseKind::Assembly => "mapping clause assembly",
        }
    }

    pub const fn flag(self) -> ClauseSet {
        match self {
            ClauseKind::Union => ClauseSet::UNION,
            ClauseKind::EncDec => ClauseSet::ENCDEC,
            ClauseKind::Assembly => ClauseSet::ASSEMBLY,
        }
    }
}

bitflags! {
    /// Set of clause kinds seen for an instruction.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct ClauseSet: u8 {
        const UNION = 1 << 0;
        const ENCDEC = 1 << 1;
        const ASSEMBLY = 1 << 2;
    }
}

impl ClauseSet {
    /// Kinds whose marker occurs anywhere in `text`.
    pub fn scan(text: &str) -> Self {
        ClauseKind::ALL
            .into_iter()
            .filter(|kind| text.contains(kind.marker()))
            .fold(Self::empty(), |set, kind| set | kind.flag())
    }

    pub fn has(self, kind: ClauseKind) -> bool {
        self.contains(kind.flag())
    }
}

/// Everything known about one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRecord {
    /// Normalized name: prefix stripped, lowercase.
    pub name: String,
    /// Clause kinds seen in any segment mentioning the instruction. Never
    /// shrinks.
    pub clauses: ClauseSet,
    /// Extracted fragments from every segment mentioning the instruction,
    /// in processing order.
    pub fragments: Vec<Fragment>,
    /// Index of the segment used for code generation: the last one that
    /// mentioned the instruction.
    pub segment: usize,
}

impl InstructionRecord {
    fn new(name: String, segment: usize) -> Self {
        Self {
            name,
            clauses: ClauseSet::empty(),
            fragments: Vec::new(),
            segment,
        }
    }

    pub fn has(&self, kind: ClauseKind) -> bool {
        self.clauses.has(kind)
    }

    /// Merge what a segment says about this instruction. Presence is ORed,
    /// fragments are appended and the segment becomes the owner.
    pub fn absorb(&mut self, segment: usize, clauses: ClauseSet, fragments: Vec<Fragment>) {
        self.clauses.insert(clauses);
        self.fragments.extend(fragments);
        self.segment = segment;
    }
}

/// Instruction records keyed by normalized name, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct InstructionTable {
    records: Vec<InstructionRecord>,
    index: HashMap<String, usize>,
}

impl InstructionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `name`, created with no clauses and owned by `segment`
    /// if absent.
    pub fn get_or_insert(&mut self, name: &str, segment: usize) -> &mut InstructionRecord {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.records.len();
                self.records
                    .push(InstructionRecord::new(name.to_string(), segment));
                let _ = self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.records[idx]
    }

    pub fn get(&self, name: &str) -> Option<&InstructionRecord> {
        self.index.get(name).map(|&idx| &self.records[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstructionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'t> IntoIterator for &'t InstructionTable {
    type Item = &'t InstructionRecord;
    type IntoIter = std::slice::Iter<'t, InstructionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
