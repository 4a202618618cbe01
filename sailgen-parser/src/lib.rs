//! Sail ISA source scanner.
//!
//! Splits a Sail description into variant segments, attributes each segment
//! to the instruction mnemonics it mentions and collects per-instruction
//! clause presence and clause fragments. This is a text heuristic, not a
//! Sail parser: nothing is type checked or resolved.

pub mod clause;
pub mod config;
pub mod error;
pub mod mnemonic;
pub mod segment;
pub mod table;

pub use clause::{Fragment, FragmentKind};
pub use config::{ParserConfig, PresenceMode};
pub use error::{Error, Result};
pub use mnemonic::Mnemonics;
pub use segment::Segment;
pub use table::{ClauseKind, ClauseSet, InstructionRecord, InstructionTable};

/// A scanned Sail source: its segments and the instruction table built
/// from them.
#[derive(Debug, Clone)]
pub struct SailFile<'a> {
    segments: Vec<Segment<'a>>,
    table: InstructionTable,
}

impl<'a> SailFile<'a> {
    /// Scan `source` with the given configuration.
    ///
    /// ```
    /// use sailgen_parser::{ClauseKind, ParserConfig, SailFile};
    ///
    /// let src = "union clause ast = ITYPE : (bits(12), regidx, regidx, iop)\n\
    ///            mapping encdec_iop : iop <-> bits(3) = { RISCV_ADDI <-> 0b000 }\n\
    ///            mapping clause encdec = ITYPE(imm, rs1, rd, op) <-> imm @ rs1 @ rd\n";
    /// let file = SailFile::parse(src, &ParserConfig::default())?;
    /// let addi = file.get("addi").unwrap();
    /// assert!(addi.has(ClauseKind::EncDec));
    /// assert!(!addi.has(ClauseKind::Assembly));
    /// # Ok::<(), sailgen_parser::Error>(())
    /// ```
    pub fn parse(source: &'a str, config: &ParserConfig) -> Result<Self> {
        let mnemonics = Mnemonics::new(&config.mnemonic_prefix)?;
        let segments = segment::split(source);
        let mut table = InstructionTable::new();

        for seg in &segments {
            let coarse = ClauseSet::scan(seg.text);
            for token in mnemonics.tokens(seg.text) {
                let key = mnemonics.normalize(token);
                let clauses = match config.presence {
                    PresenceMode::Segment => coarse,
                    PresenceMode::Mnemonic => mnemonics.scoped_presence(seg.text, token),
                };
                let fragments = clause::extract(seg.text, &key, &mnemonics);
                log::trace!(
                    "segment {} ({}): {key} clauses={clauses:?} fragments={}",
                    seg.index,
                    seg.declared,
                    fragments.len()
                );
                table
                    .get_or_insert(&key, seg.index)
                    .absorb(seg.index, clauses, fragments);
            }
        }

        log::debug!(
            "Attributed {} instructions across {} segments",
            table.len(),
            segments.len()
        );
        Ok(Self { segments, table })
    }

    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    pub fn table(&self) -> &InstructionTable {
        &self.table
    }

    /// Records in first-seen order.
    pub fn records(&self) -> std::slice::Iter<'_, InstructionRecord> {
        self.table.iter()
    }

    pub fn get(&self, name: &str) -> Option<&InstructionRecord> {
        self.table.get(name)
    }

    /// The segment a record's code is generated from.
    pub fn owning_segment(&self, record: &InstructionRecord) -> Option<&Segment<'a>> {
        self.segments.get(record.segment)
    }
}
