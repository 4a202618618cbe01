use serde::{Deserialize, Serialize};

/// Mnemonic prefix of the RISC-V Sail model.
pub const DEFAULT_PREFIX: &str = "RISCV_";

/// How clause presence is attributed to the instructions of a segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceMode {
    /// A marker anywhere in the segment counts for every instruction in it.
    #[default]
    Segment,
    /// A marker counts only inside top-level items that mention the
    /// instruction or mention no instruction at all.
    Mnemonic,
}

/// Parser settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Architecture prefix of mnemonic tokens, e.g. `RISCV_ADDI`.
    pub mnemonic_prefix: String,
    pub presence: PresenceMode,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            mnemonic_prefix: DEFAULT_PREFIX.to_string(),
            presence: PresenceMode::Segment,
        }
    }
}
