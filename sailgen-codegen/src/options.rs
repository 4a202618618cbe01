use serde::{Deserialize, Serialize};

/// Mnemonic printed by generated disassembly functions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MnemonicStyle {
    /// The representative mnemonic of the encoding family (`LUI`, `JAL`,
    /// `ORI`, `ADD`, `GENERIC`), whatever the instruction is.
    #[default]
    Family,
    /// The instruction's own name, uppercased. An enhancement over the
    /// family mnemonic.
    Instruction,
}

/// Emitter settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitOptions {
    pub mnemonic: MnemonicStyle,
}
