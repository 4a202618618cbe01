use std::fs;
use std::path::Path;

use sailgen_codegen::EmitOptions;
use sailgen_parser::ParserConfig;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Settings file layout:
///
/// ```yaml
/// parser:
///   mnemonic_prefix: RISCV_
///   presence: segment      # or: mnemonic
/// codegen:
///   mnemonic: family       # or: instruction
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub parser: ParserConfig,
    pub codegen: EmitOptions,
}

impl Config {
    /// Load from `path`, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_str(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }
}
