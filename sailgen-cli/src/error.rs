use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Cannot read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Parse(#[from] sailgen_parser::Error),

    #[error("Cannot serialize report: {0}")]
    Report(#[from] serde_yaml::Error),
}
