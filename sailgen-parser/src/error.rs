use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid mnemonic prefix {0:?}: expected one or more word characters")]
    InvalidPrefix(String),

    #[error("Pattern compilation failed: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
