use thiserror::Error;

use crate::model::Side;

#[derive(Debug, Error)]
pub enum ReconError {
    /// Two records on the same side normalize to one match key.
    #[error("duplicate match key '{key}' in ledger {side}")]
    DuplicateKey { side: Side, key: String },

    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error (bad tolerance, score threshold, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// Missing required column in input data.
    #[error("ledger {side}: missing column '{column}'")]
    MissingColumn { side: Side, column: String },

    /// Taxable value that is not a decimal number.
    #[error("ledger {side}, line {line}: cannot parse taxable value '{value}'")]
    AmountParse { side: Side, line: u64, value: String },

    /// Taxable value below zero.
    #[error("ledger {side}, line {line}: negative taxable value '{value}'")]
    NegativeAmount { side: Side, line: u64, value: String },

    /// IO error (file read, CSV decode, etc.).
    #[error("IO error: {0}")]
    Io(String),
}

impl From<csv::Error> for ReconError {
    fn from(e: csv::Error) -> Self {
        Self::Io(e.to_string())
    }
}
