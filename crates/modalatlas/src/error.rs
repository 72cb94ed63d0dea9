//! Error types for modalatlas

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormulaError {
    /// A bracketed operator name that the catalog does not know
    #[error("Unknown operator symbol: {symbol}")]
    Lookup { symbol: String },

    #[error("Unbalanced brackets at token {position}")]
    UnbalancedBrackets { position: usize },

    #[error("Unknown token: {token}")]
    UnknownToken { token: String },

    /// The postfix stream did not reduce to exactly one tree
    #[error("Malformed postfix sequence: {0}")]
    MalformedPostfix(String),

    #[error("Sampling error: {0}")]
    Sampling(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FormulaError>;
