use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DicepayError>;

#[derive(Error, Debug, Diagnostic)]
pub enum DicepayError {
    #[error("Invalid stake for bet '{bet}': {value}")]
    #[diagnostic(
        code(dicepay::invalid_wager),
        help("stakes must be numbers or numeric strings")
    )]
    InvalidWager { bet: String, value: String },
    #[error("Invalid roll: {0}")]
    #[diagnostic(code(dicepay::invalid_roll))]
    InvalidRoll(String),
    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(dicepay::invalid_config))]
    InvalidConfig(String),
    #[error("JSON error: {0}")]
    #[diagnostic(code(dicepay::json))]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    #[diagnostic(code(dicepay::csv))]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    #[diagnostic(code(dicepay::io))]
    Io(#[from] std::io::Error),
    #[error("Balance overflow for session '{session}'")]
    #[diagnostic(code(dicepay::balance_overflow))]
    BalanceOverflow { session: String },
    #[error("Storage error: {0}")]
    #[diagnostic(code(dicepay::storage))]
    Storage(String),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for DicepayError {
    fn from(err: rocksdb::Error) -> Self {
        DicepayError::Storage(err.into_string())
    }
}
