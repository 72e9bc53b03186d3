//! Errors raised at the data-loading boundary.
//!
//! The computational core never returns these: missing or malformed models
//! degrade to `NaN`/omission there. Only reading a dataset or configuration
//! file can fail as a whole.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid model {what}: {reason}")]
    InvalidModel { what: String, reason: String },
    #[error("series name `{0}` is used more than once")]
    DuplicateSeriesName(String),
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(PathBuf),
}

impl Error {
    pub(crate) fn invalid_model(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidModel {
            what: what.into(),
            reason: reason.into(),
        }
    }
}
