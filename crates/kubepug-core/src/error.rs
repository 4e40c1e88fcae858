//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogError {
    /// The definitions document could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The definitions document is not valid JSON
    #[error("error parsing the JSON, file might be invalid: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document is JSON but does not have the expected swagger shape
    #[error("malformed API definitions at '{path}': {reason}")]
    Malformed { path: String, reason: String },

    /// Two definitions map to the same resource type key
    #[error("definitions '{first}' and '{second}' both declare resource type '{key}'")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },
}

impl CatalogError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
