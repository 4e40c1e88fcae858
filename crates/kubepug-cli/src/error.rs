//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use kubepug_core::CatalogError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// The swagger document could not be turned into a catalog
    #[error("Invalid API definitions: {message}")]
    #[diagnostic(code(kubepug::cli::catalog))]
    Catalog {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A manifest could not be read as Kubernetes objects
    #[error("Invalid manifest {path}: {message}")]
    #[diagnostic(code(kubepug::cli::input))]
    Input { path: String, message: String },

    /// Deprecated or deleted APIs found and the caller asked to fail on them
    #[error("found {deleted} Deleted APIs and {deprecated} Deprecated APIs")]
    #[diagnostic(code(kubepug::cli::findings))]
    Findings { deleted: usize, deprecated: usize },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(kubepug::cli::io))]
    Io { message: String },

    /// Internal error (serialization, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(kubepug::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Catalog { .. } => exit_codes::CATALOG_ERROR,
            CliError::Input { .. } => exit_codes::INPUT_ERROR,
            CliError::Findings { .. } => exit_codes::FINDINGS,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an input error for a manifest
    pub fn input(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wrap a catalog error, naming the swagger file it came from
    pub fn catalog(source: &str, err: CatalogError) -> Self {
        match err {
            CatalogError::Io(e) => Self::Io {
                message: format!("{}: {}", source, e),
            },
            duplicate @ CatalogError::DuplicateKey { .. } => Self::Catalog {
                message: format!("{}: {}", source, duplicate),
                help: Some("drop --reject-duplicates to keep the last definition".to_string()),
            },
            other => Self::Catalog {
                message: format!("{}: {}", source, other),
                help: Some(
                    "the swagger file must be a Kubernetes OpenAPI v2 document with a top-level 'definitions' object"
                        .to_string(),
                ),
            },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(err.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::internal(err.to_string())
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
