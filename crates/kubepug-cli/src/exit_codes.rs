//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions. Invalid arguments are reported by clap
//! with its own exit code (2).

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Catalog error - swagger document is invalid or malformed
pub const CATALOG_ERROR: i32 = 3;

/// Input error - a manifest could not be parsed
pub const INPUT_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Findings present and `--error-on-deprecated` / `--error-on-deleted` was requested
pub const FINDINGS: i32 = 6;
