//! Error types for guidemill operations.
//!
//! This module defines the main error type [`GuidemillError`] which represents
//! the fatal failures that can abort a batch run. Per-page failures (missing
//! content, unresolvable slugs, malformed input lines, write failures) are
//! never errors: they are accumulated as data in
//! [`ParseResult`](crate::model::ParseResult) and the batch continues.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for batch parsing operations.
///
/// Only fatal input conditions surface as `Err` from the public API; every
/// other failure mode degrades to a recorded message in the batch result.
#[derive(Error, Debug)]
pub enum GuidemillError {
    /// Input file not found.
    ///
    /// Returned when attempting to read an input file that doesn't exist.
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors reading input.
    ///
    /// Wraps standard I/O errors for file operations.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// No parseable page records in the input.
    ///
    /// Returned when a batch input (JSON array or newline-delimited JSON)
    /// yields zero valid page records. A batch with nothing to process is
    /// treated as a caller mistake rather than an empty success.
    #[error("No valid page records found in input")]
    NoPages,

    /// Configuration errors.
    ///
    /// Returned when a keyword/taxonomy configuration file is missing or
    /// cannot be deserialized.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for GuidemillError.
///
/// This is a convenience alias for `std::result::Result<T, GuidemillError>`.
pub type Result<T> = std::result::Result<T, GuidemillError>;
