//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers all error
//! cases in the library. This design follows the pattern used by popular crates
//! like `reqwest`, `serde_json`, and `csv`.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging
//!
//! Two conditions are deliberately *not* errors: a malformed timestamp on a
//! header-looking line (the parser recovers and counts it, see
//! [`ParseDiagnostics`](crate::parser::ParseDiagnostics)), and a sender filter
//! that matches nothing (every aggregate returns zeros/empty collections).

use std::io;

use thiserror::Error;

use crate::timestamp::TimestampError;

/// A specialized [`Result`] type for chatlens operations.
///
/// This type is broadly used across the library for any operation that
/// may produce an error.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::MessageTable;
///
/// fn my_function() -> Result<Option<MessageTable>> {
///     // ... operations that may fail
///     Ok(None)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
///
/// This enum represents all possible errors that can occur when using
/// chatlens. Each variant contains context about what went wrong and, where
/// applicable, the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The transcript file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing a report)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The transcript is not valid UTF-8.
    ///
    /// Fatal: no partial table is produced. Exports are UTF-8 by
    /// definition, so this usually means the wrong file was supplied.
    #[error("transcript is not valid UTF-8 ({context}): {source}")]
    Encoding {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::str::Utf8Error,
    },

    /// No recognizable header line was found in the whole input.
    ///
    /// This occurs when:
    /// - The file is not a chat export at all
    /// - The export uses a date convention outside the header grammar
    /// - The file is empty or contains only free-form text
    #[error("unrecognized transcript format: {message}")]
    Format {
        /// Description of what's wrong
        message: String,
    },

    /// A raw date/time prefix failed normalization.
    ///
    /// Only surfaced when the normalizer is called directly; during a full
    /// parse the offending line is recovered as a continuation or discarded,
    /// and counted in the diagnostics instead.
    #[error("timestamp error: {0}")]
    Timestamp(#[from] TimestampError),

    /// The transcript exceeds the configured size guard.
    ///
    /// Raised by the file entry point before any bytes are read, so an
    /// oversized upload never allocates its own length.
    #[error("transcript too large: {actual_bytes} bytes (maximum: {max_bytes} bytes)")]
    TranscriptTooLarge {
        /// Maximum allowed size in bytes
        max_bytes: u64,
        /// Actual size encountered
        actual_bytes: u64,
    },

    /// The requested report format was compiled out.
    ///
    /// Raised when a report is rendered in a format whose cargo feature is
    /// disabled.
    #[error("report format '{format}' requires the '{feature}' feature")]
    UnsupportedFormat {
        /// The format that was requested
        format: &'static str,
        /// The cargo feature that provides it
        feature: &'static str,
    },

    /// CSV writing error.
    ///
    /// This can occur when writing a report in CSV format.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    ///
    /// This can occur when writing a report in JSON format.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Encoding {
            context: "transcript decoding".to_string(),
            source: err.utf8_error(),
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates a format error for a transcript with no header lines.
    pub fn format_error(message: impl Into<String>) -> Self {
        ChatlensError::Format {
            message: message.into(),
        }
    }

    /// Creates an encoding error with context.
    pub fn encoding(context: impl Into<String>, source: std::str::Utf8Error) -> Self {
        ChatlensError::Encoding {
            context: context.into(),
            source,
        }
    }

    /// Creates a transcript-too-large error.
    pub fn transcript_too_large(max_bytes: u64, actual_bytes: u64) -> Self {
        ChatlensError::TranscriptTooLarge {
            max_bytes,
            actual_bytes,
        }
    }

    /// Creates an error for a report format whose feature is disabled.
    pub fn unsupported_format(format: &'static str, feature: &'static str) -> Self {
        ChatlensError::UnsupportedFormat { format, feature }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is an encoding error.
    pub fn is_encoding(&self) -> bool {
        matches!(self, ChatlensError::Encoding { .. })
    }

    /// Returns `true` if this is a format error.
    pub fn is_format(&self) -> bool {
        matches!(self, ChatlensError::Format { .. })
    }

    /// Returns `true` if this is a timestamp error.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, ChatlensError::Timestamp(_))
    }

    /// Returns `true` if this is a size-guard error.
    pub fn is_too_large(&self) -> bool {
        matches!(self, ChatlensError::TranscriptTooLarge { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
