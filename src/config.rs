//! Configuration types for parsing and analytics.
//!
//! This module provides clean configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! Two concerns, two structs:
//!
//! - [`ParseConfig`] - transcript parsing settings (date order, media
//!   placeholders, size guard)
//! - [`AnalysisConfig`] - aggregate display constants (top-N/K cutoffs,
//!   percentage rounding)
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{AnalysisConfig, ParseConfig};
//! use chatlens::timestamp::DateOrder;
//!
//! let parse = ParseConfig::new()
//!     .with_date_order(DateOrder::MonthFirst)
//!     .with_media_placeholder("<Medien ausgeschlossen>");
//!
//! let analysis = AnalysisConfig::new().with_top_words(50);
//! ```

use serde::{Deserialize, Serialize};

use crate::timestamp::DateOrder;

/// Configuration for transcript parsing.
///
/// Exports are TXT files whose header lines follow a locale-dependent
/// date/time prefix. This config pins the date convention and the media
/// placeholder tokens the export tool substitutes for attachments.
///
/// # Example
///
/// ```rust
/// use chatlens::config::ParseConfig;
/// use chatlens::timestamp::DateOrder;
///
/// let config = ParseConfig::new()
///     .with_date_order(DateOrder::DayFirst)
///     .with_max_transcript_bytes(16 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Date field order in the header prefix (default: day-first)
    pub date_order: DateOrder,

    /// Bodies equal to any of these tokens (after trimming) mark media
    /// messages (default: `["<Media omitted>"]`)
    pub media_placeholders: Vec<String>,

    /// Reject transcript files larger than this many bytes (default: 100MB)
    pub max_transcript_bytes: u64,

    /// Read buffer size for file parsing (default: 64KB)
    pub buffer_size: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            date_order: DateOrder::DayFirst,
            media_placeholders: vec!["<Media omitted>".to_string()],
            max_transcript_bytes: 100 * 1024 * 1024, // 100MB
            buffer_size: 64 * 1024,                  // 64KB
        }
    }
}

impl ParseConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration for month-first (US) exports.
    pub fn month_first() -> Self {
        Self {
            date_order: DateOrder::MonthFirst,
            ..Self::default()
        }
    }

    /// Sets the date field order.
    #[must_use]
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Adds a media placeholder token to the recognized set.
    ///
    /// Localized exports substitute localized placeholders; add them here
    /// instead of patching the parser.
    #[must_use]
    pub fn with_media_placeholder(mut self, token: impl Into<String>) -> Self {
        self.media_placeholders.push(token.into());
        self
    }

    /// Replaces the media placeholder set wholesale.
    #[must_use]
    pub fn with_media_placeholders(mut self, tokens: Vec<String>) -> Self {
        self.media_placeholders = tokens;
        self
    }

    /// Sets the maximum accepted transcript file size.
    #[must_use]
    pub fn with_max_transcript_bytes(mut self, bytes: u64) -> Self {
        self.max_transcript_bytes = bytes;
        self
    }

    /// Sets the read buffer size for file parsing.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Returns `true` if a trimmed body equals one of the placeholder tokens.
    pub(crate) fn is_media_placeholder(&self, body: &str) -> bool {
        let trimmed = body.trim();
        self.media_placeholders.iter().any(|t| t == trimmed)
    }
}

/// Display constants for the analytics layer.
///
/// Named, overridable versions of the usual report cutoffs: top 5 senders,
/// top 20 words, top 10 emoji, percentages to 2 decimal places.
///
/// # Example
///
/// ```rust
/// use chatlens::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new()
///     .with_top_senders(3)
///     .with_percent_decimals(1);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of senders in the busiest-senders ranking (default: 5)
    pub top_senders: usize,

    /// Number of words in the common-words ranking (default: 20)
    pub top_words: usize,

    /// Number of emoji shown in report output (default: 10)
    pub top_emojis: usize,

    /// Decimal places for sender share percentages (default: 2)
    pub percent_decimals: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_senders: 5,
            top_words: 20,
            top_emojis: 10,
            percent_decimals: 2,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the busiest-senders ranking size.
    #[must_use]
    pub fn with_top_senders(mut self, n: usize) -> Self {
        self.top_senders = n;
        self
    }

    /// Sets the common-words ranking size.
    #[must_use]
    pub fn with_top_words(mut self, k: usize) -> Self {
        self.top_words = k;
        self
    }

    /// Sets the emoji display count for reports.
    #[must_use]
    pub fn with_top_emojis(mut self, k: usize) -> Self {
        self.top_emojis = k;
        self
    }

    /// Sets the percentage rounding precision.
    #[must_use]
    pub fn with_percent_decimals(mut self, decimals: u32) -> Self {
        self.percent_decimals = decimals;
        self
    }
}
