//! The parsed message record.
//!
//! This module provides [`ChatMessage`], the immutable record produced by the
//! transcript parser. Every analytics function consumes these records through
//! a [`MessageTable`](crate::table::MessageTable), never raw text.
//!
//! # Overview
//!
//! A message consists of:
//! - **Required**: `timestamp`, `body`, `sequence_index`
//! - **Optional**: `sender` (absent for system notifications)
//! - **Flags**: `is_media`, `is_notification`
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use chatlens::ChatMessage;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 8, 12).unwrap().and_hms_opt(14, 5, 0).unwrap();
//! let msg = ChatMessage::new(ts, "Alice", "Hello there");
//! assert_eq!(msg.sender(), Some("Alice"));
//! assert_eq!(msg.body(), "Hello there");
//! assert!(!msg.is_notification());
//! ```
//!
//! ## Derived labels
//!
//! ```
//! use chatlens::ChatMessage;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 8, 12).unwrap().and_hms_opt(23, 40, 0).unwrap();
//! let msg = ChatMessage::new(ts, "Alice", "night owl");
//! assert_eq!(msg.month_label(), "August 2023");
//! assert_eq!(msg.weekday_name(), "Saturday");
//! assert_eq!(msg.hour_bucket(), "23-0");
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatlens::ChatMessage;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 8, 12).unwrap().and_hms_opt(14, 5, 0).unwrap();
//! let msg = ChatMessage::notification(ts, "Alice added Bob");
//! let json = serde_json::to_string(&msg)?;
//!
//! // sender is omitted (None)
//! assert!(!json.contains("sender"));
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Formats an hour of day as the left-closed heatmap bucket label.
///
/// Hour 14 becomes `"14-15"`; the last bucket wraps: hour 23 becomes
/// `"23-0"`.
///
/// # Example
///
/// ```rust
/// use chatlens::message::hour_bucket_label;
///
/// assert_eq!(hour_bucket_label(0), "0-1");
/// assert_eq!(hour_bucket_label(23), "23-0");
/// ```
pub fn hour_bucket_label(hour: u32) -> String {
    format!("{}-{}", hour, (hour + 1) % 24)
}

/// One parsed message from a chat transcript.
///
/// Created once at parse time and never mutated; aggregates read them through
/// shared references. Rows are totally ordered by `(timestamp, sequence_index)`.
/// A malformed export may carry out-of-order timestamps, and those are
/// preserved as-is, with the sequence index keeping the original parse order
/// as tie-break.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Header date/time; exports carry no timezone |
/// | `sender` | `Option<String>` | Author name; `None` for system notifications |
/// | `body` | `String` | Full text, continuation lines joined with `'\n'` |
/// | `is_media` | `bool` | Body was a media placeholder at flush time |
/// | `is_notification` | `bool` | Header had no `": "` sender delimiter |
/// | `sequence_index` | `usize` | Position in parse order |
///
/// # Serialization
///
/// Implements `Serialize` and `Deserialize`:
/// - `sender` is omitted from JSON when `None`
/// - Timestamps use ISO 8601 without offset (`2023-08-12T14:05:00`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// When the message was sent, local to the exporting device.
    pub timestamp: NaiveDateTime,

    /// Author name, exactly as exported.
    ///
    /// `None` for system notifications (group events, encryption banners),
    /// which have no selectable author.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender: Option<String>,

    /// Text content of the message.
    ///
    /// Multiline messages keep their newlines: each continuation line from
    /// the transcript is joined with `'\n'`.
    pub body: String,

    /// `true` if the body equals a recognized media placeholder.
    pub is_media: bool,

    /// `true` if this row is a system notification rather than a user
    /// message.
    pub is_notification: bool,

    /// Position in parse order; stable tie-break for equal timestamps.
    pub sequence_index: usize,
}

impl ChatMessage {
    /// Creates a user message.
    ///
    /// Flags default to `false` and the sequence index to 0; the parser
    /// assigns the index via [`with_sequence_index`](Self::with_sequence_index).
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::ChatMessage;
    /// use chrono::NaiveDate;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2023, 8, 12).unwrap().and_hms_opt(14, 5, 0).unwrap();
    /// let msg = ChatMessage::new(ts, "Alice", "Hello!");
    /// assert_eq!(msg.sender(), Some("Alice"));
    /// assert!(!msg.is_media());
    /// ```
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: Some(sender.into()),
            body: body.into(),
            is_media: false,
            is_notification: false,
            sequence_index: 0,
        }
    }

    /// Creates a system notification (no sender).
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::ChatMessage;
    /// use chrono::NaiveDate;
    ///
    /// let ts = NaiveDate::from_ymd_opt(2023, 8, 12).unwrap().and_hms_opt(14, 9, 0).unwrap();
    /// let msg = ChatMessage::notification(ts, "Alice added Bob");
    /// assert!(msg.is_notification());
    /// assert!(msg.sender().is_none());
    /// ```
    pub fn notification(timestamp: NaiveDateTime, body: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: None,
            body: body.into(),
            is_media: false,
            is_notification: true,
            sequence_index: 0,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the parse-order index.
    #[must_use]
    pub fn with_sequence_index(mut self, index: usize) -> Self {
        self.sequence_index = index;
        self
    }

    /// Builder method to set the media flag.
    ///
    /// The parser sets this at flush time by comparing the trimmed body
    /// against the configured placeholder tokens.
    #[must_use]
    pub fn with_media(mut self, is_media: bool) -> Self {
        self.is_media = is_media;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the sender name, if this is a user message.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` if the body was a media placeholder.
    pub fn is_media(&self) -> bool {
        self.is_media
    }

    /// Returns `true` if this row is a system notification.
    pub fn is_notification(&self) -> bool {
        self.is_notification
    }

    /// Returns the parse-order index.
    pub fn sequence_index(&self) -> usize {
        self.sequence_index
    }

    // =========================================================================
    // Derived labels (computed, not stored)
    // =========================================================================

    /// The calendar date of the message.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Month label in `"<MonthName> <Year>"` form, e.g. `"August 2023"`.
    pub fn month_label(&self) -> String {
        self.timestamp.format("%B %Y").to_string()
    }

    /// Full weekday name, e.g. `"Saturday"`.
    pub fn weekday_name(&self) -> &'static str {
        weekday_label(self.timestamp.weekday())
    }

    /// Hour-bucket label for the heatmap, e.g. `"14-15"` or `"23-0"`.
    pub fn hour_bucket(&self) -> String {
        hour_bucket_label(self.timestamp.hour())
    }
}

/// Full name for a weekday.
pub(crate) fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
