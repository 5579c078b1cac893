//! The parsed transcript: an ordered, immutable message table.
//!
//! [`MessageTable`] is what the parser hands back and what every aggregate
//! consumes. It owns the rows in parse order together with the
//! [`ParseDiagnostics`] recorded while scanning. [`SenderFilter`] selects the
//! rows an aggregate sees, either the whole table or a single author.
//!
//! # Examples
//!
//! ## Listing selectable senders
//!
//! ```
//! use chatlens::TranscriptParser;
//!
//! let table = TranscriptParser::new().parse_str(
//!     "12/08/23, 14:05 - Bob: hi\n\
//!      12/08/23, 14:06 - Alice: hello\n\
//!      12/08/23, 14:09 - Alice added Carol",
//! )?;
//!
//! // "Overall" first, then authors sorted ascending. The notification
//! // row has no author and contributes nothing to the list.
//! assert_eq!(table.sender_list(), vec!["Overall", "Alice", "Bob"]);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```
//!
//! ## Filtering
//!
//! ```
//! use chatlens::{SenderFilter, TranscriptParser};
//!
//! let table = TranscriptParser::new().parse_str(
//!     "12/08/23, 14:05 - Bob: hi\n12/08/23, 14:06 - Alice: hello",
//! )?;
//!
//! let filter = SenderFilter::sender("Bob");
//! let bobs: Vec<_> = table.filtered(&filter).collect();
//! assert_eq!(bobs.len(), 1);
//! assert_eq!(bobs[0].body(), "hi");
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::message::ChatMessage;
use crate::parser::ParseDiagnostics;

/// Display name of the pseudo-sender that selects every row.
pub const OVERALL_LABEL: &str = "Overall";

/// Row selection for aggregates.
///
/// `Overall` selects every row, system notifications included. `Sender`
/// selects the rows of one author by exact string comparison; names are
/// compared exactly as exported, case and all.
///
/// A filter naming an unknown sender is not an error: it selects zero rows
/// and every aggregate over it is empty or zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SenderFilter {
    /// All rows, notifications included.
    #[default]
    Overall,

    /// Rows whose sender equals the given name exactly.
    Sender(String),
}

impl SenderFilter {
    /// Creates a filter for one author.
    pub fn sender(name: impl Into<String>) -> Self {
        SenderFilter::Sender(name.into())
    }

    /// Builds a filter from a display name, mapping the reserved
    /// [`OVERALL_LABEL`] to [`SenderFilter::Overall`].
    ///
    /// This is the inverse of the names produced by
    /// [`MessageTable::sender_list`].
    pub fn from_display_name(name: &str) -> Self {
        if name == OVERALL_LABEL {
            SenderFilter::Overall
        } else {
            SenderFilter::Sender(name.to_string())
        }
    }

    /// Returns `true` if the given message passes this filter.
    ///
    /// Notifications have no sender and therefore pass only `Overall`.
    pub fn matches(&self, msg: &ChatMessage) -> bool {
        match self {
            SenderFilter::Overall => true,
            SenderFilter::Sender(name) => msg.sender() == Some(name.as_str()),
        }
    }

    /// Returns `true` if this filter selects every row.
    pub fn is_overall(&self) -> bool {
        matches!(self, SenderFilter::Overall)
    }
}

impl fmt::Display for SenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderFilter::Overall => f.write_str(OVERALL_LABEL),
            SenderFilter::Sender(name) => f.write_str(name),
        }
    }
}

impl From<Option<String>> for SenderFilter {
    /// `None` selects everything; `Some(name)` goes through
    /// [`from_display_name`](Self::from_display_name).
    fn from(name: Option<String>) -> Self {
        match name {
            None => SenderFilter::Overall,
            Some(name) => SenderFilter::from_display_name(&name),
        }
    }
}

/// The parsed transcript as an ordered collection of rows.
///
/// Immutable once built: rows keep parse order, `sequence_index` equals
/// position, and re-running any aggregate over the same table gives the same
/// result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageTable {
    messages: Vec<ChatMessage>,
    diagnostics: ParseDiagnostics,
}

impl MessageTable {
    /// Builds a table from rows, assigning sequence indices by position.
    ///
    /// Useful for constructing tables in tests or from sources other than
    /// the transcript parser. Diagnostics start clean.
    pub fn new(mut messages: Vec<ChatMessage>) -> Self {
        for (index, msg) in messages.iter_mut().enumerate() {
            msg.sequence_index = index;
        }
        Self {
            messages,
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Assembles a table from parser output. Indices are already assigned.
    pub(crate) fn from_parts(messages: Vec<ChatMessage>, diagnostics: ParseDiagnostics) -> Self {
        Self {
            messages,
            diagnostics,
        }
    }

    /// Returns all rows in parse order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the diagnostics recorded while parsing.
    pub fn diagnostics(&self) -> ParseDiagnostics {
        self.diagnostics
    }

    /// Returns the number of rows, notifications included.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the table holds no rows.
    ///
    /// The transcript parser never produces an empty table, but [`new`](Self::new)
    /// accepts one.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Iterates over all rows.
    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }

    /// Iterates over the rows selected by a filter.
    pub fn filtered<'a>(
        &'a self,
        filter: &'a SenderFilter,
    ) -> impl Iterator<Item = &'a ChatMessage> {
        self.messages.iter().filter(move |msg| filter.matches(msg))
    }

    /// Returns the selectable sender names for this table.
    ///
    /// [`OVERALL_LABEL`] first, then every distinct author sorted ascending.
    /// Notification rows contribute nothing.
    pub fn sender_list(&self) -> Vec<String> {
        let distinct: BTreeSet<&str> = self
            .messages
            .iter()
            .filter_map(ChatMessage::sender)
            .collect();

        let mut list = Vec::with_capacity(distinct.len() + 1);
        list.push(OVERALL_LABEL.to_string());
        list.extend(distinct.into_iter().map(String::from));
        list
    }
}

impl<'a> IntoIterator for &'a MessageTable {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
