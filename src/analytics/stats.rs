//! Headline counters: messages, words, media, links.
//!
//! # Example
//!
//! ```
//! use chatlens::{SenderFilter, TranscriptParser};
//! use chatlens::analytics::fetch_stats;
//!
//! let table = TranscriptParser::new().parse_str(
//!     "12/08/23, 14:05 - Alice: Hello there\n12/08/23, 14:06 - Bob: Hi Alice!",
//! )?;
//!
//! let stats = fetch_stats(&table, &SenderFilter::Overall);
//! assert_eq!(stats.message_count, 2);
//! assert_eq!(stats.word_count, 4);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::Serialize;

use crate::message::ChatMessage;
use crate::table::{MessageTable, SenderFilter};

/// Matches one URL occurrence: an `http(s)://` or bare `www.` form.
const URL_PATTERN: &str = r"(?i)\bhttps?://\S+|\bwww\.[^\s]+";

fn url_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(URL_PATTERN).expect("url regex"))
}

/// Scalar counts for one filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChatStats {
    /// Rows in the view, notifications included under `Overall`.
    pub message_count: usize,

    /// Whitespace-delimited tokens summed over bodies. Media placeholder
    /// rows contribute zero; their body is tool-substituted text, not words
    /// anyone typed.
    pub word_count: usize,

    /// Rows whose body was a media placeholder.
    pub media_count: usize,

    /// URL occurrences summed over bodies. A body with two links counts
    /// twice.
    pub link_count: usize,
}

/// Words a single row contributes to `word_count`.
pub(crate) fn message_word_count(msg: &ChatMessage) -> usize {
    if msg.is_media() {
        0
    } else {
        msg.body().split_whitespace().count()
    }
}

/// URL occurrences in a single row's body.
pub(crate) fn message_link_count(msg: &ChatMessage) -> usize {
    url_re().find_iter(msg.body()).count()
}

/// Computes the scalar counts for a filtered view.
///
/// Pure function of `(table, filter)`. An empty view yields all zeros.
pub fn fetch_stats(table: &MessageTable, filter: &SenderFilter) -> ChatStats {
    let mut stats = ChatStats::default();
    for msg in table.filtered(filter) {
        stats.message_count += 1;
        stats.word_count += message_word_count(msg);
        if msg.is_media() {
            stats.media_count += 1;
        }
        stats.link_count += message_link_count(msg);
    }
    stats
}
