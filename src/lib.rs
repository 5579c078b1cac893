//! # Chatlens
//!
//! A Rust library for parsing WhatsApp-style chat exports into structured
//! message tables and computing deterministic analytics over them.
//!
//! ## Overview
//!
//! Chat export TXT files interleave three kinds of lines: message headers
//! (`12/08/23, 14:05 - Alice: Hello`), continuation lines belonging to the
//! previous message, and system notifications with no sender. Chatlens turns
//! such a transcript into a [`MessageTable`] and answers questions about it:
//! message and word counts, activity timelines, sender rankings, word and
//! emoji frequencies. Every aggregate accepts a [`SenderFilter`] so the same
//! question can be asked chat-wide or per participant, and every result is
//! deterministic, with documented tie-breaking.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let table = TranscriptParser::new().parse_str(
//!         "12/08/23, 14:05 - Alice: Hello there!\n\
//!          12/08/23, 14:06 - Bob: Hi Alice 🍕",
//!     )?;
//!
//!     let stats = fetch_stats(&table, &SenderFilter::Overall);
//!     assert_eq!(stats.message_count, 2);
//!
//!     let report = ChatReport::build(
//!         &table,
//!         &SenderFilter::Overall,
//!         &StopWords::english(),
//!         &UnicodeEmojiClassifier,
//!         &AnalysisConfig::new(),
//!     );
//!     println!("{report}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Large Files
//!
//! [`TranscriptParser::parse_path`] streams line by line through a buffered
//! reader and never materializes the raw transcript, so memory scales with
//! the message table, not the file. A configurable size guard
//! ([`ParseConfig::max_transcript_bytes`](config::ParseConfig)) rejects
//! oversized inputs before any read happens.
//!
//! ## Module Structure
//!
//! - [`parser`]: transcript scanning
//!   - [`TranscriptParser`]: line scanner with multi-line accumulation
//!   - [`ParseDiagnostics`]: skipped-line and bad-timestamp counters
//! - [`message`]: [`ChatMessage`] and its derived calendar fields
//! - [`table`]: [`MessageTable`], [`SenderFilter`]
//! - [`analytics`]: the aggregate functions
//!   - [`fetch_stats`](analytics::fetch_stats), [`monthly_timeline`](analytics::monthly_timeline),
//!     [`most_busy_users`](analytics::most_busy_users), [`most_common_words`](analytics::most_common_words),
//!     [`emoji_frequencies`](analytics::emoji_frequencies), [`ActivityHeatmap`](analytics::ActivityHeatmap)
//! - [`report`]: [`ChatReport`] assembly and rendering ([`ReportFormat`])
//! - [`config`]: [`ParseConfig`], [`AnalysisConfig`]
//! - [`timestamp`]: header timestamp parsing ([`DateOrder`](timestamp::DateOrder))
//! - [`error`]: unified error types ([`ChatlensError`], [`Result`])
//! - [`cli`]: argument types for the binary (feature `cli`)
//! - [`prelude`]: convenient re-exports
//!
//! ## Cargo Features
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `full` | yes | Everything below |
//! | `json-output` | via `full` | [`ReportFormat::Json`] rendering (pulls `serde_json`) |
//! | `csv-output` | via `full` | [`ReportFormat::Csv`] rendering (pulls `csv`) |
//! | `cli` | via `full` | The `chatlens` binary (pulls `clap`) |

pub mod analytics;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod message;
pub mod parser;
pub mod report;
pub mod table;
pub mod timestamp;

// Re-export the main types at the crate root for convenience
pub use config::{AnalysisConfig, ParseConfig};
pub use error::{ChatlensError, Result};
pub use message::ChatMessage;
pub use parser::{ParseDiagnostics, TranscriptParser};
pub use report::{ChatReport, ReportFormat};
pub use table::{MessageTable, OVERALL_LABEL, SenderFilter};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    // Core table types
    pub use crate::message::ChatMessage;
    pub use crate::table::{MessageTable, OVERALL_LABEL, SenderFilter};

    // Error types
    pub use crate::error::{ChatlensError, Result};

    // Parsing
    pub use crate::parser::{ParseDiagnostics, TranscriptParser};
    pub use crate::timestamp::DateOrder;

    // Configuration
    pub use crate::config::{AnalysisConfig, ParseConfig};

    // Aggregates
    pub use crate::analytics::{
        ActivityHeatmap, BusyUsers, ChatStats, EmojiClassifier, SenderShare, StopWords,
        UnicodeEmojiClassifier, activity_heatmap, daily_timeline, emoji_frequencies, fetch_stats,
        month_activity_map, monthly_timeline, most_busy_users, most_common_words,
        week_activity_map,
    };

    // Report assembly and rendering
    pub use crate::report::{ChatReport, ReportFormat};
}
