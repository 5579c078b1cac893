//! Deterministic aggregates over a parsed [`MessageTable`](crate::MessageTable).
//!
//! Every function in this tree is a pure read of `(table, filter)`: no
//! aggregate mutates the table or any shared state, computing one never
//! affects another, and running the same aggregate twice gives the same
//! answer. They may therefore run on independent threads without locking.
//!
//! | Module | Aggregate | Notifications | Media rows |
//! |--------|-----------|---------------|------------|
//! | [`stats`] | message/word/media/link counts | in view under `Overall` | counted, words zeroed |
//! | [`timeline`] | monthly, daily, weekday, month, heatmap | in view under `Overall` | counted |
//! | [`ranking`] | busiest senders with shares | always excluded | counted |
//! | [`words`] | top words after stop-word removal | excluded | excluded |
//! | [`emoji`] | emoji frequencies | included | included |
//!
//! "In view under `Overall`" means the general filter rule applies:
//! notifications have no sender, so any specific-sender filter drops them
//! naturally while `Overall` keeps them.

pub mod emoji;
pub mod ranking;
pub mod stats;
pub mod timeline;
pub mod words;

pub use emoji::{EmojiClassifier, UnicodeEmojiClassifier, emoji_frequencies};
pub use ranking::{BusyUsers, SenderShare, most_busy_users};
pub use stats::{ChatStats, fetch_stats};
pub use timeline::{
    ActivityHeatmap, activity_heatmap, daily_timeline, month_activity_map, monthly_timeline,
    week_activity_map,
};
pub use words::{StopWords, most_common_words};
