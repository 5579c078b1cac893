//! Assembled analysis reports and their rendering.
//!
//! [`ChatReport`] runs every aggregate once over a `(table, filter)` pair
//! and holds the results as plain data. Rendering is a separate step:
//! the `Display` impl gives a human-readable text summary, and the
//! feature-gated [`to_format_string`](ChatReport::to_format_string) method
//! produces JSON (`json-output`) or long-format CSV (`csv-output`).
//!
//! # Example
//!
//! ```
//! use chatlens::{AnalysisConfig, ChatReport, SenderFilter, TranscriptParser};
//! use chatlens::analytics::{StopWords, UnicodeEmojiClassifier};
//!
//! let table = TranscriptParser::new().parse_str(
//!     "12/08/23, 14:05 - Alice: Hello there\n12/08/23, 14:06 - Bob: Hi Alice!",
//! )?;
//!
//! let report = ChatReport::build(
//!     &table,
//!     &SenderFilter::Overall,
//!     &StopWords::english(),
//!     &UnicodeEmojiClassifier,
//!     &AnalysisConfig::new(),
//! );
//!
//! assert_eq!(report.stats.message_count, 2);
//! println!("{report}");
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::{
    ActivityHeatmap, BusyUsers, ChatStats, EmojiClassifier, StopWords, daily_timeline,
    emoji_frequencies, fetch_stats, month_activity_map, monthly_timeline, most_busy_users,
    most_common_words, week_activity_map,
};
use crate::config::AnalysisConfig;
use crate::error::{ChatlensError, Result};
use crate::parser::ParseDiagnostics;
use crate::table::{MessageTable, SenderFilter};

/// Rendering target for a [`ChatReport`].
///
/// # Example
///
/// ```rust
/// use chatlens::report::ReportFormat;
/// use std::str::FromStr;
///
/// let format = ReportFormat::from_str("json").unwrap();
/// assert_eq!(format, ReportFormat::Json);
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ReportFormat {
    /// Human-readable text summary (default).
    #[default]
    Text,

    /// Pretty-printed JSON object, one key per aggregate.
    Json,

    /// Long-format CSV with `section,label,value` rows.
    Csv,
}

impl ReportFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json", "csv"]
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "JSON"),
            ReportFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                ReportFormat::all_names().join(", ")
            )),
        }
    }
}

/// Every aggregate for one `(table, filter)` pair, computed once.
///
/// `busy_users` is present only for the `Overall` filter; the ranking is an
/// all-senders aggregate and has nothing to say about a single-sender view.
/// `top_emojis` is the emoji frequency list truncated for display to
/// `AnalysisConfig::top_emojis` entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReport {
    /// Display name of the filter the report was computed for.
    pub filter: String,

    /// Headline counters.
    pub stats: ChatStats,

    /// `("<MonthName> <Year>", count)` pairs, chronological.
    pub monthly_timeline: Vec<(String, usize)>,

    /// `(date, count)` pairs, chronological.
    pub daily_timeline: Vec<(NaiveDate, usize)>,

    /// Counts per weekday, Monday through Sunday.
    pub week_activity: Vec<(&'static str, usize)>,

    /// Counts per calendar month, January through December, all years
    /// folded together.
    pub month_activity: Vec<(&'static str, usize)>,

    /// Weekday by hour grid.
    pub heatmap: ActivityHeatmap,

    /// Sender ranking; `None` unless the filter is `Overall`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busy_users: Option<BusyUsers>,

    /// Most frequent words after stop-word removal.
    pub top_words: Vec<(String, usize)>,

    /// Most frequent emoji, truncated for display.
    pub top_emojis: Vec<(String, usize)>,

    /// Parse anomalies carried over from the table.
    pub diagnostics: ParseDiagnostics,
}

impl ChatReport {
    /// Runs every aggregate and assembles the report.
    pub fn build(
        table: &MessageTable,
        filter: &SenderFilter,
        stopwords: &StopWords,
        classifier: &dyn EmojiClassifier,
        config: &AnalysisConfig,
    ) -> Self {
        let mut top_emojis = emoji_frequencies(table, filter, classifier);
        top_emojis.truncate(config.top_emojis);

        Self {
            filter: filter.to_string(),
            stats: fetch_stats(table, filter),
            monthly_timeline: monthly_timeline(table, filter),
            daily_timeline: daily_timeline(table, filter),
            week_activity: week_activity_map(table, filter),
            month_activity: month_activity_map(table, filter),
            heatmap: ActivityHeatmap::compute(table, filter),
            busy_users: filter
                .is_overall()
                .then(|| most_busy_users(table, config)),
            top_words: most_common_words(table, filter, stopwords, config),
            top_emojis,
            diagnostics: table.diagnostics(),
        }
    }

    /// Renders the report in the requested format.
    ///
    /// # Errors
    ///
    /// [`ChatlensError::UnsupportedFormat`] if the format's cargo feature is
    /// disabled; serialization errors from the underlying writer otherwise.
    pub fn to_format_string(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.to_string()),
            #[cfg(feature = "json-output")]
            ReportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            #[cfg(feature = "csv-output")]
            ReportFormat::Csv => self.to_csv_string(),
            #[allow(unreachable_patterns)]
            _ => Err(ChatlensError::unsupported_format(
                match format {
                    ReportFormat::Json => "json",
                    _ => "csv",
                },
                match format {
                    ReportFormat::Json => "json-output",
                    _ => "csv-output",
                },
            )),
        }
    }

    /// Renders the report and writes it to a file.
    ///
    /// # Errors
    ///
    /// As [`to_format_string`](Self::to_format_string), plus
    /// [`ChatlensError::Io`] on write failure.
    pub fn write_to_path(&self, path: impl AsRef<Path>, format: ReportFormat) -> Result<()> {
        let rendered = self.to_format_string(format)?;
        fs::write(path, rendered)?;
        Ok(())
    }

    /// Long-format CSV: a `section,label,value` row per datum.
    #[cfg(feature = "csv-output")]
    fn to_csv_string(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.write_record(["section", "label", "value"])?;

        writer.write_record(["summary", "filter", &self.filter])?;
        let stat_rows = [
            ("message_count", self.stats.message_count),
            ("word_count", self.stats.word_count),
            ("media_count", self.stats.media_count),
            ("link_count", self.stats.link_count),
        ];
        for (label, value) in stat_rows {
            writer.write_record(["stats", label, &value.to_string()])?;
        }

        for (label, count) in &self.monthly_timeline {
            writer.write_record(["monthly_timeline", label, &count.to_string()])?;
        }
        for (date, count) in &self.daily_timeline {
            writer.write_record(["daily_timeline", &date.to_string(), &count.to_string()])?;
        }
        for (label, count) in &self.week_activity {
            writer.write_record(["week_activity", label, &count.to_string()])?;
        }
        for (label, count) in &self.month_activity {
            writer.write_record(["month_activity", label, &count.to_string()])?;
        }

        for (weekday, cells) in self.heatmap.rows() {
            for (hour, count) in cells.iter().enumerate() {
                let label = format!(
                    "{} {}",
                    weekday,
                    crate::message::hour_bucket_label(hour as u32)
                );
                writer.write_record(["heatmap", &label, &count.to_string()])?;
            }
        }

        if let Some(busy) = &self.busy_users {
            for (sender, count) in &busy.top {
                writer.write_record(["busy_users", sender, &count.to_string()])?;
            }
            for share in &busy.shares {
                writer.write_record([
                    "sender_share",
                    &share.sender,
                    &share.percentage.to_string(),
                ])?;
            }
        }

        for (word, count) in &self.top_words {
            writer.write_record(["top_words", word, &count.to_string()])?;
        }
        for (emoji, count) in &self.top_emojis {
            writer.write_record(["top_emojis", emoji, &count.to_string()])?;
        }

        writer.write_record([
            "diagnostics",
            "leading_skipped",
            &self.diagnostics.leading_skipped.to_string(),
        ])?;
        writer.write_record([
            "diagnostics",
            "timestamp_failures",
            &self.diagnostics.timestamp_failures.to_string(),
        ])?;

        let bytes = writer
            .into_inner()
            .map_err(|e| ChatlensError::Io(e.into_error()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl fmt::Display for ChatReport {
    /// Text summary. The daily timeline is carried only by the structured
    /// formats; the text view shows the monthly trend instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Chat analysis for {}", self.filter)?;
        writeln!(f, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(f, "   Messages:  {}", self.stats.message_count)?;
        writeln!(f, "   Words:     {}", self.stats.word_count)?;
        writeln!(f, "   Media:     {}", self.stats.media_count)?;
        writeln!(f, "   Links:     {}", self.stats.link_count)?;

        if let Some(busy) = &self.busy_users {
            writeln!(f)?;
            writeln!(f, "🏆 Busiest senders")?;
            if busy.shares.is_empty() {
                writeln!(f, "   (none)")?;
            }
            for (rank, share) in busy.shares.iter().take(busy.top.len()).enumerate() {
                writeln!(
                    f,
                    "   {}. {:<24} {:>6}  {}%",
                    rank + 1,
                    share.sender,
                    share.count,
                    share.percentage
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "📅 Monthly timeline")?;
        if self.monthly_timeline.is_empty() {
            writeln!(f, "   (none)")?;
        }
        for (label, count) in &self.monthly_timeline {
            writeln!(f, "   {label:<24} {count:>6}")?;
        }

        writeln!(f)?;
        writeln!(f, "📆 Activity by weekday")?;
        for (label, count) in &self.week_activity {
            writeln!(f, "   {label:<24} {count:>6}")?;
        }

        writeln!(f)?;
        writeln!(f, "🕐 Activity heatmap")?;
        write!(f, "   {:<10}", "")?;
        for hour in 0..24 {
            write!(f, "{hour:>4}")?;
        }
        writeln!(f)?;
        for (weekday, cells) in self.heatmap.rows() {
            write!(f, "   {weekday:<10}")?;
            for count in cells {
                if *count == 0 {
                    write!(f, "{:>4}", ".")?;
                } else {
                    write!(f, "{count:>4}")?;
                }
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        writeln!(f, "🔤 Top words")?;
        if self.top_words.is_empty() {
            writeln!(f, "   (none)")?;
        }
        for (word, count) in &self.top_words {
            writeln!(f, "   {word:<24} {count:>6}")?;
        }

        writeln!(f)?;
        writeln!(f, "😀 Top emojis")?;
        if self.top_emojis.is_empty() {
            writeln!(f, "   (none)")?;
        }
        for (emoji, count) in &self.top_emojis {
            writeln!(f, "   {emoji:<24} {count:>6}")?;
        }

        if !self.diagnostics.is_clean() {
            writeln!(f)?;
            writeln!(
                f,
                "⚠️  Parse diagnostics: {} leading line(s) skipped, {} timestamp failure(s)",
                self.diagnostics.leading_skipped, self.diagnostics.timestamp_failures
            )?;
        }

        Ok(())
    }
}
