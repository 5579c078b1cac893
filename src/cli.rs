//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Report format options
//!
//! The argument struct converts into the library's plain config types, so
//! the binary stays a thin shell around [`crate::report::ChatReport`].
//!
//! ```rust
//! use chatlens::cli::OutputFormat;
//! use chatlens::report::ReportFormat;
//!
//! let format = OutputFormat::Json;
//! assert_eq!(ReportFormat::from(format), ReportFormat::Json);
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, ParseConfig};
use crate::table::SenderFilter;

/// Analyze WhatsApp-style chat exports: message statistics, activity
/// timelines, sender rankings, word and emoji frequencies.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens chat.txt
    chatlens chat.txt --user Alice
    chatlens chat.txt --format json -o report.json
    chatlens chat.txt --month-first --top-words 50
    chatlens chat.txt --stopwords german_stopwords.txt")]
pub struct Args {
    /// Path to the exported chat TXT file
    pub input: String,

    /// Analyze a single sender instead of the whole chat
    #[arg(short, long, value_name = "NAME")]
    pub user: Option<String>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Treat header dates as month-first (US-locale exports)
    #[arg(long)]
    pub month_first: bool,

    /// Extra media placeholder token, in addition to "<Media omitted>"
    /// (repeatable)
    #[arg(long, value_name = "TOKEN")]
    pub media_placeholder: Vec<String>,

    /// Read stop words from a file (one word per line, '#' comments)
    /// instead of the built-in English list
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<String>,

    /// Number of senders in the busiest-senders ranking
    #[arg(long, value_name = "N")]
    pub top_senders: Option<usize>,

    /// Number of entries in the word frequency list
    #[arg(long, value_name = "N")]
    pub top_words: Option<usize>,

    /// Number of entries in the emoji frequency list
    #[arg(long, value_name = "N")]
    pub top_emojis: Option<usize>,
}

impl Args {
    /// Filter derived from `--user`; the whole chat when absent.
    pub fn sender_filter(&self) -> SenderFilter {
        match &self.user {
            Some(name) => SenderFilter::from_display_name(name),
            None => SenderFilter::Overall,
        }
    }

    /// Parsing configuration derived from the date and media flags.
    pub fn parse_config(&self) -> ParseConfig {
        let mut config = if self.month_first {
            ParseConfig::month_first()
        } else {
            ParseConfig::new()
        };
        for token in &self.media_placeholder {
            config = config.with_media_placeholder(token.clone());
        }
        config
    }

    /// Analysis configuration with the `--top-*` overrides applied.
    pub fn analysis_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::new();
        if let Some(n) = self.top_senders {
            config = config.with_top_senders(n);
        }
        if let Some(k) = self.top_words {
            config = config.with_top_words(k);
        }
        if let Some(k) = self.top_emojis {
            config = config.with_top_emojis(k);
        }
        config
    }
}

/// Report format options.
///
/// Mirrors [`crate::report::ReportFormat`] with a clap [`ValueEnum`]
/// derive, keeping the CLI framework out of the library types.
///
/// # Example
///
/// ```rust
/// use chatlens::cli::OutputFormat;
///
/// let format = OutputFormat::Csv;
/// println!("Extension: {}", format.extension()); // "csv"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text summary (default)
    #[default]
    #[value(alias = "txt")]
    Text,

    /// Pretty-printed JSON object
    Json,

    /// Long-format CSV with section,label,value rows
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        crate::report::ReportFormat::from(*self).extension()
    }

    /// Returns all supported format names (including aliases).
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json", "csv"]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

// Conversion to the library format type
impl From<OutputFormat> for crate::report::ReportFormat {
    fn from(format: OutputFormat) -> crate::report::ReportFormat {
        match format {
            OutputFormat::Text => crate::report::ReportFormat::Text,
            OutputFormat::Json => crate::report::ReportFormat::Json,
            OutputFormat::Csv => crate::report::ReportFormat::Csv,
        }
    }
}
