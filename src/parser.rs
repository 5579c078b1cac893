//! Transcript parsing: raw export text to an ordered [`MessageTable`].
//!
//! A WhatsApp-style export is a sequence of physical lines. A line either
//! *starts* a message (it carries a date/time header) or *continues* the
//! previous one (multiline bodies keep their newlines). This module walks the
//! lines once with an explicit two-state scanner and assembles the table.
//!
//! # Header grammar
//!
//! ```text
//! D?D/M?M/YY(YY), H?H:MM(:SS)?( AM/PM)? - rest
//! ```
//!
//! `rest` is split on the first `": "`; with no such delimiter the whole
//! remainder is a system notification and the row has no sender.
//!
//! # Recovery, not failure
//!
//! Three things are deliberately non-fatal and surface only in
//! [`ParseDiagnostics`]:
//! - lines before the first header (counted, discarded)
//! - header-shaped lines whose date/time fails normalization (treated as
//!   continuation or discarded, counted)
//! - blank lines (continuations inside a message, ignored before the first)
//!
//! Only a transcript with *zero* recognizable headers is rejected, with
//! [`ChatlensError::Format`].
//!
//! # Example
//!
//! ```rust
//! use chatlens::TranscriptParser;
//!
//! let transcript = "\
//! 12/08/23, 14:05 - Alice: Hello there
//! this is a test
//! 12/08/23, 14:06 - Bob: Hi Alice!";
//!
//! let table = TranscriptParser::new().parse_str(transcript)?;
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.messages()[0].body(), "Hello there\nthis is a test");
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ParseConfig;
use crate::error::{ChatlensError, Result};
use crate::message::ChatMessage;
use crate::table::MessageTable;
use crate::timestamp::parse_header_timestamp;

/// Header prefix: slash date, comma, clock time (optional seconds, optional
/// AM/PM), space-hyphen-space, remainder.
const HEADER_PATTERN: &str =
    r"^(\d{1,2}/\d{1,2}/\d{2,4}),\s(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\s-\s(.*)$";

fn header_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(HEADER_PATTERN).expect("header regex"))
}

/// Non-fatal anomalies observed during a parse.
///
/// Reported alongside the table so callers can tell a clean export from one
/// the scanner had to recover on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    /// Non-blank lines before the first header, discarded.
    pub leading_skipped: usize,

    /// Header-shaped lines whose date/time failed normalization,
    /// recovered as continuation or discarded.
    pub timestamp_failures: usize,
}

impl ParseDiagnostics {
    /// Returns `true` if the parse saw no anomalies.
    pub fn is_clean(&self) -> bool {
        self.leading_skipped == 0 && self.timestamp_failures == 0
    }
}

/// A message being assembled; continuation lines land here until the next
/// header (or end-of-input) flushes it.
#[derive(Debug)]
struct PendingMessage {
    timestamp: chrono::NaiveDateTime,
    sender: Option<String>,
    body: String,
    is_notification: bool,
}

impl PendingMessage {
    fn from_header(timestamp: chrono::NaiveDateTime, rest: &str) -> Self {
        match rest.split_once(": ") {
            Some((sender, body)) if !sender.trim().is_empty() => Self {
                timestamp,
                sender: Some(sender.trim().to_string()),
                body: body.to_string(),
                is_notification: false,
            },
            _ => Self {
                timestamp,
                sender: None,
                body: rest.to_string(),
                is_notification: true,
            },
        }
    }

    fn append_line(&mut self, line: &str) {
        self.body.push('\n');
        self.body.push_str(line);
    }

    fn into_message(self, index: usize, config: &ParseConfig) -> ChatMessage {
        let is_media = config.is_media_placeholder(&self.body);
        ChatMessage {
            timestamp: self.timestamp,
            sender: self.sender,
            body: self.body,
            is_media,
            is_notification: self.is_notification,
            sequence_index: index,
        }
    }
}

/// Scanner state: either nothing is open yet, or one message is accumulating.
enum ScanState {
    Idle,
    Accumulating(PendingMessage),
}

/// Single-pass line scanner. Feed physical lines (no trailing newline),
/// then call [`finish`](Self::finish).
struct LineScanner<'c> {
    config: &'c ParseConfig,
    state: ScanState,
    messages: Vec<ChatMessage>,
    diagnostics: ParseDiagnostics,
}

impl<'c> LineScanner<'c> {
    fn new(config: &'c ParseConfig) -> Self {
        Self {
            config,
            state: ScanState::Idle,
            messages: Vec::new(),
            diagnostics: ParseDiagnostics::default(),
        }
    }

    fn push_line(&mut self, line: &str) {
        // Android prefixes lines with U+200E, uploads may carry a BOM.
        let line = line.trim_start_matches(['\u{feff}', '\u{200e}']);

        if let Some(caps) = header_re().captures(line) {
            let date = caps.get(1).map_or("", |m| m.as_str());
            let time = caps.get(2).map_or("", |m| m.as_str());
            let rest = caps.get(3).map_or("", |m| m.as_str());

            match parse_header_timestamp(date, time, self.config.date_order) {
                Ok(ts) => {
                    self.flush();
                    self.state = ScanState::Accumulating(PendingMessage::from_header(ts, rest));
                    return;
                }
                Err(_) => {
                    // Header-shaped but the date/time is nonsense; fall
                    // through to the continuation-or-discard rule.
                    self.diagnostics.timestamp_failures += 1;
                }
            }
        }

        match &mut self.state {
            ScanState::Accumulating(pending) => pending.append_line(line),
            ScanState::Idle => {
                if !line.trim().is_empty() {
                    self.diagnostics.leading_skipped += 1;
                }
            }
        }
    }

    fn flush(&mut self) {
        if let ScanState::Accumulating(pending) =
            std::mem::replace(&mut self.state, ScanState::Idle)
        {
            let index = self.messages.len();
            let config = self.config;
            self.messages.push(pending.into_message(index, config));
        }
    }

    fn finish(mut self) -> Result<MessageTable> {
        self.flush();
        if self.messages.is_empty() {
            return Err(ChatlensError::format_error(
                "no line matched the 'D/M/Y, H:MM - ' header prefix",
            ));
        }
        Ok(MessageTable::from_parts(self.messages, self.diagnostics))
    }
}

/// Parser for WhatsApp-style TXT transcripts.
///
/// Stateless between calls; one instance can parse any number of
/// transcripts. The date convention, media placeholder tokens and size
/// guard come from [`ParseConfig`].
///
/// # Example
///
/// ```rust,no_run
/// use chatlens::{ParseConfig, TranscriptParser};
/// use chatlens::timestamp::DateOrder;
///
/// let parser = TranscriptParser::with_config(
///     ParseConfig::new().with_date_order(DateOrder::MonthFirst),
/// );
/// let table = parser.parse_path("chat.txt")?;
/// println!("{} messages", table.len());
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
pub struct TranscriptParser {
    config: ParseConfig,
}

impl TranscriptParser {
    /// Creates a parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParseConfig::default(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parses a transcript held in memory.
    ///
    /// # Errors
    ///
    /// [`ChatlensError::Format`] if no line matches the header grammar.
    pub fn parse_str(&self, text: &str) -> Result<MessageTable> {
        let mut scanner = LineScanner::new(&self.config);
        for line in text.lines() {
            scanner.push_line(line);
        }
        scanner.finish()
    }

    /// Parses a transcript from raw bytes, validating UTF-8 first.
    ///
    /// # Errors
    ///
    /// [`ChatlensError::Encoding`] if the bytes are not valid UTF-8;
    /// otherwise as [`parse_str`](Self::parse_str).
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<MessageTable> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ChatlensError::encoding("transcript blob", e))?;
        self.parse_str(text)
    }

    /// Parses a transcript line-by-line from a reader.
    ///
    /// Peak memory is one in-progress message plus the accumulated table,
    /// independent of transcript length. Line endings (`\n`, `\r\n`) are
    /// handled transparently.
    ///
    /// # Errors
    ///
    /// [`ChatlensError::Io`] on read failure, [`ChatlensError::Encoding`]
    /// on invalid UTF-8, [`ChatlensError::Format`] if no header matched.
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<MessageTable> {
        let mut scanner = LineScanner::new(&self.config);
        let mut buf: Vec<u8> = Vec::with_capacity(4096);

        loop {
            buf.clear();
            let bytes = reader.read_until(b'\n', &mut buf)?;
            if bytes == 0 {
                break;
            }

            let line = std::str::from_utf8(&buf)
                .map_err(|e| ChatlensError::encoding("transcript line", e))?;
            let line = line.strip_suffix('\n').unwrap_or(line);
            let line = line.strip_suffix('\r').unwrap_or(line);
            scanner.push_line(line);
        }

        scanner.finish()
    }

    /// Parses a transcript file.
    ///
    /// Checks the size guard against file metadata before reading a byte,
    /// then streams through [`parse_reader`](Self::parse_reader) with the
    /// configured buffer size.
    ///
    /// # Errors
    ///
    /// [`ChatlensError::TranscriptTooLarge`] if the file exceeds
    /// `max_transcript_bytes`; otherwise as
    /// [`parse_reader`](Self::parse_reader).
    pub fn parse_path(&self, path: impl AsRef<Path>) -> Result<MessageTable> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;
        if metadata.len() > self.config.max_transcript_bytes {
            return Err(ChatlensError::transcript_too_large(
                self.config.max_transcript_bytes,
                metadata.len(),
            ));
        }

        let file = File::open(path)?;
        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        self.parse_reader(reader)
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}
