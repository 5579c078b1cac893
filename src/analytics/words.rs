//! Word frequency over message text.
//!
//! Tokenization is deliberately simple: lowercase the body, split on
//! whitespace, strip non-alphanumeric characters from both ends of each
//! token. Punctuation inside a token survives, so `don't` stays one word.
//!
//! The stop-word list is supplied by the caller, not compiled in; different
//! languages need different lists. [`StopWords::english`] gives the common
//! English list, [`StopWords::from_reader`] loads one word per line from a
//! file.
//!
//! # Example
//!
//! ```
//! use chatlens::{AnalysisConfig, SenderFilter, TranscriptParser};
//! use chatlens::analytics::{StopWords, most_common_words};
//!
//! let table = TranscriptParser::new().parse_str(
//!     "12/08/23, 14:05 - Alice: the coffee was great\n\
//!      12/08/23, 14:06 - Bob: great coffee indeed",
//! )?;
//!
//! let words = most_common_words(
//!     &table,
//!     &SenderFilter::Overall,
//!     &StopWords::english(),
//!     &AnalysisConfig::new(),
//! );
//! assert_eq!(words[0], ("coffee".to_string(), 2));
//! assert_eq!(words[1], ("great".to_string(), 2));
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::collections::{HashMap, HashSet};
use std::io::BufRead;

use stopwords::{Language, Spark, Stopwords};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::table::{MessageTable, SenderFilter};

/// A set of words excluded from frequency counting.
///
/// Matching is against lowercased tokens, so the set holds lowercase words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// An empty set; every token survives filtering.
    pub fn new() -> Self {
        Self::default()
    }

    /// The common English stop-word list.
    pub fn english() -> Self {
        let words = Spark::stopwords(Language::English)
            .unwrap_or_default()
            .iter()
            .map(|word| (*word).to_string())
            .collect();
        Self { words }
    }

    /// Loads a list from a reader: one word per line, blank lines and
    /// `#` comment lines ignored, entries lowercased.
    ///
    /// # Errors
    ///
    /// [`ChatlensError::Io`](crate::ChatlensError::Io) on read failure.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            words.insert(word.to_lowercase());
        }
        Ok(Self { words })
    }

    /// Returns `true` if the (lowercase) word is in the set.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter.into_iter().map(|w| w.into().to_lowercase()).collect();
        Self { words }
    }
}

/// Splits one body into counted tokens.
pub(crate) fn tokenize(body: &str) -> Vec<String> {
    body.to_lowercase()
        .split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Ranks words by frequency for a filtered view.
///
/// Notification rows and media placeholder rows are excluded; neither
/// carries words anyone typed. Returns the `config.top_words` most frequent
/// `(word, count)` pairs, count descending, ties broken by lexical order
/// ascending.
pub fn most_common_words(
    table: &MessageTable,
    filter: &SenderFilter,
    stopwords: &StopWords,
    config: &AnalysisConfig,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for msg in table.filtered(filter) {
        if msg.is_notification() || msg.is_media() {
            continue;
        }
        for token in tokenize(msg.body()) {
            if stopwords.contains(&token) {
                continue;
            }
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(config.top_words);
    ranked
}
