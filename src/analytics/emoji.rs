//! Emoji frequency over message text.
//!
//! Bodies are walked as extended grapheme clusters and each cluster is
//! tested for emoji membership by an injected [`EmojiClassifier`]. Skin
//! tones, variation selectors, flag pairs and ZWJ sequences therefore count
//! as one emoji, not as their component scalars.
//!
//! Unlike word counting, every row participates: notifications and media
//! placeholder rows can carry emoji too.
//!
//! # Example
//!
//! ```
//! use chatlens::{SenderFilter, TranscriptParser};
//! use chatlens::analytics::{UnicodeEmojiClassifier, emoji_frequencies};
//!
//! let table = TranscriptParser::new()
//!     .parse_str("12/08/23, 14:05 - Alice: pizza night 🍕🍕🍺")?;
//!
//! let emojis = emoji_frequencies(&table, &SenderFilter::Overall, &UnicodeEmojiClassifier);
//! assert_eq!(emojis[0], ("🍕".to_string(), 2));
//! assert_eq!(emojis[1], ("🍺".to_string(), 1));
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::table::{MessageTable, SenderFilter};

/// Decides whether one grapheme cluster is an emoji.
///
/// Injected rather than hard-coded so the Unicode coverage can evolve (or a
/// test can substitute a toy classifier) without touching the counting
/// logic.
pub trait EmojiClassifier {
    /// Returns `true` if the whole cluster is a single emoji.
    fn is_emoji(&self, grapheme: &str) -> bool;
}

/// Regex-backed classifier covering the common emoji blocks, skin tone
/// modifiers, variation selectors, regional indicator pairs and ZWJ
/// sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeEmojiClassifier;

impl EmojiClassifier for UnicodeEmojiClassifier {
    fn is_emoji(&self, grapheme: &str) -> bool {
        emoji_re()
            .find(grapheme)
            .is_some_and(|m| m.start() == 0 && m.end() == grapheme.len())
    }
}

fn emoji_re() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| {
        // Match complete emoji sequences including:
        // - Regional indicator pairs (flags)
        // - Base emoji with optional skin tone modifiers and variation selectors
        // - ZWJ sequences where emojis are joined by \u{200D}
        Regex::new(
            r"(?x)
            [\u{1F1E6}-\u{1F1FF}]{2}  # Regional indicator pairs (flags)
            |
            (?:
                [\u{1F300}-\u{1FAFF}\u{2600}-\u{27BF}\u{2300}-\u{23FF}\u{2B50}-\u{2B55}\u{203C}\u{2049}\u{25AA}\u{25AB}\u{25B6}\u{25C0}\u{25FB}-\u{25FE}\u{00A9}\u{00AE}\u{2122}\u{2139}\u{2194}-\u{2199}\u{21A9}\u{21AA}\u{231A}\u{231B}\u{2328}\u{23CF}\u{23E9}-\u{23F3}\u{23F8}-\u{23FA}\u{24C2}\u{2934}\u{2935}\u{3030}\u{303D}\u{3297}\u{3299}]
                [\u{1F3FB}-\u{1F3FF}]?  # Optional skin tone modifier
                \u{FE0F}?               # Optional variation selector
                (?:\u{200D}             # ZWJ
                    [\u{1F300}-\u{1FAFF}\u{2600}-\u{27BF}\u{2640}\u{2642}\u{2695}\u{2696}\u{2708}\u{2764}]
                    [\u{1F3FB}-\u{1F3FF}]?
                    \u{FE0F}?
                )*                      # Zero or more ZWJ + emoji
            )
            ",
        )
        .expect("emoji regex")
    })
}

/// Counts emoji occurrences for a filtered view.
///
/// Returns *all* distinct emoji as `(emoji, count)` pairs, count descending,
/// ties broken by first appearance in scan order. Callers wanting a top
/// slice truncate the result; the full list is what the aggregate defines.
pub fn emoji_frequencies(
    table: &MessageTable,
    filter: &SenderFilter,
    classifier: &dyn EmojiClassifier,
) -> Vec<(String, usize)> {
    // Value = (count, first-seen rank); the rank makes ties deterministic.
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut next_rank = 0usize;

    for msg in table.filtered(filter) {
        for grapheme in msg.body().graphemes(true) {
            if !classifier.is_emoji(grapheme) {
                continue;
            }
            match counts.get_mut(grapheme) {
                Some((count, _)) => *count += 1,
                None => {
                    counts.insert(grapheme.to_string(), (1, next_rank));
                    next_rank += 1;
                }
            }
        }
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0).then_with(|| a.1.1.cmp(&b.1.1)));
    ranked
        .into_iter()
        .map(|(emoji, (count, _))| (emoji, count))
        .collect()
}
