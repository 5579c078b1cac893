//! Per-sender message ranking with percentage shares.
//!
//! Conceptually an `Overall`-only aggregate: it always works over every
//! non-notification row of the table, grouping by author. Notifications
//! have no author and never participate.
//!
//! # Example
//!
//! ```
//! use chatlens::{AnalysisConfig, TranscriptParser};
//! use chatlens::analytics::most_busy_users;
//!
//! let table = TranscriptParser::new().parse_str(
//!     "12/08/23, 14:05 - Alice: a\n\
//!      12/08/23, 14:06 - Alice: b\n\
//!      12/08/23, 14:07 - Bob: c\n\
//!      12/08/23, 14:08 - Carol: d",
//! )?;
//!
//! let busy = most_busy_users(&table, &AnalysisConfig::new());
//! assert_eq!(busy.top[0], ("Alice".to_string(), 2));
//! assert_eq!(busy.shares[0].percentage, 50.0);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::table::MessageTable;

/// One sender's slice of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderShare {
    /// Author name, exactly as exported.
    pub sender: String,

    /// Messages this author sent.
    pub count: usize,

    /// `count / total * 100`, rounded to the configured number of decimal
    /// places. Defined as 0 when the total is zero.
    pub percentage: f64,
}

/// Result of [`most_busy_users`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusyUsers {
    /// The `top_senders` busiest authors with raw counts.
    pub top: Vec<(String, usize)>,

    /// Every author with count and rounded percentage, same ordering.
    /// Covers the complete sender set, not just the top slice.
    pub shares: Vec<SenderShare>,
}

impl BusyUsers {
    /// Non-notification messages across all authors.
    pub fn total_messages(&self) -> usize {
        self.shares.iter().map(|share| share.count).sum()
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Ranks authors by message count.
///
/// Ordering is count descending, ties broken by name ascending so repeated
/// runs agree. `top` holds the first `config.top_senders` entries; `shares`
/// holds every author with `percentage` rounded to
/// `config.percent_decimals` places.
pub fn most_busy_users(table: &MessageTable, config: &AnalysisConfig) -> BusyUsers {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for msg in table.iter() {
        if let Some(sender) = msg.sender() {
            *counts.entry(sender).or_insert(0) += 1;
        }
    }

    let total: usize = counts.values().sum();

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let top = ranked
        .iter()
        .take(config.top_senders)
        .map(|(sender, count)| ((*sender).to_string(), *count))
        .collect();

    let shares = ranked
        .into_iter()
        .map(|(sender, count)| {
            let percentage = if total == 0 {
                0.0
            } else {
                round_to(count as f64 / total as f64 * 100.0, config.percent_decimals)
            };
            SenderShare {
                sender: sender.to_string(),
                count,
                percentage,
            }
        })
        .collect();

    BusyUsers { top, shares }
}
