//! Time-bucketed aggregates: timelines, weekday/month maps, heatmap.
//!
//! All five aggregates operate on the same filtered view as
//! [`fetch_stats`](crate::analytics::fetch_stats), and their totals agree
//! with it: the monthly counts, the daily counts and the heatmap cells each
//! sum to `message_count` for the same filter.
//!
//! # Example
//!
//! ```
//! use chatlens::{SenderFilter, TranscriptParser};
//! use chatlens::analytics::monthly_timeline;
//!
//! let table = TranscriptParser::new().parse_str(
//!     "12/08/23, 14:05 - Alice: hi\n03/09/23, 09:00 - Bob: hello",
//! )?;
//!
//! let timeline = monthly_timeline(&table, &SenderFilter::Overall);
//! assert_eq!(timeline[0], ("August 2023".to_string(), 1));
//! assert_eq!(timeline[1], ("September 2023".to_string(), 1));
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use serde::Serialize;

use crate::message::{hour_bucket_label, weekday_label};
use crate::table::{MessageTable, SenderFilter};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Message counts per calendar month, chronologically ascending.
///
/// Labels are `"<MonthName> <Year>"`. Grouping is by `(year, month)`, so
/// December 2022 sorts before January 2023 even though the label strings
/// compare the other way.
pub fn monthly_timeline(table: &MessageTable, filter: &SenderFilter) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for msg in table.filtered(filter) {
        let ts = msg.timestamp();
        *counts.entry((ts.year(), ts.month())).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((year, month), count)| {
            let label = format!("{} {}", MONTH_NAMES[(month - 1) as usize], year);
            (label, count)
        })
        .collect()
}

/// Message counts per calendar date, chronologically ascending.
pub fn daily_timeline(table: &MessageTable, filter: &SenderFilter) -> Vec<(NaiveDate, usize)> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for msg in table.filtered(filter) {
        *counts.entry(msg.date()).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Message counts per weekday, emitted Monday through Sunday.
///
/// All seven days are present; days without messages carry zero.
pub fn week_activity_map(
    table: &MessageTable,
    filter: &SenderFilter,
) -> Vec<(&'static str, usize)> {
    let mut counts = [0usize; 7];
    for msg in table.filtered(filter) {
        counts[msg.timestamp().weekday().num_days_from_monday() as usize] += 1;
    }

    WEEKDAY_ORDER
        .iter()
        .zip(counts)
        .map(|(day, count)| (weekday_label(*day), count))
        .collect()
}

/// Message counts per month name, aggregated across all years present.
///
/// Emitted January through December with absent months carrying zero. An
/// August 2022 row and an August 2023 row both land in `"August"`.
pub fn month_activity_map(
    table: &MessageTable,
    filter: &SenderFilter,
) -> Vec<(&'static str, usize)> {
    let mut counts = [0usize; 12];
    for msg in table.filtered(filter) {
        counts[(msg.timestamp().month() - 1) as usize] += 1;
    }

    MONTH_NAMES.iter().zip(counts).map(|(name, count)| (*name, count)).collect()
}

/// Weekday by hour-bucket activity grid.
///
/// Rows are weekdays Monday through Sunday, columns are the 24 hour buckets
/// `"0-1"` .. `"23-0"`. Cells left untouched stay zero, and
/// [`total`](Self::total) equals the view's `message_count`.
///
/// # Example
///
/// ```
/// use chatlens::{SenderFilter, TranscriptParser};
/// use chatlens::analytics::ActivityHeatmap;
/// use chrono::Weekday;
///
/// // 2023-08-12 was a Saturday.
/// let table = TranscriptParser::new()
///     .parse_str("12/08/23, 14:05 - Alice: hi")?;
/// let heatmap = ActivityHeatmap::compute(&table, &SenderFilter::Overall);
///
/// assert_eq!(heatmap.cell(Weekday::Sat, 14), 1);
/// assert_eq!(heatmap.total(), 1);
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityHeatmap {
    /// `cells[weekday][hour]`, weekday indexed Monday = 0.
    cells: [[usize; 24]; 7],
}

impl ActivityHeatmap {
    /// Builds the grid for a filtered view.
    pub fn compute(table: &MessageTable, filter: &SenderFilter) -> Self {
        let mut cells = [[0usize; 24]; 7];
        for msg in table.filtered(filter) {
            let ts = msg.timestamp();
            let day = ts.weekday().num_days_from_monday() as usize;
            let hour = ts.hour() as usize;
            cells[day][hour] += 1;
        }
        Self { cells }
    }

    /// Count for one (weekday, hour) cell.
    pub fn cell(&self, weekday: Weekday, hour: u32) -> usize {
        self.cells[weekday.num_days_from_monday() as usize][hour as usize]
    }

    /// All 24 cells of one weekday row, hour 0 first.
    pub fn row(&self, weekday: Weekday) -> &[usize; 24] {
        &self.cells[weekday.num_days_from_monday() as usize]
    }

    /// Sum over all cells; equals the view's `message_count`.
    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    /// Labelled rows, Monday first.
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &[usize; 24])> + '_ {
        Self::weekday_labels().into_iter().zip(self.cells.iter())
    }

    /// Row labels, Monday through Sunday.
    pub fn weekday_labels() -> [&'static str; 7] {
        [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ]
    }

    /// Column labels, `"0-1"` through `"23-0"`.
    pub fn hour_labels() -> Vec<String> {
        (0..24).map(hour_bucket_label).collect()
    }
}

/// Convenience wrapper matching the free-function shape of the other
/// aggregates.
pub fn activity_heatmap(table: &MessageTable, filter: &SenderFilter) -> ActivityHeatmap {
    ActivityHeatmap::compute(table, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fetch_stats;
    use crate::parser::TranscriptParser;

    fn parse(text: &str) -> MessageTable {
        TranscriptParser::new().parse_str(text).unwrap()
    }

    // =========================================================================
    // Monthly timeline
    // =========================================================================

    #[test]
    fn test_monthly_groups_and_labels() {
        let table = parse(
            "12/08/23, 14:05 - Alice: a\n13/08/23, 10:00 - Bob: b\n03/09/23, 09:00 - Alice: c",
        );
        let timeline = monthly_timeline(&table, &SenderFilter::Overall);
        assert_eq!(
            timeline,
            vec![("August 2023".to_string(), 2), ("September 2023".to_string(), 1)]
        );
    }

    #[test]
    fn test_monthly_chronological_across_year_boundary() {
        // "December 2022" > "January 2023" lexically; order must be by
        // (year, month).
        let table = parse("25/12/22, 10:00 - Alice: x\n01/01/23, 10:00 - Alice: y");
        let labels: Vec<String> = monthly_timeline(&table, &SenderFilter::Overall)
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, vec!["December 2022", "January 2023"]);
    }

    #[test]
    fn test_monthly_sum_equals_message_count() {
        let table = parse(
            "12/08/23, 14:05 - Alice: a\n12/08/23, 14:09 - Alice added Bob\n03/09/23, 09:00 - Bob: c",
        );
        for filter in [SenderFilter::Overall, SenderFilter::sender("Alice")] {
            let sum: usize = monthly_timeline(&table, &filter)
                .iter()
                .map(|(_, count)| count)
                .sum();
            assert_eq!(sum, fetch_stats(&table, &filter).message_count);
        }
    }

    // =========================================================================
    // Daily timeline
    // =========================================================================

    #[test]
    fn test_daily_ascending_dates() {
        let table = parse(
            "13/08/23, 10:00 - Bob: later day first in file\n12/08/23, 14:05 - Alice: earlier day",
        );
        let daily = daily_timeline(&table, &SenderFilter::Overall);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].0, NaiveDate::from_ymd_opt(2023, 8, 12).unwrap());
        assert_eq!(daily[1].0, NaiveDate::from_ymd_opt(2023, 8, 13).unwrap());
    }

    #[test]
    fn test_daily_counts_per_date() {
        let table = parse(
            "12/08/23, 14:05 - Alice: a\n12/08/23, 15:00 - Bob: b\n13/08/23, 10:00 - Alice: c",
        );
        let daily = daily_timeline(&table, &SenderFilter::Overall);
        assert_eq!(daily[0].1, 2);
        assert_eq!(daily[1].1, 1);
    }

    #[test]
    fn test_daily_sum_matches_monthly_sum() {
        let table = parse(
            "12/08/23, 14:05 - Alice: a\n13/08/23, 10:00 - Bob: b\n03/09/23, 09:00 - Alice: c",
        );
        let filter = SenderFilter::Overall;
        let daily_sum: usize = daily_timeline(&table, &filter).iter().map(|(_, c)| c).sum();
        let monthly_sum: usize = monthly_timeline(&table, &filter).iter().map(|(_, c)| c).sum();
        assert_eq!(daily_sum, monthly_sum);
    }

    // =========================================================================
    // Weekday map
    // =========================================================================

    #[test]
    fn test_week_map_zero_fills_all_seven() {
        // 2023-08-12 was a Saturday.
        let table = parse("12/08/23, 14:05 - Alice: hi");
        let map = week_activity_map(&table, &SenderFilter::Overall);
        assert_eq!(map.len(), 7);
        assert_eq!(map[0], ("Monday", 0));
        assert_eq!(map[5], ("Saturday", 1));
        assert_eq!(map[6], ("Sunday", 0));
    }

    #[test]
    fn test_week_map_accumulates_same_weekday() {
        // Both 2023-08-12 and 2023-08-19 are Saturdays.
        let table = parse("12/08/23, 14:05 - Alice: a\n19/08/23, 09:00 - Bob: b");
        let map = week_activity_map(&table, &SenderFilter::Overall);
        assert_eq!(map[5], ("Saturday", 2));
    }

    // =========================================================================
    // Month map
    // =========================================================================

    #[test]
    fn test_month_map_aggregates_across_years() {
        let table = parse("12/08/22, 14:05 - Alice: a\n12/08/23, 14:05 - Bob: b");
        let map = month_activity_map(&table, &SenderFilter::Overall);
        assert_eq!(map.len(), 12);
        assert_eq!(map[7], ("August", 2));
        assert_eq!(map[0], ("January", 0));
    }

    // =========================================================================
    // Heatmap
    // =========================================================================

    #[test]
    fn test_heatmap_cell_and_total() {
        // Saturday 14:05 twice, Saturday 09:00 once.
        let table = parse(
            "12/08/23, 14:05 - Alice: a\n12/08/23, 14:55 - Bob: b\n12/08/23, 09:00 - Alice: c",
        );
        let heatmap = ActivityHeatmap::compute(&table, &SenderFilter::Overall);
        assert_eq!(heatmap.cell(Weekday::Sat, 14), 2);
        assert_eq!(heatmap.cell(Weekday::Sat, 9), 1);
        assert_eq!(heatmap.cell(Weekday::Mon, 14), 0);
        assert_eq!(heatmap.total(), 3);
    }

    #[test]
    fn test_heatmap_total_matches_stats() {
        let table = parse(
            "12/08/23, 14:05 - Alice: a\n12/08/23, 14:09 - Alice added Bob\n13/08/23, 23:30 - Bob: c",
        );
        for filter in [
            SenderFilter::Overall,
            SenderFilter::sender("Alice"),
            SenderFilter::sender("Mallory"),
        ] {
            let heatmap = ActivityHeatmap::compute(&table, &filter);
            assert_eq!(heatmap.total(), fetch_stats(&table, &filter).message_count);
        }
    }

    #[test]
    fn test_heatmap_labels() {
        let hours = ActivityHeatmap::hour_labels();
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0], "0-1");
        assert_eq!(hours[23], "23-0");

        let days = ActivityHeatmap::weekday_labels();
        assert_eq!(days[0], "Monday");
        assert_eq!(days[6], "Sunday");
    }

    #[test]
    fn test_heatmap_row() {
        let table = parse("12/08/23, 23:59 - Alice: night owl");
        let heatmap = ActivityHeatmap::compute(&table, &SenderFilter::Overall);
        let saturday = heatmap.row(Weekday::Sat);
        assert_eq!(saturday[23], 1);
        assert_eq!(saturday.iter().sum::<usize>(), 1);
    }

    // =========================================================================
    // Empty views
    // =========================================================================

    #[test]
    fn test_empty_view_yields_empty_and_zeroed() {
        let table = parse("12/08/23, 14:05 - Alice: hi");
        let filter = SenderFilter::sender("Mallory");

        assert!(monthly_timeline(&table, &filter).is_empty());
        assert!(daily_timeline(&table, &filter).is_empty());
        assert!(week_activity_map(&table, &filter).iter().all(|(_, c)| *c == 0));
        assert!(month_activity_map(&table, &filter).iter().all(|(_, c)| *c == 0));
        assert_eq!(ActivityHeatmap::compute(&table, &filter).total(), 0);
    }
}
