//! F/R ratio graph over a rolling window of days.

use chrono::NaiveDate;
use serde::Serialize;

use super::ratio::{graph_value, Rating};
use crate::stats::DailyStat;

pub const DEFAULT_GOOD_RATIO: f64 = 2.0;
pub const DEFAULT_BAR_WIDTH: usize = 50;
pub const DEFAULT_WINDOW_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphSettings {
    /// Bar length of the largest value in the window.
    pub bar_width: usize,
    /// Values strictly above this are rated good.
    pub good_ratio: f64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            good_ratio: DEFAULT_GOOD_RATIO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphRow {
    pub date: NaiveDate,
    /// "Today", "Yesterday" or a weekday name.
    pub label: String,
    pub value: f64,
    pub bar_len: usize,
    pub rating: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioGraph {
    /// Oldest first.
    pub rows: Vec<GraphRow>,
    pub max_value: f64,
    pub average: f64,
    pub average_rating: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GraphReport {
    /// The window holds no recorded sessions at all.
    NoData,
    Graph(RatioGraph),
}

/// Label an ascending run of dates by position from the end.
///
/// The last entry is "Today", the one before it "Yesterday", and the rest
/// take their weekday name. Works for any length, including 0 and 1.
pub fn label_days(dates: &[NaiveDate]) -> Vec<String> {
    let len = dates.len();
    dates
        .iter()
        .enumerate()
        .map(|(i, date)| match len - 1 - i {
            0 => "Today".to_string(),
            1 => "Yesterday".to_string(),
            _ => date.format("%A").to_string(),
        })
        .collect()
}

/// Build the graph from the last `size` entries of an ascending window.
pub fn graph(
    window: &[(NaiveDate, DailyStat)],
    size: usize,
    settings: &GraphSettings,
) -> GraphReport {
    let window = &window[window.len().saturating_sub(size)..];
    if window.iter().all(|(_, stat)| stat.is_empty()) {
        return GraphReport::NoData;
    }

    let dates: Vec<NaiveDate> = window.iter().map(|(date, _)| *date).collect();
    let values: Vec<f64> = window.iter().map(|(_, stat)| graph_value(stat)).collect();
    let max_value = values.iter().copied().fold(0.0_f64, f64::max);

    let rows = label_days(&dates)
        .into_iter()
        .zip(dates)
        .zip(values.iter().copied())
        .map(|((label, date), value)| GraphRow {
            date,
            label,
            value,
            bar_len: bar_len(value, max_value, settings.bar_width),
            rating: Rating::of(value, settings.good_ratio),
        })
        .collect();

    let average = values.iter().sum::<f64>() / values.len() as f64;
    GraphReport::Graph(RatioGraph {
        rows,
        max_value,
        average,
        average_rating: Rating::of(average, settings.good_ratio),
    })
}

fn bar_len(value: f64, max_value: f64, bar_width: usize) -> usize {
    if max_value <= 0.0 {
        return 0;
    }
    (bar_width as f64 * value / max_value).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        // 2024-05-06 is a Monday.
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn stat(focused: u64, rested: u64) -> DailyStat {
        DailyStat {
            total_time_focused: focused,
            total_time_rested: rested,
            focus_sessions_completed: u64::from(focused > 0),
            rest_sessions_completed: u64::from(rested > 0),
        }
    }

    fn unwrap_graph(report: GraphReport) -> RatioGraph {
        match report {
            GraphReport::Graph(g) => g,
            GraphReport::NoData => panic!("expected a graph"),
        }
    }

    #[test]
    fn labels_full_week() {
        let dates: Vec<_> = (6..=12).map(day).collect();
        assert_eq!(
            label_days(&dates),
            vec!["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Yesterday", "Today"]
        );
    }

    #[test]
    fn labels_partial_windows() {
        assert!(label_days(&[]).is_empty());
        assert_eq!(label_days(&[day(6)]), vec!["Today"]);
        assert_eq!(label_days(&[day(6), day(7)]), vec!["Yesterday", "Today"]);
        assert_eq!(
            label_days(&[day(6), day(7), day(8)]),
            vec!["Monday", "Yesterday", "Today"]
        );
    }

    #[test]
    fn empty_window_has_no_data() {
        assert_eq!(graph(&[], 7, &GraphSettings::default()), GraphReport::NoData);
    }

    #[test]
    fn all_zero_window_has_no_data() {
        let window: Vec<_> = (6..=12).map(|d| (day(d), DailyStat::default())).collect();
        assert_eq!(graph(&window, 7, &GraphSettings::default()), GraphReport::NoData);
    }

    #[test]
    fn three_day_window_uses_fallback_values() {
        let window = vec![
            (day(6), stat(600, 300)),
            (day(7), stat(400, 0)),
            (day(8), stat(0, 0)),
        ];
        let g = unwrap_graph(graph(&window, 7, &GraphSettings::default()));

        let values: Vec<_> = g.rows.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![2.0, 400.0, 0.0]);
        assert_eq!(g.max_value, 400.0);
        assert!((g.average - 134.0).abs() < 1e-9);
        assert_eq!(g.average_rating, Rating::Good);

        let labels: Vec<_> = g.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Monday", "Yesterday", "Today"]);

        let bars: Vec<_> = g.rows.iter().map(|r| r.bar_len).collect();
        assert_eq!(bars, vec![0, 50, 0]);

        let ratings: Vec<_> = g.rows.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![Rating::Bad, Rating::Good, Rating::Bad]);
    }

    #[test]
    fn bars_scale_to_max() {
        let window = vec![(day(7), stat(300, 300)), (day(8), stat(1200, 300))];
        let settings = GraphSettings {
            bar_width: 20,
            good_ratio: 2.0,
        };
        let g = unwrap_graph(graph(&window, 7, &settings));
        assert_eq!(g.rows[0].bar_len, 5);
        assert_eq!(g.rows[1].bar_len, 20);
        assert_eq!(g.average, 2.5);
        assert_eq!(g.average_rating, Rating::Good);
    }

    #[test]
    fn only_last_size_entries_are_plotted() {
        let window: Vec<_> = (1..=10).map(|d| (day(d), stat(600, 300))).collect();
        let g = unwrap_graph(graph(&window, 7, &GraphSettings::default()));
        assert_eq!(g.rows.len(), 7);
        assert_eq!(g.rows[0].date, day(4));
        assert_eq!(g.rows[6].label, "Today");
    }

    #[test]
    fn threshold_is_tunable() {
        let window = vec![(day(8), stat(300, 300))];
        let strict = unwrap_graph(graph(&window, 7, &GraphSettings::default()));
        assert_eq!(strict.rows[0].rating, Rating::Bad);

        let lenient = GraphSettings {
            good_ratio: 0.5,
            ..GraphSettings::default()
        };
        let g = unwrap_graph(graph(&window, 7, &lenient));
        assert_eq!(g.rows[0].rating, Rating::Good);
        assert_eq!(g.average_rating, Rating::Good);
    }

    #[test]
    fn rest_only_week_has_zero_max() {
        let window = vec![(day(7), stat(0, 300)), (day(8), stat(0, 600))];
        let g = unwrap_graph(graph(&window, 7, &GraphSettings::default()));
        assert_eq!(g.max_value, 0.0);
        assert!(g.rows.iter().all(|r| r.bar_len == 0));
    }
}
