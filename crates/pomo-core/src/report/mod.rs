//! Reports derived from daily stats: the per-day F/R ratio, today's
//! summary and the rolling ratio graph.

mod format;
mod graph;
mod ratio;

pub use format::{format_clock, format_minutes, format_remaining};
pub use graph::{
    graph, label_days, GraphReport, GraphRow, GraphSettings, RatioGraph, DEFAULT_BAR_WIDTH,
    DEFAULT_GOOD_RATIO, DEFAULT_WINDOW_DAYS,
};
pub use ratio::{graph_value, ratio, Rating, Ratio, TodaySummary};
