use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::stats::DailyStat;

/// Focus-to-rest ratio for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Defined(f64),
    /// Nothing rested yet, so there is nothing to divide by.
    Undefined,
}

impl Ratio {
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Defined(v) => Some(*v),
            Ratio::Undefined => None,
        }
    }

    pub fn rating(&self, good_ratio: f64) -> Option<Rating> {
        self.value().map(|v| Rating::of(v, good_ratio))
    }
}

impl std::fmt::Display for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ratio::Defined(v) => write!(f, "{v:.2}"),
            Ratio::Undefined => f.write_str("undefined"),
        }
    }
}

/// `null` when undefined.
impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ratio::Defined(v) => serializer.serialize_f64(*v),
            Ratio::Undefined => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Good,
    Bad,
}

impl Rating {
    /// Strictly above the threshold is good.
    pub fn of(value: f64, good_ratio: f64) -> Self {
        if value > good_ratio {
            Rating::Good
        } else {
            Rating::Bad
        }
    }
}

/// `focused / rested`, undefined when nothing was rested.
pub fn ratio(stat: &DailyStat) -> Ratio {
    if stat.total_time_rested == 0 {
        return Ratio::Undefined;
    }
    Ratio::Defined(stat.total_time_focused as f64 / stat.total_time_rested as f64)
}

/// Scalar plotted for a day in the ratio graph.
///
/// This is the F/R ratio when rest was recorded. Without rest it falls back
/// to the raw focused seconds, which is a different unit: a day of pure
/// focus plots far above any real ratio. The fallback is kept as-is so
/// historical graphs read the same; callers that need a true ratio use
/// [`ratio`].
pub fn graph_value(stat: &DailyStat) -> f64 {
    match ratio(stat) {
        Ratio::Defined(v) => v,
        Ratio::Undefined => stat.total_time_focused as f64,
    }
}

/// Today's numbers, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodaySummary {
    pub date: NaiveDate,
    pub total_time_focused: u64,
    pub total_time_rested: u64,
    pub focus_sessions_completed: u64,
    pub rest_sessions_completed: u64,
    pub ratio: Ratio,
    /// `None` while the ratio is undefined.
    pub rating: Option<Rating>,
}

impl TodaySummary {
    pub fn from_stat(date: NaiveDate, stat: &DailyStat, good_ratio: f64) -> Self {
        let ratio = ratio(stat);
        Self {
            date,
            total_time_focused: stat.total_time_focused,
            total_time_rested: stat.total_time_rested,
            focus_sessions_completed: stat.focus_sessions_completed,
            rest_sessions_completed: stat.rest_sessions_completed,
            ratio,
            rating: ratio.rating(good_ratio),
        }
    }
}
