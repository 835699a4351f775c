//! Per-day aggregate record.

use serde::{Deserialize, Serialize};

use crate::timer::SessionKind;

/// Totals for a single calendar date.
///
/// Every field starts at zero and only moves forward for the rest of the
/// day. The only way back down is an explicit [`DailyStat::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DailyStat {
    /// Seconds spent in focus sessions.
    pub total_time_focused: u64,
    /// Seconds spent in rest sessions.
    pub total_time_rested: u64,
    pub focus_sessions_completed: u64,
    pub rest_sessions_completed: u64,
}

impl DailyStat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all four counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Credit a finished focus session.
    ///
    /// A zero-second session (a stopwatch cancelled straight away) still
    /// bumps the session counter.
    pub fn update_focus(&mut self, seconds: u64) {
        self.total_time_focused = self.total_time_focused.saturating_add(seconds);
        self.focus_sessions_completed = self.focus_sessions_completed.saturating_add(1);
    }

    /// Credit a finished rest session.
    pub fn update_rest(&mut self, seconds: u64) {
        self.total_time_rested = self.total_time_rested.saturating_add(seconds);
        self.rest_sessions_completed = self.rest_sessions_completed.saturating_add(1);
    }

    /// Credit a finished session of either kind.
    pub fn update(&mut self, kind: SessionKind, seconds: u64) {
        match kind {
            SessionKind::Focus => self.update_focus(seconds),
            SessionKind::Rest => self.update_rest(seconds),
        }
    }

    /// True when nothing has been recorded for this day.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stat_is_zeroed() {
        let stat = DailyStat::new();
        assert_eq!(stat.total_time_focused, 0);
        assert_eq!(stat.total_time_rested, 0);
        assert_eq!(stat.focus_sessions_completed, 0);
        assert_eq!(stat.rest_sessions_completed, 0);
        assert!(stat.is_empty());
    }

    #[test]
    fn focus_updates_accumulate() {
        let mut stat = DailyStat::new();
        stat.update_focus(1200);
        stat.update_focus(300);
        assert_eq!(stat.total_time_focused, 1500);
        assert_eq!(stat.focus_sessions_completed, 2);
        assert_eq!(stat.total_time_rested, 0);
        assert_eq!(stat.rest_sessions_completed, 0);
    }

    #[test]
    fn rest_updates_are_symmetric() {
        let mut stat = DailyStat::new();
        stat.update_rest(300);
        assert_eq!(stat.total_time_rested, 300);
        assert_eq!(stat.rest_sessions_completed, 1);
        assert_eq!(stat.focus_sessions_completed, 0);
    }

    #[test]
    fn zero_second_session_still_counts() {
        let mut stat = DailyStat::new();
        stat.update(SessionKind::Focus, 0);
        assert_eq!(stat.total_time_focused, 0);
        assert_eq!(stat.focus_sessions_completed, 1);
        assert!(!stat.is_empty());
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut stat = DailyStat::new();
        stat.update_focus(600);
        stat.update_rest(120);
        stat.reset();
        assert!(stat.is_empty());
    }

    #[test]
    fn totals_saturate_instead_of_wrapping() {
        let mut stat = DailyStat {
            total_time_focused: u64::MAX - 1,
            ..DailyStat::default()
        };
        stat.update_focus(10);
        assert_eq!(stat.total_time_focused, u64::MAX);
    }

    #[test]
    fn current_shape_rejects_unknown_fields() {
        let json = r#"{"total_time_focused":1,"total_time_rested":2,
            "focus_sessions_completed":3,"rest_sessions_completed":4,"extra":5}"#;
        assert!(serde_json::from_str::<DailyStat>(json).is_err());
    }
}
