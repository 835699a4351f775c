//! Today-scoped access to the stat store.

use chrono::{Days, Local, NaiveDate};

use super::DailyStat;
use crate::error::Result;
use crate::storage::StatStore;
use crate::timer::{SessionKind, SessionOutcome};

/// Binds a [`StatStore`] to "today".
///
/// Today is fixed when the manager is built, so a session that runs past
/// midnight is credited to the date the process started on. Every write
/// reloads the store, applies one change and rewrites the whole store.
pub struct StatManager<S> {
    store: S,
    today: NaiveDate,
}

impl<S: StatStore> StatManager<S> {
    /// Manager for the local calendar date.
    pub fn new(store: S) -> Self {
        Self::with_today(store, Local::now().date_naive())
    }

    pub fn with_today(store: S, today: NaiveDate) -> Self {
        Self { store, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Today's record, zero-valued if nothing was recorded yet.
    ///
    /// Never writes.
    pub fn today_stats(&self) -> Result<DailyStat> {
        self.stats_for(self.today)
    }

    pub fn stats_for(&self, date: NaiveDate) -> Result<DailyStat> {
        Ok(self.store.load()?.get(&date).copied().unwrap_or_default())
    }

    pub fn update_focus(&self, seconds: u64) -> Result<DailyStat> {
        self.update(SessionKind::Focus, seconds)
    }

    pub fn update_rest(&self, seconds: u64) -> Result<DailyStat> {
        self.update(SessionKind::Rest, seconds)
    }

    /// Credit a session of `kind` to today and persist immediately.
    ///
    /// Returns today's updated record.
    pub fn update(&self, kind: SessionKind, seconds: u64) -> Result<DailyStat> {
        self.modify_today(|stat| stat.update(kind, seconds))
    }

    /// Credit a finished session if it counts.
    ///
    /// Returns `None` (and writes nothing) for a timed session that was
    /// cancelled before completing.
    pub fn record(&self, outcome: &SessionOutcome) -> Result<Option<DailyStat>> {
        if !outcome.counts_toward_stats() {
            tracing::debug!(kind = %outcome.kind, "session not credited");
            return Ok(None);
        }
        self.update(outcome.kind, outcome.elapsed_secs).map(Some)
    }

    /// Zero today's record.
    pub fn reset_today(&self) -> Result<DailyStat> {
        let stat = self.modify_today(DailyStat::reset)?;
        tracing::info!(date = %self.today, "reset today's stats");
        Ok(stat)
    }

    fn modify_today<F>(&self, change: F) -> Result<DailyStat>
    where
        F: FnOnce(&mut DailyStat),
    {
        let mut stats = self.store.load()?;
        let stat = stats.entry(self.today).or_default();
        change(stat);
        let updated = *stat;
        self.store.save(&stats)?;
        Ok(updated)
    }

    /// The `n_days` dates ending today, oldest first.
    ///
    /// Days without a record appear as zero-valued stats, so the result
    /// always has exactly `n_days` entries.
    pub fn recent_window(&self, n_days: u32) -> Result<Vec<(NaiveDate, DailyStat)>> {
        let stats = self.store.load()?;
        let window = (0..n_days)
            .rev()
            .filter_map(|back| self.today.checked_sub_days(Days::new(u64::from(back))))
            .map(|date| (date, stats.get(&date).copied().unwrap_or_default()))
            .collect();
        Ok(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStatStore, StatMap};
    use crate::timer::{ClockState, SessionMode};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn manager(store: MemoryStatStore) -> StatManager<MemoryStatStore> {
        StatManager::with_today(store, date("2024-05-08"))
    }

    #[test]
    fn focus_updates_accumulate_for_today() {
        let mgr = manager(MemoryStatStore::new());
        mgr.update_focus(1200).unwrap();
        let stat = mgr.update_focus(300).unwrap();
        assert_eq!(stat.total_time_focused, 1500);
        assert_eq!(stat.focus_sessions_completed, 2);
        assert_eq!(mgr.today_stats().unwrap(), stat);
        assert_eq!(mgr.store().save_count(), 2);
    }

    #[test]
    fn reads_do_not_persist() {
        let mgr = manager(MemoryStatStore::new());
        assert!(mgr.today_stats().unwrap().is_empty());
        mgr.recent_window(7).unwrap();
        assert_eq!(mgr.store().save_count(), 0);
        assert!(mgr.store().load().unwrap().is_empty());
    }

    #[test]
    fn other_days_are_untouched() {
        let mut seeded = StatMap::new();
        let mut old = DailyStat::new();
        old.update_rest(60);
        seeded.insert(date("2024-05-01"), old);

        let mgr = manager(MemoryStatStore::with_stats(seeded));
        mgr.update_rest(120).unwrap();

        let stats = mgr.store().load().unwrap();
        assert_eq!(stats[&date("2024-05-01")], old);
        assert_eq!(stats[&date("2024-05-08")].total_time_rested, 120);
    }

    #[test]
    fn record_skips_abandoned_timed_sessions() {
        let mgr = manager(MemoryStatStore::new());
        let abandoned = SessionOutcome {
            kind: SessionKind::Focus,
            mode: SessionMode::FixedDuration { seconds: 1200 },
            state: ClockState::Cancelled,
            elapsed_secs: 400,
        };
        assert_eq!(mgr.record(&abandoned).unwrap(), None);
        assert_eq!(mgr.store().save_count(), 0);

        let stopwatch = SessionOutcome {
            kind: SessionKind::Rest,
            mode: SessionMode::OpenEnded,
            state: ClockState::Cancelled,
            elapsed_secs: 1,
        };
        let stat = mgr.record(&stopwatch).unwrap().unwrap();
        assert_eq!(stat.total_time_rested, 1);
        assert_eq!(stat.rest_sessions_completed, 1);
    }

    #[test]
    fn reset_today_zeroes_only_today() {
        let mut seeded = StatMap::new();
        let mut day = DailyStat::new();
        day.update_focus(600);
        seeded.insert(date("2024-05-07"), day);
        seeded.insert(date("2024-05-08"), day);

        let mgr = manager(MemoryStatStore::with_stats(seeded));
        assert!(mgr.reset_today().unwrap().is_empty());
        assert_eq!(mgr.stats_for(date("2024-05-07")).unwrap(), day);
    }

    #[test]
    fn recent_window_fills_gaps_in_order() {
        let mut seeded = StatMap::new();
        let mut day = DailyStat::new();
        day.update_focus(600);
        seeded.insert(date("2024-05-03"), day);
        seeded.insert(date("2024-04-01"), day);

        let mgr = manager(MemoryStatStore::with_stats(seeded));
        let window = mgr.recent_window(7).unwrap();

        let dates: Vec<_> = window.iter().map(|(d, _)| *d).collect();
        assert_eq!(
            dates,
            (2..=8)
                .map(|d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap())
                .collect::<Vec<_>>()
        );
        assert_eq!(window[1].1, day);
        assert_eq!(window.iter().filter(|(_, s)| s.is_empty()).count(), 6);
    }

    #[test]
    fn recent_window_of_zero_is_empty() {
        let mgr = manager(MemoryStatStore::new());
        assert!(mgr.recent_window(0).unwrap().is_empty());
        assert_eq!(mgr.recent_window(1).unwrap()[0].0, date("2024-05-08"));
    }
}
