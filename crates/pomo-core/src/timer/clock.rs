//! Session clock implementation.
//!
//! The clock is a tick-counting state machine. It owns no thread and never
//! touches storage: the caller drives it (or hands it a [`Ticker`] through
//! [`SessionClock::run`]) and records the returned [`SessionOutcome`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Completed | Cancelled)
//! ```
//!
//! A fixed-duration session ticks once per second and completes on reaching
//! its target. A stopwatch ticks at [`STOPWATCH_TICKS_PER_SEC`] for a smooth
//! readout and only ever ends by cancellation; its elapsed time is still
//! reported in whole seconds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::session::{SessionKind, SessionMode, SessionSpec};
use crate::events::SessionObserver;

/// Tick rate of a fixed-duration session.
pub const FIXED_TICKS_PER_SEC: u64 = 1;

/// Tick rate of a stopwatch session.
pub const STOPWATCH_TICKS_PER_SEC: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl ClockState {
    pub fn is_finished(&self) -> bool {
        matches!(self, ClockState::Completed | ClockState::Cancelled)
    }
}

/// Point-in-time view of a running clock, handed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClockSnapshot {
    pub kind: SessionKind,
    pub state: ClockState,
    pub ticks: u64,
    pub ticks_per_sec: u64,
    pub elapsed_secs: u64,
    /// `None` for a stopwatch.
    pub target_secs: Option<u64>,
}

impl ClockSnapshot {
    pub fn remaining_secs(&self) -> Option<u64> {
        self.target_secs
            .map(|target| target.saturating_sub(self.elapsed_secs))
    }

    /// 0.0 .. 1.0 progress toward the target.
    pub fn progress(&self) -> Option<f64> {
        self.target_secs.map(|target| {
            if target == 0 {
                return 1.0;
            }
            (self.elapsed_secs as f64 / target as f64).min(1.0)
        })
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
    pub kind: SessionKind,
    pub mode: SessionMode,
    pub state: ClockState,
    /// Whole seconds, truncated.
    pub elapsed_secs: u64,
}

impl SessionOutcome {
    /// Whether this outcome should be credited to today's stats.
    ///
    /// Cancelling a stopwatch is its normal ending and counts. Cancelling a
    /// timed session before it completes records nothing.
    pub fn counts_toward_stats(&self) -> bool {
        match self.state {
            ClockState::Completed => true,
            ClockState::Cancelled => self.mode == SessionMode::OpenEnded,
            ClockState::Idle | ClockState::Running => false,
        }
    }
}

/// Shared cancellation flag, set from a signal handler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Source of tick pacing.
pub trait Ticker {
    /// Block until the next tick is due.
    fn wait(&mut self, period: Duration);
}

/// Wall-clock pacing via `thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepTicker;

impl Ticker for SleepTicker {
    fn wait(&mut self, period: Duration) {
        std::thread::sleep(period);
    }
}

#[derive(Debug, Clone)]
pub struct SessionClock {
    spec: SessionSpec,
    state: ClockState,
    ticks: u64,
}

impl SessionClock {
    pub fn new(spec: SessionSpec) -> Self {
        Self {
            spec,
            state: ClockState::Idle,
            ticks: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn spec(&self) -> &SessionSpec {
        &self.spec
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn ticks_per_sec(&self) -> u64 {
        match self.spec.mode() {
            SessionMode::FixedDuration { .. } => FIXED_TICKS_PER_SEC,
            SessionMode::OpenEnded => STOPWATCH_TICKS_PER_SEC,
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(1000 / self.ticks_per_sec())
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.ticks / self.ticks_per_sec()
    }

    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            kind: self.spec.kind(),
            state: self.state,
            ticks: self.ticks,
            ticks_per_sec: self.ticks_per_sec(),
            elapsed_secs: self.elapsed_secs(),
            target_secs: self.spec.target_secs(),
        }
    }

    /// The final result, once the clock has finished.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.state.is_finished().then(|| self.settle())
    }

    fn settle(&self) -> SessionOutcome {
        SessionOutcome {
            kind: self.spec.kind(),
            mode: self.spec.mode(),
            state: self.state,
            elapsed_secs: self.elapsed_secs(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Idle -> Running. Returns false in any other state.
    pub fn start(&mut self) -> bool {
        if self.state != ClockState::Idle {
            return false;
        }
        self.state = ClockState::Running;
        true
    }

    /// Advance one tick. No-op unless running.
    pub fn tick(&mut self) -> ClockState {
        if self.state != ClockState::Running {
            return self.state;
        }
        self.ticks = self.ticks.saturating_add(1);
        if let Some(target) = self.spec.target_secs() {
            if self.ticks >= target.saturating_mul(FIXED_TICKS_PER_SEC) {
                self.state = ClockState::Completed;
            }
        }
        self.state
    }

    /// Running -> Cancelled. Returns false in any other state.
    pub fn cancel(&mut self) -> bool {
        if self.state != ClockState::Running {
            return false;
        }
        self.state = ClockState::Cancelled;
        true
    }

    /// Drive the clock to completion or cancellation.
    ///
    /// The token is checked before every tick; a set token ends the loop
    /// with the ticks counted so far.
    pub fn run<T, O>(
        mut self,
        ticker: &mut T,
        token: &CancelToken,
        observer: &mut O,
    ) -> SessionOutcome
    where
        T: Ticker + ?Sized,
        O: SessionObserver + ?Sized,
    {
        self.start();
        tracing::debug!(kind = %self.spec.kind(), mode = ?self.spec.mode(), "session started");
        observer.on_start(&self.snapshot());

        let period = self.tick_period();
        loop {
            if token.is_cancelled() {
                self.cancel();
                break;
            }
            ticker.wait(period);
            let state = self.tick();
            observer.on_tick(&self.snapshot());
            if state.is_finished() {
                break;
            }
        }

        // The loop only exits once the clock is Completed or Cancelled.
        let outcome = self.settle();
        tracing::debug!(
            kind = %outcome.kind,
            state = ?outcome.state,
            elapsed_secs = outcome.elapsed_secs,
            "session ended"
        );
        observer.on_finish(&outcome);
        outcome
    }
}
