//! Hooks into the presentation layer.
//!
//! The core only hands out semantic data (kind, elapsed and target seconds,
//! final state). Colors, spinners and sounds belong to the implementors.

use crate::timer::{ClockSnapshot, SessionKind, SessionOutcome};

/// Receives clock progress while a session runs.
pub trait SessionObserver {
    fn on_start(&mut self, _snapshot: &ClockSnapshot) {}

    /// Called after every tick, including the final one.
    fn on_tick(&mut self, snapshot: &ClockSnapshot);

    fn on_finish(&mut self, _outcome: &SessionOutcome) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SessionObserver for NullObserver {
    fn on_tick(&mut self, _snapshot: &ClockSnapshot) {}
}

/// Fire-and-forget "session complete" signal.
pub trait Notifier {
    fn notify(&self, kind: SessionKind);
}

/// Notifier used when notifications are suppressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _kind: SessionKind) {}
}
