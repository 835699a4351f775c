use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Longest timed session accepted, in minutes.
pub const MAX_SESSION_MINUTES: u32 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Focus,
    Rest,
}

impl SessionKind {
    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Focus => "Focus",
            SessionKind::Rest => "Rest",
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SessionMode {
    /// Counts up to a target, one tick per second.
    FixedDuration { seconds: u64 },
    /// Stopwatch: runs until cancelled.
    OpenEnded,
}

/// A validated request for a session.
///
/// Construction is the only place durations are checked, so a
/// [`SessionClock`](super::SessionClock) never sees a zero or
/// out-of-range target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSpec {
    kind: SessionKind,
    mode: SessionMode,
}

impl SessionSpec {
    /// Timed session of `minutes` (1..=999).
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDuration`] outside that range.
    pub fn timed_minutes(kind: SessionKind, minutes: u32) -> Result<Self> {
        Self::timed_secs(kind, u64::from(minutes).saturating_mul(60))
    }

    /// Timed session of `seconds` (1..=999 minutes worth).
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDuration`] outside that range.
    pub fn timed_secs(kind: SessionKind, seconds: u64) -> Result<Self> {
        if seconds == 0 {
            return Err(CoreError::InvalidDuration {
                seconds,
                reason: "session length must be positive",
            });
        }
        if seconds > u64::from(MAX_SESSION_MINUTES) * 60 {
            return Err(CoreError::InvalidDuration {
                seconds,
                reason: "session length must be at most 999 minutes",
            });
        }
        Ok(Self {
            kind,
            mode: SessionMode::FixedDuration { seconds },
        })
    }

    /// Stopwatch session.
    pub fn open_ended(kind: SessionKind) -> Self {
        Self {
            kind,
            mode: SessionMode::OpenEnded,
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Target length in seconds, `None` for a stopwatch.
    pub fn target_secs(&self) -> Option<u64> {
        match self.mode {
            SessionMode::FixedDuration { seconds } => Some(seconds),
            SessionMode::OpenEnded => None,
        }
    }
}
