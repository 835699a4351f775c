//! # pomo Core Library
//!
//! Core logic for the `pomo` focus/rest timer. The CLI is a thin layer over
//! this crate: it parses arguments and draws to the terminal, everything
//! else lives here.
//!
//! ## Architecture
//!
//! - **Session clock**: a tick-counting state machine for timed sessions and
//!   open-ended stopwatches, cancelled through a shared token
//! - **Stats**: one aggregate record per calendar date, updated write-through
//! - **Storage**: a JSON stat store keyed by date with a tolerant legacy
//!   decoder, and TOML configuration
//! - **Reports**: F/R ratio, today's summary and the rolling ratio graph
//!
//! ## Key Components
//!
//! - [`SessionClock`]: Session state machine
//! - [`StatManager`]: Today-scoped reads and writes over a [`StatStore`]
//! - [`JsonStatStore`]: File-backed stat store
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod report;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError};
pub use events::{Notifier, NullObserver, SessionObserver, SilentNotifier};
pub use report::{GraphReport, GraphSettings, Rating, Ratio, TodaySummary};
pub use stats::{DailyStat, StatManager};
pub use storage::{Config, JsonStatStore, MemoryStatStore, StatMap, StatStore};
pub use timer::{
    CancelToken, ClockSnapshot, ClockState, SessionClock, SessionKind, SessionMode, SessionOutcome,
    SessionSpec, SleepTicker, Ticker,
};
