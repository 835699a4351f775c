mod clock;
mod session;

pub use clock::{
    CancelToken, ClockSnapshot, ClockState, SessionClock, SessionOutcome, SleepTicker, Ticker,
    FIXED_TICKS_PER_SEC, STOPWATCH_TICKS_PER_SEC,
};
pub use session::{SessionKind, SessionMode, SessionSpec, MAX_SESSION_MINUTES};
