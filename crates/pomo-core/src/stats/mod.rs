//! Daily statistics
//!
//! One [`DailyStat`] per calendar date, and the [`StatManager`] that binds
//! the stat store to today's date.

mod daily;
mod manager;

pub use daily::DailyStat;
pub use manager::StatManager;
