mod config;
pub mod record;
pub mod store;

pub use config::{Config, NotificationsConfig, ReportConfig, StorageConfig, TimerConfig};
pub use record::{decode_record, RecordShape};
pub use store::{JsonStatStore, MemoryStatStore, StatMap, StatStore, STORE_VERSION};

use std::path::PathBuf;

use crate::error::{CoreError, Result};

/// Returns the pomo data directory, creating it if needed.
///
/// `POMO_HOME` overrides the location outright. Otherwise this is
/// `~/.config/pomo/`, or `~/.config/pomo-dev/` when `POMO_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("POMO_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("POMO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomo-dev")
            } else {
                base_dir.join("pomo")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| CoreError::storage(&dir, e))?;
    Ok(dir)
}
