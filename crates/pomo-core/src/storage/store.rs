//! Keyed-by-date stat storage.
//!
//! The on-disk file is a JSON document:
//!
//! ```text
//! { "version": 1, "days": { "2024-05-01": { "total_time_focused": 1500, ... } } }
//! ```
//!
//! Files written before the envelope existed are a bare date-to-record map
//! and are still accepted. Every save rewrites the whole file. The write is
//! not atomic: a crash halfway through can leave a truncated file behind,
//! and two processes saving at once race with the last writer winning.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::Serialize;
use serde_json::Value;

use super::record::{decode_record, RecordShape};
use crate::error::{CoreError, Result};
use crate::stats::DailyStat;

/// All persisted records, ordered by date.
pub type StatMap = BTreeMap<NaiveDate, DailyStat>;

/// Version written into the file envelope.
pub const STORE_VERSION: u32 = 1;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

fn is_date_key(key: &str) -> bool {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).is_ok()
}

/// Repository of day records.
///
/// Implementations hand out owned copies; mutation goes through a full
/// `save` of the updated map.
pub trait StatStore {
    /// Read every record.
    fn load(&self) -> Result<StatMap>;

    /// Replace the stored contents with `stats`.
    fn save(&self, stats: &StatMap) -> Result<()>;
}

impl<S: StatStore + ?Sized> StatStore for &S {
    fn load(&self) -> Result<StatMap> {
        (**self).load()
    }

    fn save(&self, stats: &StatMap) -> Result<()> {
        (**self).save(stats)
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    days: &'a StatMap,
}

/// JSON file backed store.
#[derive(Debug, Clone)]
pub struct JsonStatStore {
    path: PathBuf,
}

impl JsonStatStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `stats.json` inside the data directory, or at the path
    /// given in config.
    pub fn open_default(config: &super::Config) -> Result<Self> {
        Ok(Self::new(config.stats_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CoreError::storage(parent, e))?;
        }
        Ok(())
    }

    fn parse(&self, bytes: &[u8]) -> Result<StatMap> {
        let corrupt = |source| CoreError::CorruptStore {
            path: self.path.clone(),
            source,
        };

        let root: Value = serde_json::from_slice(bytes).map_err(corrupt)?;
        let Value::Object(mut root) = root else {
            return Err(corrupt(serde_json::Error::custom(
                "expected an object at the top level",
            )));
        };

        // Enveloped file, or a bare map from before the envelope existed.
        // A version-less `{"days": {...}}` is still an envelope unless the
        // root also carries date keys of its own.
        let version = root.get("version").cloned();
        let enveloped = matches!(root.get("days"), Some(Value::Object(_)))
            && (version.is_some() || !root.keys().any(|k| is_date_key(k)));
        let days = match root.remove("days") {
            Some(Value::Object(days)) if enveloped => {
                match &version {
                    Some(v) if v.as_u64().is_some_and(|v| v > STORE_VERSION as u64) => {
                        tracing::warn!(
                            path = %self.path.display(),
                            version = %v,
                            "stat store written by a newer version, reading what is understood"
                        );
                    }
                    None => tracing::debug!(
                        path = %self.path.display(),
                        "stat store envelope without a version, reading as current"
                    ),
                    Some(_) => {}
                }
                days
            }
            Some(days) => {
                root.insert("days".to_string(), days);
                root
            }
            None => root,
        };

        let mut stats = StatMap::new();
        for (key, value) in days {
            let Ok(date) = NaiveDate::parse_from_str(&key, DATE_KEY_FORMAT) else {
                tracing::warn!(key = %key, "skipping stat record with a non-date key");
                continue;
            };
            let stat = match decode_record(&value) {
                Some((stat, RecordShape::Current)) => stat,
                Some((stat, shape)) => {
                    tracing::debug!(%date, ?shape, "normalized legacy stat record");
                    stat
                }
                None => {
                    tracing::warn!(%date, "unreadable stat record, treating the day as empty");
                    DailyStat::default()
                }
            };
            stats.insert(date, stat);
        }
        Ok(stats)
    }
}

impl StatStore for JsonStatStore {
    /// Missing file: created empty. Zero-length file: empty map.
    fn load(&self) -> Result<StatMap> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "creating empty stat store");
                let empty = StatMap::new();
                self.save(&empty)?;
                return Ok(empty);
            }
            Err(e) => return Err(CoreError::storage(&self.path, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(StatMap::new());
        }

        let stats = self.parse(&bytes)?;
        tracing::debug!(path = %self.path.display(), days = stats.len(), "loaded stat store");
        Ok(stats)
    }

    fn save(&self, stats: &StatMap) -> Result<()> {
        self.ensure_parent()?;
        let content = serde_json::to_vec_pretty(&Envelope {
            version: STORE_VERSION,
            days: stats,
        })?;
        fs::write(&self.path, content).map_err(|e| CoreError::storage(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), days = stats.len(), "saved stat store");
        Ok(())
    }
}

/// In-process store, used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStatStore {
    stats: RefCell<StatMap>,
    saves: RefCell<usize>,
}

impl MemoryStatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stats(stats: StatMap) -> Self {
        Self {
            stats: RefCell::new(stats),
            saves: RefCell::new(0),
        }
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl StatStore for MemoryStatStore {
    fn load(&self) -> Result<StatMap> {
        Ok(self.stats.borrow().clone())
    }

    fn save(&self, stats: &StatMap) -> Result<()> {
        *self.stats.borrow_mut() = stats.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}
