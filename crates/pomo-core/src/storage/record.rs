//! Versioned decoding of persisted day records.
//!
//! The current shape is tried first. Older files may hold records written by
//! earlier releases: objects carrying a class/type tag, objects with short
//! field names, or bare positional arrays. Each legacy decoder normalizes to
//! the current [`DailyStat`]. Embedded tags are never used to pick a type;
//! they are stripped and the payload is decoded on its own merits.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::stats::DailyStat;

/// Which decoder accepted a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    Current,
    Tagged,
    ShortKeys,
    Positional,
}

type LegacyDecoder = fn(&Value) -> Option<DailyStat>;

const LEGACY_DECODERS: &[(RecordShape, LegacyDecoder)] = &[
    (RecordShape::Tagged, decode_tagged),
    (RecordShape::ShortKeys, decode_short_keys),
    (RecordShape::Positional, decode_positional),
];

/// Keys older writers used to name the record's class.
const TAG_KEYS: &[&str] = &["__type__", "__class__", "type", "class"];

/// Keys that wrapped an object's fields in tagged records.
const STATE_KEYS: &[&str] = &["__state__", "__dict__", "state", "fields"];

const KNOWN_KEYS: &[&str] = &[
    "total_time_focused",
    "total_time_rested",
    "focus_sessions_completed",
    "rest_sessions_completed",
    "focused",
    "rested",
    "focus_sessions",
    "rest_sessions",
];

/// Decode a single record, returning the shape that matched.
///
/// `None` means no decoder understood the value; the caller treats that day
/// as missing.
pub fn decode_record(value: &Value) -> Option<(DailyStat, RecordShape)> {
    if let Ok(stat) = DailyStat::deserialize(value) {
        return Some((stat, RecordShape::Current));
    }
    LEGACY_DECODERS
        .iter()
        .find_map(|(shape, decode)| decode(value).map(|stat| (stat, *shape)))
}

fn decode_tagged(value: &Value) -> Option<DailyStat> {
    let obj = value.as_object()?;
    if !TAG_KEYS.iter().any(|k| obj.contains_key(*k)) {
        return None;
    }

    if let Some(inner) = STATE_KEYS.iter().find_map(|k| obj.get(*k)) {
        return decode_untagged(inner);
    }

    let stripped: Map<String, Value> = obj
        .iter()
        .filter(|(k, _)| !TAG_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    decode_untagged(&Value::Object(stripped))
}

fn decode_untagged(value: &Value) -> Option<DailyStat> {
    DailyStat::deserialize(value)
        .ok()
        .or_else(|| decode_short_keys(value))
        .or_else(|| decode_positional(value))
}

/// Field names are optional here; older records did not always carry
/// every counter.
#[derive(Deserialize)]
struct LenientStat {
    #[serde(default, alias = "focused")]
    total_time_focused: u64,
    #[serde(default, alias = "rested")]
    total_time_rested: u64,
    #[serde(default, alias = "focus_sessions")]
    focus_sessions_completed: u64,
    #[serde(default, alias = "rest_sessions")]
    rest_sessions_completed: u64,
}

fn decode_short_keys(value: &Value) -> Option<DailyStat> {
    let obj = value.as_object()?;
    if !obj.keys().any(|k| KNOWN_KEYS.contains(&k.as_str())) {
        return None;
    }
    let lenient = LenientStat::deserialize(value).ok()?;
    Some(DailyStat {
        total_time_focused: lenient.total_time_focused,
        total_time_rested: lenient.total_time_rested,
        focus_sessions_completed: lenient.focus_sessions_completed,
        rest_sessions_completed: lenient.rest_sessions_completed,
    })
}

/// `[focused, rested, focus_sessions, rest_sessions]`, trailing counters
/// optional.
fn decode_positional(value: &Value) -> Option<DailyStat> {
    let items = value.as_array()?;
    if items.len() < 2 || items.len() > 4 {
        return None;
    }
    let nums = items
        .iter()
        .map(Value::as_u64)
        .collect::<Option<Vec<u64>>>()?;
    Some(DailyStat {
        total_time_focused: nums[0],
        total_time_rested: nums[1],
        focus_sessions_completed: nums.get(2).copied().unwrap_or(0),
        rest_sessions_completed: nums.get(3).copied().unwrap_or(0),
    })
}
