//! Key-value persistence contract.
//!
//! Every record category lives under one string key as a JSON array. The
//! store itself knows nothing about records; encoding and tolerant decoding
//! happen here so every backend shares them.

use crate::error::{MindfulError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Storage keys, one JSON array per record category.
pub mod keys {
    pub const MOOD_ENTRIES: &str = "moodEntries";
    pub const MEDITATION_SESSIONS: &str = "meditationSessions";
    pub const JOURNAL_ENTRIES: &str = "journalEntries";
    pub const JOURNAL_METRICS: &str = "journalMetrics";
    pub const HEALTH_METRICS: &str = "healthMetrics";
    pub const ANALYTICS_EVENTS: &str = "analyticsEvents";
    pub const THERAPY_SESSIONS: &str = "therapySessions";

    /// Every key the engine reads or writes.
    pub const ALL: [&str; 7] = [
        MOOD_ENTRIES,
        MEDITATION_SESSIONS,
        JOURNAL_ENTRIES,
        JOURNAL_METRICS,
        HEALTH_METRICS,
        ANALYTICS_EVENTS,
        THERAPY_SESSIONS,
    ];
}

/// An asynchronous string-keyed store holding serialized JSON.
///
/// An absent key is a normal state (`Ok(None)`), not an error. `set` after
/// `get` is not atomic; callers that read-modify-write must serialize
/// themselves.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the serialized value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Decodes a stored collection, tolerating damage.
///
/// A value that is not a JSON array yields an error; individual elements
/// that fail to decode are skipped with a warning.
pub fn decode_collection<T: DeserializeOwned>(key: &str, raw: &str) -> Result<Vec<T>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(key, error = %e, "skipping malformed record");
                None
            }
        })
        .collect();
    if records.len() < total {
        tracing::debug!(key, kept = records.len(), total, "decoded collection with skips");
    }
    Ok(records)
}

/// Decodes a stored collection that is about to be rewritten.
///
/// Unlike [`decode_collection`], any element that fails to decode is an
/// error, so a write never drops records it could not read.
pub fn decode_collection_strict<T: DeserializeOwned>(key: &str, raw: &str) -> Result<Vec<T>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<T>(value).map_err(|e| {
                MindfulError::data_access(format!("{}[{}] is unreadable: {}", key, index, e))
            })
        })
        .collect()
}

/// Encodes a collection as a JSON array.
pub fn encode_collection<T: Serialize>(records: &[T]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MoodEntry;

    #[test]
    fn test_decode_skips_bad_elements() {
        let raw = r#"[{"timestamp":1,"mood":"Happy","value":4},{"timestamp":"nope"},{"timestamp":2,"mood":"Sad","value":2}]"#;
        let entries: Vec<MoodEntry> = decode_collection(keys::MOOD_ENTRIES, raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].mood, "Sad");
    }

    #[test]
    fn test_strict_decode_rejects_bad_elements() {
        let raw = r#"[{"timestamp":1,"mood":"Happy","value":4},{"timestamp":"nope"}]"#;
        let err = decode_collection_strict::<MoodEntry>(keys::MOOD_ENTRIES, raw).unwrap_err();
        assert!(err.to_string().contains("moodEntries[1]"));

        let ok: Vec<MoodEntry> =
            decode_collection_strict(keys::MOOD_ENTRIES, r#"[{"timestamp":1,"mood":"Happy","value":4}]"#).unwrap();
        assert_eq!(ok.len(), 1);
        assert!(decode_collection_strict::<MoodEntry>(keys::MOOD_ENTRIES, "{}").is_err());
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let result: Result<Vec<MoodEntry>> = decode_collection(keys::MOOD_ENTRIES, r#"{"a":1}"#);
        assert!(result.is_err());
    }
}
