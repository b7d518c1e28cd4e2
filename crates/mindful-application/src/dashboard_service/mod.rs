//! Dashboard engine.
//!
//! `DashboardService` owns every read-modify-write against the key-value
//! store: fire-and-forget record appends, first-run seeding, the windowed
//! snapshot, and therapy/journal CRUD. Appends and snapshot loads never fail
//! from the caller's point of view; persistence problems are logged and
//! degrade to empty collections.

mod journal;
mod key_locks;
mod therapy;

use futures::future::join_all;
use key_locks::KeyLocks;
use mindful_core::clock::Clock;
use mindful_core::config::{DEFAULT_STEP_GOAL, MindfulConfig};
use mindful_core::dashboard::{
    Calendar, DashboardSnapshot, DashboardView, RawCollections, build_snapshot,
};
use mindful_core::error::Result;
use mindful_core::record::{
    AnalyticsEvent, HealthMetrics, JournalMetrics, MeditationKind, MeditationSession, MoodEntry,
};
use mindful_core::seed::{SEEDED_KEYS, sample_for_key};
use mindful_core::store::{
    KeyValueStore, decode_collection, decode_collection_strict, encode_collection, keys,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Action recorded when an event is logged without one.
pub const DEFAULT_EVENT_ACTION: &str = "view";

/// Dashboard behaviour knobs, usually taken from `[dashboard]` in the config.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub calendar: Calendar,
    pub step_goal: u64,
    pub seed_sample_data: bool,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            calendar: Calendar::local(),
            step_goal: DEFAULT_STEP_GOAL,
            seed_sample_data: true,
        }
    }
}

impl DashboardSettings {
    pub fn from_config(config: &MindfulConfig) -> Result<Self> {
        Ok(Self {
            calendar: config.calendar()?,
            step_goal: config.dashboard.step_goal,
            seed_sample_data: config.dashboard.seed_sample_data,
        })
    }
}

pub struct DashboardService {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    settings: DashboardSettings,
    locks: KeyLocks,
}

impl DashboardService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            store,
            clock,
            settings,
            locks: KeyLocks::new(),
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn calendar(&self) -> &Calendar {
        &self.settings.calendar
    }

    /// Current time according to the service clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ------------------------------------------------------------------
    // Write-through appends
    // ------------------------------------------------------------------

    /// Logs a mood check-in. Unknown labels are stored with the neutral value.
    pub async fn record_mood(&self, label: &str) {
        let entry = MoodEntry::new(self.now().timestamp_millis(), label);
        self.append_logged(keys::MOOD_ENTRIES, entry).await;
    }

    pub async fn record_meditation(&self, duration_secs: u32, kind: MeditationKind) {
        let session = MeditationSession {
            timestamp: self.now().timestamp_millis(),
            duration: duration_secs,
            kind,
        };
        self.append_logged(keys::MEDITATION_SESSIONS, session).await;
    }

    pub async fn record_journal_metrics(&self, word_count: u32, categories: Vec<String>) {
        let metrics = JournalMetrics {
            timestamp: self.now().timestamp_millis(),
            word_count,
            categories,
            mood: None,
            title: None,
        };
        self.append_logged(keys::JOURNAL_METRICS, metrics).await;
    }

    pub async fn record_health_sample(&self, heart_rate: u32, steps: u64) {
        let sample = HealthMetrics {
            timestamp: self.now().timestamp_millis(),
            heart_rate,
            steps,
        };
        self.append_logged(keys::HEALTH_METRICS, sample).await;
    }

    /// Records a screen event; `action` defaults to `view`.
    pub async fn record_event(&self, screen: &str, action: Option<&str>) {
        let event = AnalyticsEvent {
            screen: screen.to_string(),
            action: action.unwrap_or(DEFAULT_EVENT_ACTION).to_string(),
            timestamp: self.now().timestamp_millis(),
        };
        self.append_logged(keys::ANALYTICS_EVENTS, event).await;
    }

    // ------------------------------------------------------------------
    // Seeding and snapshot
    // ------------------------------------------------------------------

    /// Writes the sample dataset under every seeded key that holds no value.
    ///
    /// Runs against the store on every call. Returns the number of keys seeded.
    pub async fn seed_if_empty(&self, now: DateTime<Utc>) -> usize {
        if !self.settings.seed_sample_data {
            return 0;
        }
        let results = join_all(SEEDED_KEYS.iter().map(|key| self.seed_key(key, now))).await;
        results.into_iter().filter(|seeded| *seeded).count()
    }

    async fn seed_key(&self, key: &str, now: DateTime<Utc>) -> bool {
        let _guard = self.locks.acquire(key).await;

        match self.store.get(key).await {
            Ok(Some(raw)) if !raw.trim().is_empty() => false,
            Ok(_) => match sample_for_key(key, now, &self.settings.calendar) {
                Ok(Some(sample)) => match self.store.set(key, &sample).await {
                    Ok(()) => {
                        tracing::info!(key, "seeded sample data");
                        true
                    }
                    Err(e) => {
                        tracing::error!(key, error = %e, "failed to write sample data");
                        false
                    }
                },
                Ok(None) => false,
                Err(e) => {
                    tracing::error!(key, error = %e, "failed to encode sample data");
                    false
                }
            },
            Err(e) => {
                tracing::error!(key, error = %e, "failed to check key before seeding");
                false
            }
        }
    }

    /// Loads the five dashboard collections concurrently, each defaulting to
    /// empty on failure.
    pub async fn load_raw_collections(&self) -> RawCollections {
        let (moods, meditations, journals, health, analytics) = tokio::join!(
            self.load_or_empty::<MoodEntry>(keys::MOOD_ENTRIES),
            self.load_or_empty::<MeditationSession>(keys::MEDITATION_SESSIONS),
            self.load_or_empty::<JournalMetrics>(keys::JOURNAL_METRICS),
            self.load_or_empty::<HealthMetrics>(keys::HEALTH_METRICS),
            self.load_or_empty::<AnalyticsEvent>(keys::ANALYTICS_EVENTS),
        );
        RawCollections {
            moods,
            meditations,
            journals,
            health,
            analytics,
        }
    }

    /// Seeds if needed, then computes the windowed snapshot at `now`.
    pub async fn get_dashboard_snapshot(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        self.seed_if_empty(now).await;
        let raw = self.load_raw_collections().await;
        let snapshot = build_snapshot(raw, &self.settings.calendar, now);
        tracing::debug!(
            moods = snapshot.moods.len(),
            meditations = snapshot.meditations.len(),
            journals = snapshot.journals.len(),
            health = snapshot.health.len(),
            analytics = snapshot.analytics.len(),
            "built dashboard snapshot"
        );
        snapshot
    }

    /// Snapshot plus everything the dashboard screen derives from it.
    pub async fn dashboard_view(&self, now: DateTime<Utc>, live_steps: Option<u64>) -> DashboardView {
        let snapshot = self.get_dashboard_snapshot(now).await;
        DashboardView::build(
            &snapshot,
            &self.settings.calendar,
            now,
            live_steps,
            self.settings.step_goal,
        )
    }

    // ------------------------------------------------------------------
    // Collection helpers
    // ------------------------------------------------------------------

    /// Reads a collection for display. Store failures propagate; a damaged
    /// value is treated as an empty collection.
    async fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        match decode_collection(key, &raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is not a collection, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Reads a collection that is about to be rewritten. Anything the write
    /// would silently drop (a non-array value, an unreadable record) is an
    /// error instead.
    async fn load_for_update<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.store.get(key).await? {
            Some(raw) if !raw.trim().is_empty() => decode_collection_strict(key, &raw),
            _ => Ok(Vec::new()),
        }
    }

    async fn load_or_empty<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.load_collection(key).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to load collection");
                Vec::new()
            }
        }
    }

    async fn store_collection<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let encoded = encode_collection(records)?;
        self.store.set(key, &encoded).await
    }

    async fn append<T: Serialize + DeserializeOwned>(&self, key: &str, record: T) -> Result<()> {
        let _guard = self.locks.acquire(key).await;
        let mut records: Vec<T> = self.load_for_update(key).await?;
        records.push(record);
        self.store_collection(key, &records).await
    }

    async fn append_logged<T: Serialize + DeserializeOwned>(&self, key: &str, record: T) {
        if let Err(e) = self.append(key, record).await {
            tracing::error!(key, error = %e, "failed to append record");
        }
    }
}

/// Time-based id, bumped past any id already taken.
fn next_time_id<'a>(now: DateTime<Utc>, taken: impl Iterator<Item = &'a str> + Clone) -> String {
    let mut candidate = now.timestamp_millis();
    while taken.clone().any(|id| id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_time_id_skips_taken() {
        let now = DateTime::<Utc>::from_timestamp_millis(1_000).unwrap();
        let taken = ["1000", "1001", "7"];
        assert_eq!(next_time_id(now, taken.iter().copied()), "1002");
        assert_eq!(next_time_id(now, std::iter::empty()), "1000");
    }
}
