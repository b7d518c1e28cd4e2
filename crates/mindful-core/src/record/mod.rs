//! Timestamped wellness records.

pub mod model;

pub use model::{
    AnalyticsEvent, HealthMetrics, JournalMetrics, MeditationKind, MeditationSession, MoodEntry,
    MoodLabel, NEUTRAL_MOOD_VALUE, Timestamped,
};
