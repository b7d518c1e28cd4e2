//! Wellness record domain model.
//!
//! Every record is a flat, timestamped value stored inside a per-category JSON
//! array. Field names follow the on-disk format (`camelCase`).

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Mood value used when a label is not part of [`MoodLabel`].
pub const NEUTRAL_MOOD_VALUE: u8 = 3;

/// The fixed set of mood labels offered by the mood picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum MoodLabel {
    #[strum(serialize = "Very Happy")]
    VeryHappy,
    #[strum(serialize = "Happy")]
    Happy,
    #[strum(serialize = "Neutral")]
    Neutral,
    #[strum(serialize = "Sad")]
    Sad,
    #[strum(serialize = "Very Sad")]
    VerySad,
}

impl MoodLabel {
    /// Numeric mood score in `1..=5`.
    pub fn value(self) -> u8 {
        match self {
            MoodLabel::VeryHappy => 5,
            MoodLabel::Happy => 4,
            MoodLabel::Neutral => 3,
            MoodLabel::Sad => 2,
            MoodLabel::VerySad => 1,
        }
    }

    /// Emoji used by the journal mood picker.
    pub fn emoji(self) -> &'static str {
        match self {
            MoodLabel::VeryHappy => "😄",
            MoodLabel::Happy => "😊",
            MoodLabel::Neutral => "😐",
            MoodLabel::Sad => "😞",
            MoodLabel::VerySad => "😢",
        }
    }

    /// Maps a free-form label to its score, defaulting to neutral.
    pub fn value_for(label: &str) -> u8 {
        label
            .parse::<MoodLabel>()
            .map(MoodLabel::value)
            .unwrap_or(NEUTRAL_MOOD_VALUE)
    }

    /// All labels in picker order.
    pub fn all() -> Vec<MoodLabel> {
        MoodLabel::iter().collect()
    }
}

/// Guided meditation tracks offered by the meditation screens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum MeditationKind {
    #[strum(serialize = "Mindful Breathing")]
    #[serde(rename = "Mindful Breathing")]
    MindfulBreathing,
    #[strum(serialize = "Body Scan")]
    #[serde(rename = "Body Scan")]
    BodyScan,
    #[strum(serialize = "Relaxation Journey")]
    #[serde(rename = "Relaxation Journey")]
    RelaxationJourney,
}

/// Records carrying a millisecond epoch timestamp.
pub trait Timestamped {
    fn timestamp_ms(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub timestamp: i64,
    pub mood: String,
    pub value: u8,
}

impl MoodEntry {
    /// Builds an entry, deriving `value` from the label.
    pub fn new(timestamp: i64, mood: impl Into<String>) -> Self {
        let mood = mood.into();
        let value = MoodLabel::value_for(&mood);
        Self {
            timestamp,
            mood,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeditationSession {
    pub timestamp: i64,
    /// Length in seconds.
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: MeditationKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalMetrics {
    pub timestamp: i64,
    pub word_count: u32,
    #[serde(default, alias = "category")]
    pub categories: Vec<String>,
    /// Mood label; older records stored the whole `{emoji, label}` object.
    #[serde(
        default,
        deserialize_with = "deserialize_mood_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MoodField {
    Label(String),
    Tagged { label: String },
}

fn deserialize_mood_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<MoodField>::deserialize(deserializer)?.map(|field| match field {
        MoodField::Label(label) | MoodField::Tagged { label } => label,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub timestamp: i64,
    pub heart_rate: u32,
    pub steps: u64,
}

fn default_action() -> String {
    "view".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub screen: String,
    #[serde(default = "default_action")]
    pub action: String,
    pub timestamp: i64,
}

macro_rules! impl_timestamped {
    ($($ty:ty),*) => {
        $(impl Timestamped for $ty {
            fn timestamp_ms(&self) -> i64 {
                self.timestamp
            }
        })*
    };
}

impl_timestamped!(
    MoodEntry,
    MeditationSession,
    JournalMetrics,
    HealthMetrics,
    AnalyticsEvent
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_map_into_range() {
        for label in MoodLabel::all() {
            let entry = MoodEntry::new(0, label.to_string());
            assert!((1..=5).contains(&entry.value), "{label} out of range");
            assert_eq!(entry.value, label.value());
        }
    }

    #[test]
    fn test_unknown_label_defaults_to_neutral() {
        let entry = MoodEntry::new(0, "Ecstatic");
        assert_eq!(entry.value, 3);
        assert_eq!(entry.mood, "Ecstatic");
    }

    #[test]
    fn test_meditation_kind_wire_name() {
        let session = MeditationSession {
            timestamp: 1,
            duration: 300,
            kind: MeditationKind::BodyScan,
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["type"], "Body Scan");
        assert_eq!("Body Scan".parse::<MeditationKind>().unwrap(), MeditationKind::BodyScan);
    }

    #[test]
    fn test_journal_metrics_accepts_legacy_category_field() {
        let metrics: JournalMetrics =
            serde_json::from_str(r#"{"timestamp":5,"wordCount":12,"category":["Work"]}"#).unwrap();
        assert_eq!(metrics.categories, vec!["Work".to_string()]);
        assert_eq!(metrics.mood, None);
    }

    #[test]
    fn test_journal_metrics_mood_object() {
        let metrics: JournalMetrics = serde_json::from_str(
            r#"{"timestamp":5,"wordCount":3,"categories":[],"mood":{"emoji":"😊","label":"Happy"}}"#,
        )
        .unwrap();
        assert_eq!(metrics.mood.as_deref(), Some("Happy"));
    }

    #[test]
    fn test_analytics_action_defaults_to_view() {
        let event: AnalyticsEvent =
            serde_json::from_str(r#"{"screen":"Dashboard","timestamp":9}"#).unwrap();
        assert_eq!(event.action, "view");
    }
}
