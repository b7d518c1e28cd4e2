//! Journal entry domain model.

use crate::record::{JournalMetrics, MoodLabel};
use serde::{Deserialize, Serialize};

/// Mood attached to a journal entry by the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalMood {
    pub emoji: String,
    pub label: String,
}

impl From<MoodLabel> for JournalMood {
    fn from(label: MoodLabel) -> Self {
        Self {
            emoji: label.emoji().to_string(),
            label: label.to_string(),
        }
    }
}

/// A saved journal entry. Entries are overwritten or removed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    /// `YYYY-MM-DD` in the writer's calendar.
    pub date: String,
    /// `HH:MM`, 24-hour.
    pub time: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<JournalMood>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl JournalEntry {
    /// Number of whitespace-separated words in the content.
    pub fn word_count(&self) -> u32 {
        self.content.split_whitespace().count() as u32
    }

    /// Dashboard metrics derived from this entry at save time.
    pub fn metrics(&self) -> JournalMetrics {
        JournalMetrics {
            timestamp: self.timestamp,
            word_count: self.word_count(),
            categories: self.categories.clone(),
            mood: self.mood.as_ref().map(|m| m.label.clone()),
            title: Some(self.title.clone()),
        }
    }
}

/// What the writer submits; `id` is set when editing an existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalDraft {
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub mood: Option<JournalMood>,
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_from_entry() {
        let entry = JournalEntry {
            id: "1".to_string(),
            title: "Morning".to_string(),
            content: "  slept well,\n feeling   rested ".to_string(),
            date: "2026-03-10".to_string(),
            time: "08:15".to_string(),
            timestamp: 42,
            mood: Some(JournalMood {
                emoji: "🙂".to_string(),
                label: "Calm".to_string(),
            }),
            categories: vec!["Health".to_string()],
        };
        let metrics = entry.metrics();
        assert_eq!(metrics.word_count, 4);
        assert_eq!(metrics.timestamp, 42);
        assert_eq!(metrics.mood.as_deref(), Some("Calm"));
        assert_eq!(metrics.title.as_deref(), Some("Morning"));
    }

    #[test]
    fn test_mood_from_label() {
        let mood = JournalMood::from(MoodLabel::VerySad);
        assert_eq!(mood.label, "Very Sad");
        assert_eq!(mood.emoji, "😢");
    }
}
