//! Dashboard view-model types.

use crate::record::{
    AnalyticsEvent, HealthMetrics, JournalMetrics, MeditationKind, MeditationSession, MoodEntry,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over the rolling window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub mood_streak: u32,
    pub meditation_streak: u32,
    pub journal_streak: u32,
    pub total_sessions: usize,
    pub total_journals: usize,
    pub average_mood: f64,
    pub total_steps: u64,
}

/// The five windowed collections plus their statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub moods: Vec<MoodEntry>,
    pub meditations: Vec<MeditationSession>,
    pub journals: Vec<JournalMetrics>,
    pub health: Vec<HealthMetrics>,
    pub analytics: Vec<AnalyticsEvent>,
    pub stats: DashboardStats,
}

/// Raw, unfiltered collections as loaded from the store.
#[derive(Debug, Clone, Default)]
pub struct RawCollections {
    pub moods: Vec<MoodEntry>,
    pub meditations: Vec<MeditationSession>,
    pub journals: Vec<JournalMetrics>,
    pub health: Vec<HealthMetrics>,
    pub analytics: Vec<AnalyticsEvent>,
}

/// One day of the mood chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodTrendPoint {
    pub date: NaiveDate,
    /// Short weekday name, e.g. `Mon`.
    pub label: String,
    /// Mean mood value on that date, 0 when nothing was logged.
    pub average: f64,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySteps {
    pub date: NaiveDate,
    pub steps: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSummary {
    /// Live pedometer value if present, else today's stored total.
    pub today: u64,
    pub goal: u64,
    pub goal_percent: u32,
    /// Seven UTC days, oldest first.
    pub weekly: Vec<DailySteps>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateSummary {
    pub current: u32,
    pub average: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindMinutes {
    pub kind: MeditationKind,
    pub minutes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindfulMinutes {
    pub total: u32,
    pub breakdown: Vec<KindMinutes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenActivity {
    pub screen: String,
    pub events: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoals {
    pub journal_entry: bool,
    pub mood_check_in: bool,
    pub meditation: bool,
}

/// Everything the dashboard screen renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub mood_trend: Vec<MoodTrendPoint>,
    pub steps: StepSummary,
    pub heart: HeartRateSummary,
    pub mindful_minutes: MindfulMinutes,
    pub screen_activity: Vec<ScreenActivity>,
    pub daily_goals: DailyGoals,
}
