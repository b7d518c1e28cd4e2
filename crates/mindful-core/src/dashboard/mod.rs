//! Dashboard aggregation: rolling-window statistics and view derivation.

pub mod aggregate;
pub mod calendar;
pub mod model;

pub use aggregate::{build_snapshot, calculate_streak, filter_recent};
pub use calendar::{Calendar, CalendarZone};
pub use model::{
    DailyGoals, DailySteps, DashboardSnapshot, DashboardStats, DashboardView, HeartRateSummary,
    KindMinutes, MindfulMinutes, MoodTrendPoint, RawCollections, ScreenActivity, StepSummary,
};
