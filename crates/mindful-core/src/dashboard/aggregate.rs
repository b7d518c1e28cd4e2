//! Pure aggregation over wellness records.
//!
//! Nothing here touches storage: given the same records, calendar, and `now`
//! every function returns the same answer.

use super::calendar::{Calendar, RECENT_WINDOW_DAYS, utc_date, window_start_ms};
use super::model::{
    DailyGoals, DailySteps, DashboardSnapshot, DashboardStats, DashboardView, HeartRateSummary,
    KindMinutes, MindfulMinutes, MoodTrendPoint, RawCollections, ScreenActivity, StepSummary,
};
use crate::record::{
    AnalyticsEvent, HealthMetrics, MeditationKind, MeditationSession, MoodEntry, Timestamped,
};
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Keeps records strictly newer than `now - 7 days`.
pub fn filter_recent<T: Timestamped>(records: Vec<T>, now: DateTime<Utc>) -> Vec<T> {
    let start = window_start_ms(now);
    records
        .into_iter()
        .filter(|r| r.timestamp_ms() > start)
        .collect()
}

/// Consecutive calendar days with at least one record, counted back from today.
///
/// Stops at the first day without a record (today included), and never
/// looks further back than the rolling window.
pub fn calculate_streak<T: Timestamped>(
    records: &[T],
    calendar: &Calendar,
    now: DateTime<Utc>,
) -> u32 {
    if records.is_empty() {
        return 0;
    }

    let days: HashSet<NaiveDate> = records
        .iter()
        .filter_map(|r| calendar.date_of(r.timestamp_ms()))
        .collect();
    let today = calendar.today(now);

    let mut streak = 0;
    for offset in 0..RECENT_WINDOW_DAYS as u64 {
        match today.checked_sub_days(Days::new(offset)) {
            Some(day) if days.contains(&day) => streak += 1,
            _ => break,
        }
    }
    streak
}

/// Mean mood value, 0 for an empty slice.
pub fn average_mood(moods: &[MoodEntry]) -> f64 {
    let sum: u32 = moods.iter().map(|m| u32::from(m.value)).sum();
    f64::from(sum) / moods.len().max(1) as f64
}

pub fn total_steps(health: &[HealthMetrics]) -> u64 {
    health.iter().map(|h| h.steps).sum()
}

/// Computes the windowed snapshot from raw collections.
pub fn build_snapshot(
    raw: RawCollections,
    calendar: &Calendar,
    now: DateTime<Utc>,
) -> DashboardSnapshot {
    let moods = filter_recent(raw.moods, now);
    let meditations = filter_recent(raw.meditations, now);
    let journals = filter_recent(raw.journals, now);
    let health = filter_recent(raw.health, now);
    let analytics = filter_recent(raw.analytics, now);

    let stats = DashboardStats {
        mood_streak: calculate_streak(&moods, calendar, now),
        meditation_streak: calculate_streak(&meditations, calendar, now),
        journal_streak: calculate_streak(&journals, calendar, now),
        total_sessions: meditations.len(),
        total_journals: journals.len(),
        average_mood: average_mood(&moods),
        total_steps: total_steps(&health),
    };

    DashboardSnapshot {
        moods,
        meditations,
        journals,
        health,
        analytics,
        stats,
    }
}

/// Per-day mood averages for the seven trailing calendar days, oldest first.
///
/// Buckets are keyed by date; the weekday name is only a label.
pub fn weekly_mood_trend(
    moods: &[MoodEntry],
    calendar: &Calendar,
    now: DateTime<Utc>,
) -> Vec<MoodTrendPoint> {
    let days = calendar.trailing_days(now, RECENT_WINDOW_DAYS as u64);
    let mut buckets: HashMap<NaiveDate, (u32, u32)> =
        days.iter().map(|d| (*d, (0, 0))).collect();

    for mood in moods {
        if let Some(date) = calendar.date_of(mood.timestamp)
            && let Some((sum, count)) = buckets.get_mut(&date)
        {
            *sum += u32::from(mood.value);
            *count += 1;
        }
    }

    days.into_iter()
        .map(|date| {
            let (sum, count) = buckets.get(&date).copied().unwrap_or_default();
            MoodTrendPoint {
                date,
                label: date.format("%a").to_string(),
                average: if count > 0 {
                    f64::from(sum) / f64::from(count)
                } else {
                    0.0
                },
                count,
            }
        })
        .collect()
}

/// Step totals bucketed by UTC date.
pub fn daily_steps(health: &[HealthMetrics]) -> BTreeMap<NaiveDate, u64> {
    let mut buckets = BTreeMap::new();
    for sample in health {
        if let Some(date) = utc_date(sample.timestamp) {
            *buckets.entry(date).or_insert(0) += sample.steps;
        }
    }
    buckets
}

/// Seven UTC days of step totals ending today, oldest first.
pub fn weekly_steps(health: &[HealthMetrics], now: DateTime<Utc>) -> Vec<DailySteps> {
    let buckets = daily_steps(health);
    let today = now.date_naive();
    (0..RECENT_WINDOW_DAYS as u64)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| DailySteps {
            date,
            steps: buckets.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Today's step count: the live pedometer value supersedes stored samples.
pub fn todays_steps(health: &[HealthMetrics], now: DateTime<Utc>, live: Option<u64>) -> u64 {
    match live {
        Some(steps) => steps,
        None => daily_steps(health)
            .get(&now.date_naive())
            .copied()
            .unwrap_or(0),
    }
}

pub fn step_summary(
    health: &[HealthMetrics],
    now: DateTime<Utc>,
    live: Option<u64>,
    goal: u64,
) -> StepSummary {
    let today = todays_steps(health, now, live);
    let goal_percent = if goal == 0 {
        0
    } else {
        (today as f64 / goal as f64 * 100.0).round() as u32
    };
    StepSummary {
        today,
        goal,
        goal_percent,
        weekly: weekly_steps(health, now),
    }
}

/// Latest and mean heart rate over the samples, in stored order.
pub fn heart_rate_summary(health: &[HealthMetrics]) -> HeartRateSummary {
    let Some(last) = health.last() else {
        return HeartRateSummary::default();
    };
    let sum: u64 = health.iter().map(|h| u64::from(h.heart_rate)).sum();
    HeartRateSummary {
        current: last.heart_rate,
        average: (sum as f64 / health.len() as f64).round() as u32,
    }
}

pub fn mindful_minutes(meditations: &[MeditationSession]) -> MindfulMinutes {
    let mut seconds: BTreeMap<MeditationKind, u64> = BTreeMap::new();
    for session in meditations {
        *seconds.entry(session.kind).or_insert(0) += u64::from(session.duration);
    }

    let breakdown: Vec<KindMinutes> = seconds
        .into_iter()
        .map(|(kind, secs)| KindMinutes {
            kind,
            minutes: (secs / 60) as u32,
        })
        .collect();
    let total_secs: u64 = meditations.iter().map(|m| u64::from(m.duration)).sum();

    MindfulMinutes {
        total: (total_secs / 60) as u32,
        breakdown,
    }
}

/// Event counts per screen, busiest first.
pub fn screen_activity(events: &[AnalyticsEvent]) -> Vec<ScreenActivity> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for event in events {
        *counts.entry(event.screen.as_str()).or_insert(0) += 1;
    }
    let mut activity: Vec<ScreenActivity> = counts
        .into_iter()
        .map(|(screen, events)| ScreenActivity {
            screen: screen.to_string(),
            events,
        })
        .collect();
    activity.sort_by(|a, b| b.events.cmp(&a.events).then_with(|| a.screen.cmp(&b.screen)));
    activity
}

fn any_today<T: Timestamped>(records: &[T], calendar: &Calendar, now: DateTime<Utc>) -> bool {
    let today = calendar.today(now);
    records
        .iter()
        .any(|r| calendar.date_of(r.timestamp_ms()) == Some(today))
}

pub fn daily_goals(
    snapshot: &DashboardSnapshot,
    calendar: &Calendar,
    now: DateTime<Utc>,
) -> DailyGoals {
    DailyGoals {
        journal_entry: any_today(&snapshot.journals, calendar, now),
        mood_check_in: any_today(&snapshot.moods, calendar, now),
        meditation: any_today(&snapshot.meditations, calendar, now),
    }
}

impl DashboardView {
    /// Derives the rendered dashboard from a snapshot.
    pub fn build(
        snapshot: &DashboardSnapshot,
        calendar: &Calendar,
        now: DateTime<Utc>,
        live_steps: Option<u64>,
        step_goal: u64,
    ) -> Self {
        Self {
            stats: snapshot.stats.clone(),
            mood_trend: weekly_mood_trend(&snapshot.moods, calendar, now),
            steps: step_summary(&snapshot.health, now, live_steps, step_goal),
            heart: heart_rate_summary(&snapshot.health),
            mindful_minutes: mindful_minutes(&snapshot.meditations),
            screen_activity: screen_activity(&snapshot.analytics),
            daily_goals: daily_goals(snapshot, calendar, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::calendar::days_ms;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn days_ago(days: i64) -> i64 {
        now().timestamp_millis() - days_ms(days)
    }

    fn mood(ts: i64, value: u8) -> MoodEntry {
        MoodEntry {
            timestamp: ts,
            mood: "Happy".to_string(),
            value,
        }
    }

    fn health(ts: i64, heart_rate: u32, steps: u64) -> HealthMetrics {
        HealthMetrics {
            timestamp: ts,
            heart_rate,
            steps,
        }
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let records = vec![mood(days_ago(0), 4), mood(days_ago(1), 4), mood(days_ago(2), 4)];
        assert_eq!(calculate_streak(&records, &Calendar::utc(), now()), 3);
    }

    #[test]
    fn test_streak_zero_when_today_missing() {
        let records = vec![mood(days_ago(1), 4), mood(days_ago(2), 4)];
        assert_eq!(calculate_streak(&records, &Calendar::utc(), now()), 0);
    }

    #[test]
    fn test_streak_stops_at_gap() {
        let records = vec![mood(days_ago(0), 4), mood(days_ago(1), 4), mood(days_ago(3), 4)];
        assert_eq!(calculate_streak(&records, &Calendar::utc(), now()), 2);
    }

    #[test]
    fn test_streak_capped_at_window() {
        let records: Vec<MoodEntry> = (0..12).map(|d| mood(days_ago(d), 3)).collect();
        assert_eq!(calculate_streak(&records, &Calendar::utc(), now()), 7);
    }

    #[test]
    fn test_average_mood() {
        assert_eq!(average_mood(&[mood(1, 4), mood(2, 2)]), 3.0);
        assert_eq!(average_mood(&[]), 0.0);
    }

    #[test]
    fn test_total_steps() {
        let samples: Vec<HealthMetrics> = [100, 250, 0, 300]
            .into_iter()
            .map(|steps| health(days_ago(1), 70, steps))
            .collect();
        assert_eq!(total_steps(&samples), 650);
    }

    #[test]
    fn test_filter_recent_excludes_boundary() {
        let records = vec![mood(days_ago(7), 2), mood(days_ago(7) + 1, 4)];
        let recent = filter_recent(records, now());
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].value, 4);
    }

    #[test]
    fn test_weekday_bucket_averages() {
        let two_days_ago = days_ago(2);
        let moods = vec![mood(two_days_ago, 4), mood(two_days_ago + 60_000, 2)];
        let trend = weekly_mood_trend(&moods, &Calendar::utc(), now());
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[4].average, 3.0);
        assert_eq!(trend[4].count, 2);
        assert_eq!(trend[4].label, "Sun");
        assert_eq!(trend[6].average, 0.0);
    }

    #[test]
    fn test_trend_ignores_same_weekday_a_week_earlier() {
        // Seven days and one hour later than the cutoff lands on today's weekday.
        let early = now().timestamp_millis() - days_ms(7) + 60 * 60 * 1000;
        let moods = vec![mood(early, 1), mood(days_ago(0), 5)];
        let trend = weekly_mood_trend(&moods, &Calendar::utc(), now());
        assert_eq!(trend[6].average, 5.0);
        assert_eq!(trend[0].average, 0.0);
    }

    #[test]
    fn test_live_steps_supersede_stored() {
        let samples = vec![health(days_ago(0), 70, 1200), health(days_ago(0), 72, 300)];
        assert_eq!(todays_steps(&samples, now(), None), 1500);
        assert_eq!(todays_steps(&samples, now(), Some(40)), 40);
    }

    #[test]
    fn test_step_summary_weekly_buckets() {
        let samples = vec![
            health(days_ago(0), 70, 5000),
            health(days_ago(6), 70, 800),
            health(days_ago(6), 70, 200),
        ];
        let summary = step_summary(&samples, now(), None, 10_000);
        assert_eq!(summary.today, 5000);
        assert_eq!(summary.goal_percent, 50);
        assert_eq!(summary.weekly.len(), 7);
        assert_eq!(summary.weekly[0].steps, 1000);
        assert_eq!(summary.weekly[6].steps, 5000);
    }

    #[test]
    fn test_heart_rate_summary() {
        let samples = vec![health(1, 60, 0), health(2, 71, 0)];
        let summary = heart_rate_summary(&samples);
        assert_eq!(summary.current, 71);
        assert_eq!(summary.average, 66);
        assert_eq!(heart_rate_summary(&[]), HeartRateSummary::default());
    }

    #[test]
    fn test_mindful_minutes_breakdown() {
        let sessions = vec![
            MeditationSession {
                timestamp: 1,
                duration: 600,
                kind: MeditationKind::BodyScan,
            },
            MeditationSession {
                timestamp: 2,
                duration: 330,
                kind: MeditationKind::MindfulBreathing,
            },
            MeditationSession {
                timestamp: 3,
                duration: 90,
                kind: MeditationKind::BodyScan,
            },
        ];
        let minutes = mindful_minutes(&sessions);
        assert_eq!(minutes.total, 17);
        assert_eq!(minutes.breakdown.len(), 2);
        assert_eq!(minutes.breakdown[0].kind, MeditationKind::MindfulBreathing);
        assert_eq!(minutes.breakdown[1].minutes, 11);
    }

    #[test]
    fn test_screen_activity_sorted() {
        let events: Vec<AnalyticsEvent> = ["Journal", "Dashboard", "Dashboard"]
            .into_iter()
            .map(|screen| AnalyticsEvent {
                screen: screen.to_string(),
                action: "view".to_string(),
                timestamp: 1,
            })
            .collect();
        let activity = screen_activity(&events);
        assert_eq!(activity[0].screen, "Dashboard");
        assert_eq!(activity[0].events, 2);
    }

    #[test]
    fn test_build_snapshot_is_deterministic() {
        let raw = RawCollections {
            moods: vec![mood(days_ago(0), 4), mood(days_ago(1), 2), mood(days_ago(9), 1)],
            health: vec![health(days_ago(0), 70, 100)],
            ..Default::default()
        };
        let first = build_snapshot(raw.clone(), &Calendar::utc(), now());
        let second = build_snapshot(raw, &Calendar::utc(), now());
        assert_eq!(first, second);
        assert_eq!(first.moods.len(), 2);
        assert_eq!(first.stats.mood_streak, 2);
        assert_eq!(first.stats.average_mood, 3.0);
        assert_eq!(first.stats.total_steps, 100);
    }
}
