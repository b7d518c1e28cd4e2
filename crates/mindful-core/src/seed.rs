//! First-run sample data.
//!
//! A fresh install gets a fixed demo dataset so the dashboard is never empty.
//! Every record is placed relative to `now`, so the same `now` always yields
//! the same dataset.

use crate::dashboard::calendar::{Calendar, days_ms};
use crate::error::Result;
use crate::journal::{JournalEntry, JournalMood};
use crate::record::{MeditationKind, MeditationSession, MoodEntry};
use crate::store::{encode_collection, keys};
use crate::therapy::{SessionStatus, SessionType, TherapySession, sort_by_schedule};
use chrono::{DateTime, Days, Utc};

const MINUTE_MS: i64 = 60 * 1000;

/// Keys that receive sample data when they hold nothing.
pub const SEEDED_KEYS: [&str; 4] = [
    keys::MEDITATION_SESSIONS,
    keys::MOOD_ENTRIES,
    keys::JOURNAL_ENTRIES,
    keys::THERAPY_SESSIONS,
];

/// Ten sessions, all inside the trailing week: (days back, minutes earlier, kind, seconds).
const MEDITATION_PLAN: [(i64, i64, MeditationKind, u32); 10] = [
    (0, 0, MeditationKind::MindfulBreathing, 1028),
    (1, 0, MeditationKind::BodyScan, 876),
    (1, 90, MeditationKind::RelaxationJourney, 600),
    (2, 0, MeditationKind::MindfulBreathing, 1028),
    (3, 0, MeditationKind::BodyScan, 876),
    (3, 90, MeditationKind::RelaxationJourney, 600),
    (4, 0, MeditationKind::MindfulBreathing, 1028),
    (5, 0, MeditationKind::BodyScan, 876),
    (5, 90, MeditationKind::MindfulBreathing, 1028),
    (6, 0, MeditationKind::BodyScan, 876),
];

/// Mood history over the past month: (days back, label).
const MOOD_PLAN: [(i64, &str); 13] = [
    (0, "Happy"),
    (1, "Very Happy"),
    (2, "Neutral"),
    (3, "Happy"),
    (4, "Very Happy"),
    (5, "Happy"),
    (6, "Neutral"),
    (7, "Sad"),
    (8, "Happy"),
    (9, "Very Happy"),
    (14, "Happy"),
    (21, "Neutral"),
    (28, "Happy"),
];

pub fn sample_meditations(now: DateTime<Utc>) -> Vec<MeditationSession> {
    let now_ms = now.timestamp_millis();
    MEDITATION_PLAN
        .iter()
        .map(|&(days, minutes, kind, duration)| MeditationSession {
            timestamp: now_ms - days_ms(days) - minutes * MINUTE_MS,
            duration,
            kind,
        })
        .collect()
}

pub fn sample_moods(now: DateTime<Utc>) -> Vec<MoodEntry> {
    let now_ms = now.timestamp_millis();
    MOOD_PLAN
        .iter()
        .map(|&(days, label)| MoodEntry::new(now_ms - days_ms(days), label))
        .collect()
}

pub fn sample_journal_entries(now: DateTime<Utc>, calendar: &Calendar) -> Vec<JournalEntry> {
    let now_ms = now.timestamp_millis();
    let date_of = |ts: i64| {
        calendar
            .date_of(ts)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    let two_days_ago = now_ms - days_ms(2);

    vec![
        JournalEntry {
            id: "1".to_string(),
            title: "Finding Joy in Small Things".to_string(),
            content: "Today was a beautiful day. The sun was shining and I took a moment to appreciate the simple pleasures in life.".to_string(),
            date: date_of(now_ms),
            time: "10:30".to_string(),
            timestamp: now_ms,
            mood: Some(JournalMood {
                emoji: "😊".to_string(),
                label: "Happy".to_string(),
            }),
            categories: vec!["Gratitude".to_string(), "Reflection".to_string()],
        },
        JournalEntry {
            id: "2".to_string(),
            title: "Overcoming Challenges".to_string(),
            content: "Had a difficult situation at work but managed to handle it well. Proud of how I maintained my composure.".to_string(),
            date: date_of(two_days_ago),
            time: "15:45".to_string(),
            timestamp: two_days_ago,
            mood: Some(JournalMood {
                emoji: "😌".to_string(),
                label: "Calm".to_string(),
            }),
            categories: vec!["Challenges".to_string(), "Achievement".to_string()],
        },
    ]
}

/// Two upcoming and three completed appointments.
pub fn sample_therapy_sessions(now: DateTime<Utc>, calendar: &Calendar) -> Vec<TherapySession> {
    // (id, therapist, days from today, hour, minute, type, status, notes)
    let plan: [(&str, &str, i64, u32, u32, SessionType, SessionStatus, &str); 5] = [
        ("1", "Dr. Sarah Johnson", 2, 10, 0, SessionType::VideoCall, SessionStatus::Upcoming, "Follow-up on meditation progress"),
        ("2", "Dr. Michael Chen", 5, 14, 0, SessionType::VideoCall, SessionStatus::Upcoming, "Monthly check-in"),
        ("3", "Dr. Sarah Johnson", -7, 11, 0, SessionType::VideoCall, SessionStatus::Completed, "Discussed stress management techniques"),
        ("4", "Dr. Michael Chen", -14, 15, 0, SessionType::AudioCall, SessionStatus::Completed, "Worked on anxiety coping strategies"),
        ("5", "Dr. Sarah Johnson", -21, 10, 0, SessionType::VideoCall, SessionStatus::Completed, "Initial session - set treatment goals"),
    ];

    let today = calendar.today(now);
    let mut sessions: Vec<TherapySession> = plan
        .into_iter()
        .filter_map(|(id, therapist, offset, hour, minute, session_type, status, notes)| {
            let date = if offset >= 0 {
                today.checked_add_days(Days::new(offset as u64))?
            } else {
                today.checked_sub_days(Days::new(offset.unsigned_abs()))?
            };
            let starts_at = calendar.instant_at(date, hour, minute);
            Some(TherapySession {
                id: id.to_string(),
                therapist: therapist.to_string(),
                date: date.format("%a, %b %-d").to_string(),
                time: format_clock(hour, minute),
                session_type,
                status,
                notes: Some(notes.to_string()),
                specialty: None,
                timestamp: starts_at.map(|t| t.timestamp_millis()),
            })
        })
        .collect();
    sort_by_schedule(&mut sessions);
    sessions
}

/// `14, 0` -> `2:00 PM`.
pub fn format_clock(hour: u32, minute: u32) -> String {
    let period = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, minute, period)
}

/// Encoded sample collection for a seeded key; `None` for other keys.
pub fn sample_for_key(key: &str, now: DateTime<Utc>, calendar: &Calendar) -> Result<Option<String>> {
    let encoded = match key {
        keys::MEDITATION_SESSIONS => encode_collection(&sample_meditations(now))?,
        keys::MOOD_ENTRIES => encode_collection(&sample_moods(now))?,
        keys::JOURNAL_ENTRIES => encode_collection(&sample_journal_entries(now, calendar))?,
        keys::THERAPY_SESSIONS => encode_collection(&sample_therapy_sessions(now, calendar))?,
        _ => return Ok(None),
    };
    Ok(Some(encoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::calendar::window_start_ms;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_meditations_fall_inside_window() {
        let sessions = sample_meditations(now());
        assert_eq!(sessions.len(), 10);
        let start = window_start_ms(now());
        assert!(sessions.iter().all(|s| s.timestamp > start));
    }

    #[test]
    fn test_sample_is_deterministic() {
        let calendar = Calendar::utc();
        for key in SEEDED_KEYS {
            assert_eq!(
                sample_for_key(key, now(), &calendar).unwrap(),
                sample_for_key(key, now(), &calendar).unwrap()
            );
        }
        assert!(sample_for_key(keys::HEALTH_METRICS, now(), &calendar).unwrap().is_none());
    }

    #[test]
    fn test_therapy_sessions_sorted_and_labelled() {
        let sessions = sample_therapy_sessions(now(), &Calendar::utc());
        assert_eq!(sessions.len(), 5);
        assert_eq!(sessions[0].id, "5");
        assert_eq!(sessions[4].id, "2");
        assert_eq!(sessions[4].date, "Sun, Mar 15");
        assert_eq!(sessions[4].time, "2:00 PM");
        assert_eq!(
            sessions.iter().filter(|s| s.status == SessionStatus::Upcoming).count(),
            2
        );
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0, 5), "12:05 AM");
        assert_eq!(format_clock(12, 0), "12:00 PM");
        assert_eq!(format_clock(15, 30), "3:30 PM");
    }
}
