//! Calendar-day arithmetic for windows, streaks, and buckets.

use crate::error::{MindfulError, Result};
use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Length of the rolling "recent" window.
pub const RECENT_WINDOW_DAYS: i64 = 7;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Lower bound (exclusive) of the rolling window ending at `now`.
pub fn window_start_ms(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis() - RECENT_WINDOW_DAYS * DAY_MS
}

/// Milliseconds in `days` whole days.
pub fn days_ms(days: i64) -> i64 {
    days * DAY_MS
}

/// UTC calendar date of a millisecond timestamp.
pub fn utc_date(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
}

/// Where calendar days begin and end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarZone {
    /// The system's local time zone.
    #[default]
    Local,
    /// A fixed IANA zone.
    Named(Tz),
}

/// Maps instants onto local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Calendar {
    zone: CalendarZone,
}

impl Calendar {
    pub fn local() -> Self {
        Self {
            zone: CalendarZone::Local,
        }
    }

    pub fn utc() -> Self {
        Self::named(Tz::UTC)
    }

    pub fn named(tz: Tz) -> Self {
        Self {
            zone: CalendarZone::Named(tz),
        }
    }

    /// Resolves an optional IANA zone name; `None` means system local time.
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        match name {
            None => Ok(Self::local()),
            Some(name) => name
                .parse::<Tz>()
                .map(Self::named)
                .map_err(|_| MindfulError::config(format!("unknown timezone '{}'", name))),
        }
    }

    pub fn zone(&self) -> CalendarZone {
        self.zone
    }

    /// Wall-clock date and time of an instant in this zone.
    pub fn local_datetime(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self.zone {
            CalendarZone::Local => instant.with_timezone(&Local).naive_local(),
            CalendarZone::Named(tz) => instant.with_timezone(&tz).naive_local(),
        }
    }

    /// Calendar date of an instant in this zone.
    pub fn date_of_instant(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local_datetime(instant).date()
    }

    /// Calendar date of a millisecond timestamp; `None` when out of range.
    pub fn date_of(&self, timestamp_ms: i64) -> Option<NaiveDate> {
        DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map(|dt| self.date_of_instant(dt))
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.date_of_instant(now)
    }

    /// The `count` distinct calendar days ending today, oldest first.
    pub fn trailing_days(&self, now: DateTime<Utc>, count: u64) -> Vec<NaiveDate> {
        let today = self.today(now);
        (0..count)
            .rev()
            .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
            .collect()
    }

    /// Instant of `hour:minute` on `date` in this zone, if that wall time exists.
    pub fn instant_at(&self, date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
        let naive = date.and_hms_opt(hour, minute, 0)?;
        match self.zone {
            CalendarZone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            CalendarZone::Named(tz) => tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}
