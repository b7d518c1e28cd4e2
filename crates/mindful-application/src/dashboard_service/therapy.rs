//! Therapy session booking and lifecycle.

use super::{DashboardService, next_time_id};
use chrono::{DateTime, Timelike, Utc};
use mindful_core::error::{MindfulError, Result};
use mindful_core::seed::format_clock;
use mindful_core::store::keys;
use mindful_core::therapy::{
    BookingRequest, SessionStatus, TherapySession, sort_by_schedule,
};

const ENTITY: &str = "therapy session";

impl DashboardService {
    /// All stored sessions; empty when the store cannot be read.
    pub async fn get_therapy_sessions(&self) -> Vec<TherapySession> {
        self.load_or_empty(keys::THERAPY_SESSIONS).await
    }

    /// Sessions that have not been cancelled.
    pub async fn active_therapy_sessions(&self) -> Vec<TherapySession> {
        self.get_therapy_sessions()
            .await
            .into_iter()
            .filter(|s| s.status != SessionStatus::Cancelled)
            .collect()
    }

    /// Inserts a session and keeps the collection ordered by start time.
    pub async fn save_therapy_session(&self, session: TherapySession) -> Result<()> {
        let _guard = self.locks.acquire(keys::THERAPY_SESSIONS).await;
        let mut sessions: Vec<TherapySession> = self.load_for_update(keys::THERAPY_SESSIONS).await?;
        sessions.push(session);
        sort_by_schedule(&mut sessions);
        self.store_collection(keys::THERAPY_SESSIONS, &sessions).await
    }

    /// Moves an upcoming session to `completed` or `cancelled`.
    ///
    /// Setting the status a session already has is a no-op.
    pub async fn update_therapy_session_status(
        &self,
        id: &str,
        status: SessionStatus,
    ) -> Result<TherapySession> {
        let _guard = self.locks.acquire(keys::THERAPY_SESSIONS).await;
        let mut sessions: Vec<TherapySession> = self.load_for_update(keys::THERAPY_SESSIONS).await?;

        let session = sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| MindfulError::not_found(ENTITY, id))?;

        if session.status == status {
            return Ok(session.clone());
        }
        if !session.status.can_transition_to(status) {
            return Err(MindfulError::InvalidTransition {
                from: session.status.to_string(),
                to: status.to_string(),
            });
        }

        session.status = status;
        let updated = session.clone();
        self.store_collection(keys::THERAPY_SESSIONS, &sessions).await?;
        tracing::info!(id, status = %status, "updated therapy session status");
        Ok(updated)
    }

    /// Removes a session by id and returns it.
    pub async fn delete_therapy_session(&self, id: &str) -> Result<TherapySession> {
        let _guard = self.locks.acquire(keys::THERAPY_SESSIONS).await;
        let mut sessions: Vec<TherapySession> = self.load_for_update(keys::THERAPY_SESSIONS).await?;

        let index = sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| MindfulError::not_found(ENTITY, id))?;
        let removed = sessions.remove(index);

        self.store_collection(keys::THERAPY_SESSIONS, &sessions).await?;
        tracing::info!(id, "deleted therapy session");
        Ok(removed)
    }

    /// Books a new upcoming session from the booking screen.
    pub async fn book_therapy_session(
        &self,
        request: BookingRequest,
        now: DateTime<Utc>,
    ) -> Result<TherapySession> {
        if request.therapist.trim().is_empty() {
            return Err(MindfulError::validation("Please choose a therapist"));
        }
        if request.starts_at <= now.timestamp_millis() {
            return Err(MindfulError::validation("Sessions must be booked in the future"));
        }
        let starts = DateTime::<Utc>::from_timestamp_millis(request.starts_at)
            .ok_or_else(|| MindfulError::validation("Start time is out of range"))?;

        let local = self.settings.calendar.local_datetime(starts);
        let date = local.format("%a, %b %-d").to_string();
        let time = format_clock(local.hour(), local.minute());

        let session = {
            let _guard = self.locks.acquire(keys::THERAPY_SESSIONS).await;
            let mut sessions: Vec<TherapySession> =
                self.load_for_update(keys::THERAPY_SESSIONS).await?;

            if sessions
                .iter()
                .any(|s| s.status != SessionStatus::Cancelled && occupies_slot(s, request.starts_at, &date, &time))
            {
                return Err(MindfulError::Conflict(format!(
                    "{} at {} is already booked",
                    date, time
                )));
            }

            let session = TherapySession {
                id: next_time_id(now, sessions.iter().map(|s| s.id.as_str())),
                therapist: request.therapist.trim().to_string(),
                date,
                time,
                session_type: request.session_type,
                status: SessionStatus::Upcoming,
                notes: request.notes.filter(|n| !n.trim().is_empty()),
                specialty: request.specialty,
                timestamp: Some(request.starts_at),
            };
            sessions.push(session.clone());
            sort_by_schedule(&mut sessions);
            self.store_collection(keys::THERAPY_SESSIONS, &sessions).await?;
            session
        };

        tracing::info!(id = %session.id, therapist = %session.therapist, date = %session.date, time = %session.time, "booked therapy session");
        self.record_event("SessionsScreen", Some("bookSession")).await;
        Ok(session)
    }
}

/// Whether `session` already holds the requested slot.
///
/// Sessions with a stored start are compared by instant; older records only
/// carry display strings.
fn occupies_slot(session: &TherapySession, starts_at: i64, date: &str, time: &str) -> bool {
    match session.timestamp {
        Some(ts) => ts == starts_at,
        None => session.date == date && session.time == time,
    }
}
