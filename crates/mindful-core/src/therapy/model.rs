//! Therapy session domain model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a therapy session is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum SessionType {
    #[strum(serialize = "Video Call")]
    #[serde(rename = "Video Call")]
    VideoCall,
    #[strum(serialize = "Audio Call")]
    #[serde(rename = "Audio Call")]
    AudioCall,
    #[strum(serialize = "Chat")]
    #[serde(rename = "Chat")]
    Chat,
}

/// Lifecycle state of a therapy session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Only upcoming sessions may change, and only to a terminal state.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        matches!(
            (self, next),
            (SessionStatus::Upcoming, SessionStatus::Completed)
                | (SessionStatus::Upcoming, SessionStatus::Cancelled)
        )
    }
}

/// A booked or past therapy appointment.
///
/// `id` is generated by the caller; uniqueness is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapySession {
    pub id: String,
    pub therapist: String,
    /// Display date, e.g. `Tue, Mar 10`.
    pub date: String,
    /// Display time, e.g. `10:00 AM`.
    pub time: String,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// Scheduled start (ms epoch), used for ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// A booking request from the sessions screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub therapist: String,
    pub specialty: Option<String>,
    pub session_type: SessionType,
    /// Scheduled start (ms epoch).
    pub starts_at: i64,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use SessionStatus::*;
        assert!(Upcoming.can_transition_to(Completed));
        assert!(Upcoming.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Upcoming));
        assert!(!Cancelled.can_transition_to(Completed));
        assert!(!Upcoming.can_transition_to(Upcoming));
    }

    #[test]
    fn test_session_wire_format() {
        let json = r#"{"id":"3","therapist":"Dr. Sarah Johnson","date":"Tue, Mar 3","time":"11:00 AM","type":"Video Call","status":"completed","notes":"Discussed stress management techniques"}"#;
        let session: TherapySession = serde_json::from_str(json).unwrap();
        assert_eq!(session.session_type, SessionType::VideoCall);
        assert_eq!(session.status, SessionStatus::Completed);
        assert_eq!(session.timestamp, None);
        assert_eq!("cancelled".parse::<SessionStatus>().unwrap(), SessionStatus::Cancelled);
    }
}
