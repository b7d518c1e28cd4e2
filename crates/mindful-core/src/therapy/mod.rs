//! Therapy session booking and lifecycle.

pub mod model;

pub use model::{BookingRequest, SessionStatus, SessionType, TherapySession};

use std::cmp::Ordering;

/// Orders sessions by scheduled start; sessions without one go last.
///
/// The sort is stable, so undated sessions keep their relative order.
pub fn sort_by_schedule(sessions: &mut [TherapySession]) {
    sessions.sort_by(|a, b| match (a.timestamp, b.timestamp) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
