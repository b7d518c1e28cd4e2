//! Application layer for Mindful.
//!
//! This crate provides the services that coordinate the domain model with a
//! key-value store and a coach client: the dashboard engine and the coach.

pub mod coach_service;
pub mod dashboard_service;

pub use coach_service::{CoachService, Conversation};
pub use dashboard_service::{DashboardService, DashboardSettings};
