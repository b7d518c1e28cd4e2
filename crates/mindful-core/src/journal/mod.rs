//! Journaling.

pub mod model;

pub use model::{JournalDraft, JournalEntry, JournalMood};
