//! Journal entries and their dashboard metrics.

use super::{DashboardService, next_time_id};
use mindful_core::error::{MindfulError, Result};
use mindful_core::journal::{JournalDraft, JournalEntry};
use mindful_core::store::keys;

impl DashboardService {
    /// Saved entries, newest first; empty when the store cannot be read.
    pub async fn list_journal_entries(&self) -> Vec<JournalEntry> {
        self.load_or_empty(keys::JOURNAL_ENTRIES).await
    }

    /// Creates or overwrites an entry, then records its metrics.
    ///
    /// A draft with an `id` replaces the entry with that id (or is inserted
    /// under it when none exists). The entry is restamped with the current
    /// time either way.
    pub async fn save_journal_entry(&self, draft: JournalDraft) -> Result<JournalEntry> {
        if draft.title.trim().is_empty() {
            return Err(MindfulError::validation("Please enter a title"));
        }
        if draft.content.trim().is_empty() {
            return Err(MindfulError::validation("Please write something in your journal"));
        }

        let now = self.now();
        let local = self.settings.calendar.local_datetime(now);

        let (entry, replaced) = {
            let _guard = self.locks.acquire(keys::JOURNAL_ENTRIES).await;
            let mut entries: Vec<JournalEntry> = self.load_for_update(keys::JOURNAL_ENTRIES).await?;

            let id = match draft.id {
                Some(id) => id,
                None => next_time_id(now, entries.iter().map(|e| e.id.as_str())),
            };
            let entry = JournalEntry {
                id,
                title: draft.title.trim().to_string(),
                content: draft.content,
                date: local.format("%Y-%m-%d").to_string(),
                time: local.format("%H:%M").to_string(),
                timestamp: now.timestamp_millis(),
                mood: draft.mood,
                categories: draft.categories,
            };

            let replaced = match entries.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => {
                    *existing = entry.clone();
                    true
                }
                None => {
                    entries.push(entry.clone());
                    false
                }
            };
            entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            self.store_collection(keys::JOURNAL_ENTRIES, &entries).await?;
            (entry, replaced)
        };

        tracing::info!(id = %entry.id, replaced, words = entry.word_count(), "saved journal entry");
        self.append_logged(keys::JOURNAL_METRICS, entry.metrics()).await;
        let action = if replaced { "updateEntry" } else { "saveEntry" };
        self.record_event("JournalScreen", Some(action)).await;
        Ok(entry)
    }

    /// Removes an entry by id. Metrics already recorded for it are kept.
    pub async fn delete_journal_entry(&self, id: &str) -> Result<JournalEntry> {
        let _guard = self.locks.acquire(keys::JOURNAL_ENTRIES).await;
        let mut entries: Vec<JournalEntry> = self.load_for_update(keys::JOURNAL_ENTRIES).await?;

        let index = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| MindfulError::not_found("journal entry", id))?;
        let removed = entries.remove(index);

        self.store_collection(keys::JOURNAL_ENTRIES, &entries).await?;
        tracing::info!(id, "deleted journal entry");
        Ok(removed)
    }
}
