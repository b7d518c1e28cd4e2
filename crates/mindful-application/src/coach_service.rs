//! Wellness coach conversations.
//!
//! The coach never fails from the caller's point of view: any client error is
//! logged and replaced by a static reply.

use crate::dashboard_service::DashboardService;
use mindful_core::coach::{ChatMessage, CoachClient, FALLBACK_REPLY, system_prompt};
use std::sync::Arc;

/// Shown when a mood suggestion cannot be fetched.
pub const SUGGESTION_FALLBACK: &str = "Unable to load suggestion.";

pub struct CoachService {
    client: Arc<dyn CoachClient>,
    dashboard: Arc<DashboardService>,
    fallback: String,
}

impl CoachService {
    pub fn new(client: Arc<dyn CoachClient>, dashboard: Arc<DashboardService>) -> Self {
        Self {
            client,
            dashboard,
            fallback: FALLBACK_REPLY.to_string(),
        }
    }

    /// Overrides the reply used when the client fails.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Answers `message`, using the tail of `history` as context.
    pub async fn reply(&self, history: &[ChatMessage], message: &str) -> String {
        let messages = vec![
            ChatMessage::system(system_prompt(history)),
            ChatMessage::user(message),
        ];
        self.dashboard.record_event("AIChat", Some("sendMessage")).await;

        match self.client.complete(&messages).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "coach unavailable, using fallback reply");
                self.fallback.clone()
            }
        }
    }

    /// One supportive action for someone who just logged `mood`.
    pub async fn mood_suggestion(&self, mood: &str) -> String {
        let messages = [ChatMessage::user(format!(
            "Supportive action for feeling {}.",
            mood
        ))];
        match self.client.complete(&messages).await {
            Ok(suggestion) => suggestion,
            Err(e) => {
                tracing::warn!(error = %e, mood, "mood suggestion unavailable");
                SUGGESTION_FALLBACK.to_string()
            }
        }
    }
}

/// Running chat transcript, as kept by the chat screen.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Sends `text`, appends both turns, and returns the coach's reply.
    pub async fn send(&mut self, coach: &CoachService, text: &str) -> String {
        let reply = coach.reply(&self.messages, text).await;
        self.messages.push(ChatMessage::user(text));
        self.messages.push(ChatMessage::assistant(reply.clone()));
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::dashboard_service::DashboardSettings;
    use mindful_core::clock::SystemClock;
    use mindful_core::coach::ChatRole;
    use mindful_core::error::{MindfulError, Result};
    use mindful_infrastructure::InMemoryStore;
    use tokio::sync::Mutex;

    /// Records the messages it receives and answers from a script.
    struct ScriptedClient {
        reply: Option<String>,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    #[async_trait]
    impl CoachClient for ScriptedClient {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
            self.seen.lock().await.push(messages.to_vec());
            self.reply
                .clone()
                .ok_or_else(|| MindfulError::coach("offline"))
        }
    }

    fn coach(reply: Option<&str>) -> (CoachService, Arc<ScriptedClient>) {
        let client = Arc::new(ScriptedClient {
            reply: reply.map(str::to_string),
            seen: Mutex::new(Vec::new()),
        });
        let dashboard = Arc::new(DashboardService::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(SystemClock),
            DashboardSettings::default(),
        ));
        (CoachService::new(client.clone(), dashboard), client)
    }

    #[tokio::test]
    async fn test_reply_uses_system_context() {
        let (service, client) = coach(Some("Try a short walk."));
        let mut conversation = Conversation::new();

        assert_eq!(conversation.send(&service, "I feel stuck").await, "Try a short walk.");
        conversation.send(&service, "Thanks").await;

        let seen = client.seen.lock().await;
        let second = &seen[1];
        assert_eq!(second[0].role, ChatRole::System);
        assert!(second[0].content.contains("user: I feel stuck"));
        assert_eq!(second[1], ChatMessage::user("Thanks"));
        assert_eq!(conversation.messages().len(), 4);
    }

    #[tokio::test]
    async fn test_failure_returns_fallback() {
        let (service, _) = coach(None);
        assert_eq!(service.reply(&[], "hello").await, FALLBACK_REPLY);
        assert_eq!(service.mood_suggestion("Sad").await, SUGGESTION_FALLBACK);

        let custom = service.with_fallback("Back soon.");
        assert_eq!(custom.reply(&[], "hello").await, "Back soon.");
    }

    #[tokio::test]
    async fn test_reply_records_chat_event() {
        let (service, _) = coach(Some("ok"));
        service.reply(&[], "hi").await;
        let raw = service.dashboard.load_raw_collections().await;
        assert_eq!(raw.analytics.len(), 1);
        assert_eq!(raw.analytics[0].screen, "AIChat");
        assert_eq!(raw.analytics[0].action, "sendMessage");
    }
}
