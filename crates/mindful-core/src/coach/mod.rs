//! Wellness coach conversation contract.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Reply shown when the completion endpoint cannot be reached.
pub const FALLBACK_REPLY: &str =
    "I apologize, but I'm having trouble connecting right now. Please try again in a moment.";

/// Number of prior turns folded into the system prompt.
pub const CONTEXT_TURNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A chat-completion backend.
#[async_trait]
pub trait CoachClient: Send + Sync {
    /// Sends the full message list and returns the completion text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// System prompt carrying the most recent turns of the conversation.
pub fn system_prompt(history: &[ChatMessage]) -> String {
    let start = history.len().saturating_sub(CONTEXT_TURNS);
    let context = history[start..]
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a compassionate AI wellness coach. Provide supportive, empathetic responses \
         focused on mental health and wellbeing. Keep responses concise and practical.\n\
         Previous context:\n{}",
        context
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_keeps_last_three_turns() {
        let history = vec![
            ChatMessage::user("first"),
            ChatMessage::assistant("second"),
            ChatMessage::user("third"),
            ChatMessage::assistant("fourth"),
        ];
        let prompt = system_prompt(&history);
        assert!(!prompt.contains("first"));
        assert!(prompt.contains("assistant: second"));
        assert!(prompt.ends_with("assistant: fourth"));
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&ChatMessage::system("hi")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"hi"}"#);
    }
}
