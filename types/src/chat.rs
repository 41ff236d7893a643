use serde::{Deserialize, Serialize};

use crate::{ChatId, ChatMessageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    Me,
    Them,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub text: String,
    pub sender: ChatSender,
    pub timestamp: String,
}

/// A conversation with one counterpart.
///
/// `preview` and `time` summarise the latest activity for list display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: ChatId,
    pub sender: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub unread: bool,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

impl ChatThread {
    #[must_use]
    pub fn new(id: ChatId, sender: impl Into<String>) -> Self {
        Self {
            id,
            sender: sender.into(),
            preview: String::new(),
            time: String::new(),
            unread: false,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn message(&self, id: &str) -> Option<&ChatMessage> {
        self.history.iter().find(|message| message.id.as_str() == id)
    }
}
