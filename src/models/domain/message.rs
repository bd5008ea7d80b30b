use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageAuthor {
    User,
    Assistant,
    Model,
}

/// Styling hint for the chat bubble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Hint,
    Correct,
    Incorrect,
    Summary,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Message {
    pub author: MessageAuthor,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
    pub created_at: DateTime<Utc>,
}

/// Append-only chat transcript.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, author: MessageAuthor, text: impl Into<String>, kind: Option<MessageKind>) {
        self.messages.push(Message {
            author,
            text: text.into(),
            kind,
            created_at: Utc::now(),
        });
    }

    pub fn user(&mut self, text: impl Into<String>) {
        self.push(MessageAuthor::User, text, None);
    }

    pub fn assistant(&mut self, text: impl Into<String>) {
        self.push(MessageAuthor::Assistant, text, None);
    }

    pub fn assistant_with_kind(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.push(MessageAuthor::Assistant, text, Some(kind));
    }

    pub fn model(&mut self, text: impl Into<String>) {
        self.push(MessageAuthor::Model, text, None);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
