use std::fmt;

use chrono::{DateTime, Utc};

use super::error::ChatError;

/// Message identifier, derived from the creation instant in Unix milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub i64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Author of a message. `Local` is reserved for the current actor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SenderId {
    Local,
    Remote(String),
}

impl SenderId {
    pub fn remote(id: impl Into<String>) -> Self {
        Self::Remote(id.into())
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }
}

/// Delivery lifecycle stage. Ordering follows the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MessageStatus {
    Sent,
    Delivered,
    Read,
}

impl MessageStatus {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Sent => "Sent",
            Self::Delivered => "Delivered",
            Self::Read => "Read",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    sender_id: SenderId,
    sender_name: String,
    content: String,
    timestamp: DateTime<Utc>,
    status: MessageStatus,
}

impl Message {
    /// Creates a freshly sent message.
    ///
    /// Content is trimmed; content that trims to nothing is rejected.
    pub fn create(
        id: MessageId,
        sender_id: SenderId,
        sender_name: impl Into<String>,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, ChatError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ChatError::EmptyContent);
        }

        Ok(Self {
            id,
            sender_id,
            sender_name: sender_name.into(),
            content: content.to_owned(),
            timestamp: now,
            status: MessageStatus::Sent,
        })
    }

    /// Rebuilds a message from history with an already known status.
    pub fn restored(
        id: MessageId,
        sender_id: SenderId,
        sender_name: impl Into<String>,
        content: &str,
        timestamp: DateTime<Utc>,
        status: MessageStatus,
    ) -> Result<Self, ChatError> {
        let mut message = Self::create(id, sender_id, sender_name, content, timestamp)?;
        message.status = status;
        Ok(message)
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }

    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    pub fn is_own(&self) -> bool {
        self.sender_id.is_local()
    }

    /// Moves the status forward to `target`.
    ///
    /// Returns `false` without touching the message when `target` is not
    /// strictly later than the current status.
    pub fn advance_status(&mut self, target: MessageStatus) -> bool {
        if target <= self.status {
            return false;
        }

        self.status = target;
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn sent(content: &str) -> Message {
        Message::create(MessageId(1), SenderId::Local, "You", content, at(1_000))
            .expect("message should be created")
    }

    #[test]
    fn create_starts_in_sent_status() {
        let message = sent("Hello");

        assert_eq!(message.status(), MessageStatus::Sent);
        assert_eq!(message.content(), "Hello");
        assert_eq!(message.timestamp(), at(1_000));
        assert!(message.is_own());
    }

    #[test]
    fn create_trims_content() {
        let message = sent("  still fresh?  \n");

        assert_eq!(message.content(), "still fresh?");
    }

    #[test]
    fn create_rejects_empty_content() {
        let result = Message::create(MessageId(1), SenderId::Local, "You", "", at(0));

        assert_eq!(result, Err(ChatError::EmptyContent));
    }

    #[test]
    fn create_rejects_whitespace_only_content() {
        let result = Message::create(MessageId(1), SenderId::Local, "You", " \t\n ", at(0));

        assert_eq!(result, Err(ChatError::EmptyContent));
    }

    #[test]
    fn advance_follows_lifecycle_order() {
        let mut message = sent("Hello");

        assert!(message.advance_status(MessageStatus::Delivered));
        assert_eq!(message.status(), MessageStatus::Delivered);
        assert!(message.advance_status(MessageStatus::Read));
        assert_eq!(message.status(), MessageStatus::Read);
    }

    #[test]
    fn advance_may_skip_delivered() {
        let mut message = sent("Hello");

        assert!(message.advance_status(MessageStatus::Read));
        assert_eq!(message.status(), MessageStatus::Read);
    }

    #[test]
    fn advance_never_regresses() {
        let mut message = sent("Hello");
        message.advance_status(MessageStatus::Read);

        assert!(!message.advance_status(MessageStatus::Delivered));
        assert!(!message.advance_status(MessageStatus::Sent));
        assert_eq!(message.status(), MessageStatus::Read);
    }

    #[test]
    fn advance_to_same_status_is_noop() {
        let mut message = sent("Hello");
        message.advance_status(MessageStatus::Delivered);
        let before = message.clone();

        assert!(!message.advance_status(MessageStatus::Delivered));
        assert_eq!(message, before);
    }

    #[test]
    fn remote_sender_is_not_own() {
        let message = Message::create(
            MessageId(2),
            SenderId::remote("seller1"),
            "Ravi Kumar",
            "Hello!",
            at(0),
        )
        .expect("message should be created");

        assert!(!message.is_own());
        assert_eq!(message.sender_name(), "Ravi Kumar");
    }
}
