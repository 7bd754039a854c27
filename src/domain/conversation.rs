use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use super::{
    actor::Role,
    day_groups::{group_by_day, DayGroup},
    message::{Message, MessageId, MessageStatus},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a message was written by the local actor or arrived from the counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// Static description of the counterpart and the listing a conversation is anchored to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationProfile {
    pub id: ConversationId,
    pub participant_name: String,
    pub participant_role: Role,
    /// Short label such as initials. Derived from the name when `None`.
    pub avatar_label: Option<String>,
    pub is_online: bool,
    pub product_label: String,
    pub product_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    id: ConversationId,
    participant_name: String,
    participant_role: Role,
    avatar_label: String,
    is_online: bool,
    product_label: String,
    product_ref: String,
    messages: Vec<Message>,
    unread_count: u32,
    last_message_preview: Option<String>,
    last_message_at: Option<DateTime<Utc>>,
}

impl Conversation {
    pub fn new(profile: ConversationProfile) -> Self {
        let avatar_label = profile
            .avatar_label
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| initials(&profile.participant_name));

        Self {
            id: profile.id,
            participant_name: profile.participant_name,
            participant_role: profile.participant_role,
            avatar_label,
            is_online: profile.is_online,
            product_label: profile.product_label,
            product_ref: profile.product_ref,
            messages: Vec::new(),
            unread_count: 0,
            last_message_preview: None,
            last_message_at: None,
        }
    }

    /// Builds a conversation from an existing history with a stored unread count.
    pub fn with_history(
        profile: ConversationProfile,
        messages: Vec<Message>,
        unread_count: u32,
    ) -> Self {
        let mut conversation = Self::new(profile);
        if let Some(last) = messages.last() {
            conversation.last_message_preview = Some(last.content().to_owned());
            conversation.last_message_at = Some(last.timestamp());
        }
        conversation.messages = messages;
        conversation.unread_count = unread_count;
        conversation
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn participant_name(&self) -> &str {
        &self.participant_name
    }

    pub fn participant_role(&self) -> Role {
        self.participant_role
    }

    pub fn avatar_label(&self) -> &str {
        &self.avatar_label
    }

    pub fn is_online(&self) -> bool {
        self.is_online
    }

    pub fn product_label(&self) -> &str {
        &self.product_label
    }

    pub fn product_ref(&self) -> &str {
        &self.product_ref
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn unread_count(&self) -> u32 {
        self.unread_count
    }

    pub fn last_message_preview(&self) -> Option<&str> {
        self.last_message_preview.as_deref()
    }

    pub fn last_message_at(&self) -> Option<DateTime<Utc>> {
        self.last_message_at
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn message(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id() == id)
    }

    /// Allocates an id for a message created at `now`.
    ///
    /// Ids follow the creation instant but stay strictly above every id
    /// already present in this conversation.
    pub fn next_message_id(&self, now: DateTime<Utc>) -> MessageId {
        let candidate = now.timestamp_millis();
        match self.messages.iter().map(|message| message.id().0).max() {
            Some(highest) if candidate <= highest => MessageId(highest + 1),
            _ => MessageId(candidate),
        }
    }

    /// Appends a message and refreshes the summary fields in one step.
    ///
    /// Incoming messages bump the unread counter unless the conversation is
    /// the open one. Returns whether the counter was bumped.
    pub fn append_message(&mut self, message: Message, direction: Direction, is_open: bool) -> bool {
        self.last_message_preview = Some(message.content().to_owned());
        self.last_message_at = Some(message.timestamp());
        self.messages.push(message);

        let counts_as_unread = direction == Direction::Incoming && !is_open;
        if counts_as_unread {
            self.unread_count = self.unread_count.saturating_add(1);
        }
        counts_as_unread
    }

    pub fn mark_read(&mut self) {
        self.unread_count = 0;
    }

    /// Advances the status of one specific message.
    ///
    /// Returns `None` when the message is unknown, otherwise whether the status changed.
    pub fn advance_message_status(&mut self, id: MessageId, target: MessageStatus) -> Option<bool> {
        self.messages
            .iter_mut()
            .find(|message| message.id() == id)
            .map(|message| message.advance_status(target))
    }

    /// Groups messages by calendar day relative to `now` in `now`'s timezone.
    pub fn group_by_day<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<DayGroup<'_>> {
        group_by_day(&self.messages, now)
    }
}

fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    if letters.is_empty() {
        "?".to_owned()
    } else {
        letters
    }
}
