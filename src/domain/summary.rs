use chrono::{DateTime, Utc};

use super::{
    actor::Role,
    conversation::{Conversation, ConversationId},
    message::MessageStatus,
};

/// One row of the conversation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub conversation_id: ConversationId,
    pub participant_name: String,
    pub participant_role: Role,
    pub avatar_label: String,
    pub is_online: bool,
    pub product_label: String,
    pub last_message_preview: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub unread_count: u32,
    /// Delivery status of the newest message when the local actor wrote it.
    pub outgoing_status: Option<MessageStatus>,
    pub counterpart_typing: bool,
}

impl ConversationSummary {
    pub fn from_conversation(conversation: &Conversation, counterpart_typing: bool) -> Self {
        let outgoing_status = conversation
            .last_message()
            .filter(|message| message.is_own())
            .map(|message| message.status());

        Self {
            conversation_id: conversation.id().clone(),
            participant_name: conversation.participant_name().to_owned(),
            participant_role: conversation.participant_role(),
            avatar_label: conversation.avatar_label().to_owned(),
            is_online: conversation.is_online(),
            product_label: conversation.product_label().to_owned(),
            last_message_preview: conversation.last_message_preview().map(str::to_owned),
            last_message_at: conversation.last_message_at(),
            unread_count: conversation.unread_count(),
            outgoing_status,
            counterpart_typing,
        }
    }

    /// Age of the last message as `"{m}m ago"`, `"{h}h ago"` or `"{d}d ago"`.
    pub fn relative_age(&self, now: DateTime<Utc>) -> Option<String> {
        let elapsed = now.signed_duration_since(self.last_message_at?);
        let minutes = elapsed.num_minutes().max(0);
        let hours = minutes / 60;

        Some(if hours < 1 {
            format!("{minutes}m ago")
        } else if hours < 24 {
            format!("{hours}h ago")
        } else {
            format!("{}d ago", hours / 24)
        })
    }
}
