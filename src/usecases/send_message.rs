//! Use case for sending a message into a conversation.
//!
//! The message is created with status `Sent` and appended to the store in a
//! single step. Follow-up work (status advances, replies) is scheduled by the
//! caller.

use chrono::{DateTime, Utc};

use crate::domain::{
    actor::Actor,
    conversation::{ConversationId, Direction},
    conversation_store::ConversationStore,
    error::ChatError,
    message::{Message, MessageId, SenderId},
};

/// Command to send a message to a specific conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageCommand {
    pub conversation_id: ConversationId,
    pub text: String,
}

/// Domain-level errors for the send message operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// Message text is empty after trimming whitespace.
    EmptyMessage,
    /// Target conversation was not found.
    ConversationNotFound,
}

/// The message that was appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub conversation_id: ConversationId,
    pub message_id: MessageId,
    pub sent_at: DateTime<Utc>,
}

/// Sends a message on behalf of `actor`.
///
/// # Errors
/// Returns `SendMessageError::EmptyMessage` if text is empty/whitespace and
/// `SendMessageError::ConversationNotFound` for an unknown conversation. The
/// store is left untouched in both cases.
pub fn send_message(
    store: &mut ConversationStore,
    actor: &Actor,
    command: SendMessageCommand,
    now: DateTime<Utc>,
) -> Result<SentMessage, SendMessageError> {
    let text = command.text.trim();
    if text.is_empty() {
        return Err(SendMessageError::EmptyMessage);
    }

    let receipt = store
        .append_new(
            &command.conversation_id,
            |message_id| {
                Message::create(
                    message_id,
                    SenderId::Local,
                    actor.display_name.clone(),
                    text,
                    now,
                )
            },
            Direction::Outgoing,
            now,
        )
        .map_err(map_source_error)?;

    tracing::debug!(
        conversation_id = %command.conversation_id,
        message_id = %receipt.message_id,
        "message sent"
    );

    Ok(SentMessage {
        conversation_id: command.conversation_id,
        message_id: receipt.message_id,
        sent_at: now,
    })
}

fn map_source_error(error: ChatError) -> SendMessageError {
    match error {
        ChatError::EmptyContent => SendMessageError::EmptyMessage,
        ChatError::ConversationNotFound(_) | ChatError::MessageNotFound { .. } => {
            SendMessageError::ConversationNotFound
        }
    }
}
