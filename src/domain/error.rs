use thiserror::Error;

use super::{conversation::ConversationId, message::MessageId};

/// Errors raised by chat domain operations.
///
/// None of these are fatal: callers treat lookups that miss as recoverable
/// and leave the UI untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("message content is empty after trimming whitespace")]
    EmptyContent,
    #[error("conversation {0} not found")]
    ConversationNotFound(ConversationId),
    #[error("message {message_id} not found in conversation {conversation_id}")]
    MessageNotFound {
        conversation_id: ConversationId,
        message_id: MessageId,
    },
}

impl ChatError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ConversationNotFound(_) | Self::MessageNotFound { .. }
        )
    }
}
