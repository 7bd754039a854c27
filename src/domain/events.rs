use super::{
    conversation::{ConversationId, Direction},
    message::{MessageId, MessageStatus},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
}

/// A key press. Printable keys carry the character, others a lowercase name
/// such as `"enter"`, `"esc"` or `"backspace"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }

    /// The typed character, for single-character keys without Ctrl.
    pub fn as_char(&self) -> Option<char> {
        if self.ctrl {
            return None;
        }

        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }
}

/// Change notification published after every store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatChange {
    MessageAppended {
        conversation_id: ConversationId,
        message_id: MessageId,
        direction: Direction,
        unread_bumped: bool,
    },
    StatusAdvanced {
        conversation_id: ConversationId,
        message_id: MessageId,
        status: MessageStatus,
    },
    ComposingChanged {
        conversation_id: ConversationId,
        composing: bool,
    },
    ConversationOpened(ConversationId),
    ConversationClosed(ConversationId),
}
