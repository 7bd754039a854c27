use super::{
    conversation::ConversationId, conversation_store::ConversationStore, error::ChatError,
};

/// Which surface the host is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    ListView,
    DetailView(ConversationId),
}

/// Mediates between the conversation list and the open conversation.
///
/// Every transition goes through the store so read state and the open
/// designation never drift from what is on screen.
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    screen: Screen,
}

impl NavigationController {
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn open_conversation(&self) -> Option<&ConversationId> {
        match &self.screen {
            Screen::ListView => None,
            Screen::DetailView(id) => Some(id),
        }
    }

    /// `listView --select(id)--> detailView(id)`.
    ///
    /// Selecting while a conversation is already open retargets the detail
    /// view. An unknown id leaves the current screen untouched.
    pub fn select(
        &mut self,
        store: &mut ConversationStore,
        id: &ConversationId,
    ) -> Result<(), ChatError> {
        store.select(id)?;
        self.screen = Screen::DetailView(id.clone());
        Ok(())
    }

    /// `detailView --close--> listView`. Returns the conversation that was closed.
    pub fn close(&mut self, store: &mut ConversationStore) -> Option<ConversationId> {
        store.deselect();
        match std::mem::take(&mut self.screen) {
            Screen::ListView => None,
            Screen::DetailView(id) => Some(id),
        }
    }
}
