//! Use case for listing conversations with an optional search term.

use crate::domain::{conversation_store::ConversationStore, summary::ConversationSummary};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListConversationsQuery {
    pub search: String,
}

impl ListConversationsQuery {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
        }
    }
}

/// Rows plus the inbox-wide counters shown in the list header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationListing {
    pub rows: Vec<ConversationSummary>,
    /// All conversations, regardless of the search term.
    pub total_conversations: usize,
    pub total_unread: u32,
}

pub fn list_conversations(
    store: &ConversationStore,
    query: &ListConversationsQuery,
) -> ConversationListing {
    let rows = store
        .list(&query.search)
        .into_iter()
        .map(|conversation| {
            ConversationSummary::from_conversation(
                conversation,
                store.is_composing(conversation.id()),
            )
        })
        .collect();

    ConversationListing {
        rows,
        total_conversations: store.len(),
        total_unread: store.total_unread(),
    }
}
