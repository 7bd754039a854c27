use std::collections::HashMap;

use super::{
    conversation::{Conversation, ConversationId, Direction},
    error::ChatError,
    message::{Message, MessageId, MessageStatus},
};

/// In-memory owner of every conversation for the lifetime of a session.
///
/// All mutation goes through the operations below; each one is a single
/// `&mut self` step, so readers never observe a half-applied update.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    open: Option<ConversationId>,
    composing: HashMap<ConversationId, usize>,
}

/// Result of a successful append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendReceipt {
    pub message_id: MessageId,
    pub unread_bumped: bool,
}

impl ConversationStore {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations,
            open: None,
            composing: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Case-insensitive substring match on participant name or product label.
    ///
    /// An empty term returns everything. Insertion order is kept.
    pub fn list(&self, term: &str) -> Vec<&Conversation> {
        let needle = term.to_lowercase();
        self.conversations
            .iter()
            .filter(|conversation| {
                needle.is_empty()
                    || conversation.participant_name().to_lowercase().contains(&needle)
                    || conversation.product_label().to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn get(&self, id: &ConversationId) -> Result<&Conversation, ChatError> {
        self.conversations
            .iter()
            .find(|conversation| conversation.id() == id)
            .ok_or_else(|| ChatError::ConversationNotFound(id.clone()))
    }

    fn get_mut(&mut self, id: &ConversationId) -> Result<&mut Conversation, ChatError> {
        self.conversations
            .iter_mut()
            .find(|conversation| conversation.id() == id)
            .ok_or_else(|| ChatError::ConversationNotFound(id.clone()))
    }

    /// Marks the conversation read and makes it the open one.
    pub fn select(&mut self, id: &ConversationId) -> Result<(), ChatError> {
        self.get_mut(id)?.mark_read();
        self.open = Some(id.clone());
        Ok(())
    }

    /// Clears the open designation. Returns the conversation that was open.
    pub fn deselect(&mut self) -> Option<ConversationId> {
        self.open.take()
    }

    pub fn open_conversation(&self) -> Option<&ConversationId> {
        self.open.as_ref()
    }

    pub fn is_open(&self, id: &ConversationId) -> bool {
        self.open.as_ref() == Some(id)
    }

    pub fn total_unread(&self) -> u32 {
        self.conversations
            .iter()
            .map(Conversation::unread_count)
            .fold(0, u32::saturating_add)
    }

    /// Creates a message with a fresh id and appends it, all in one step.
    pub fn append_new(
        &mut self,
        id: &ConversationId,
        build: impl FnOnce(MessageId) -> Result<Message, ChatError>,
        direction: Direction,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<AppendReceipt, ChatError> {
        let is_open = self.is_open(id);
        let conversation = self.get_mut(id)?;
        let message = build(conversation.next_message_id(now))?;
        let message_id = message.id();
        let unread_bumped = conversation.append_message(message, direction, is_open);

        Ok(AppendReceipt {
            message_id,
            unread_bumped,
        })
    }

    /// Advances one message's status. `Ok(false)` means the call was a no-op.
    pub fn advance_message_status(
        &mut self,
        id: &ConversationId,
        message_id: MessageId,
        target: MessageStatus,
    ) -> Result<bool, ChatError> {
        self.get_mut(id)?
            .advance_message_status(message_id, target)
            .ok_or_else(|| ChatError::MessageNotFound {
                conversation_id: id.clone(),
                message_id,
            })
    }

    /// Drops a conversation. Pending work that still references it becomes a late callback.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn remove(&mut self, id: &ConversationId) -> Result<Conversation, ChatError> {
        let index = self
            .conversations
            .iter()
            .position(|conversation| conversation.id() == id)
            .ok_or_else(|| ChatError::ConversationNotFound(id.clone()))?;

        if self.is_open(id) {
            self.open = None;
        }
        self.composing.remove(id);
        Ok(self.conversations.remove(index))
    }

    pub fn begin_composing(&mut self, id: &ConversationId) -> Result<(), ChatError> {
        self.get(id)?;
        *self.composing.entry(id.clone()).or_insert(0) += 1;
        Ok(())
    }

    pub fn end_composing(&mut self, id: &ConversationId) {
        if let Some(count) = self.composing.get_mut(id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.composing.remove(id);
            }
        }
    }

    pub fn clear_composing(&mut self, id: &ConversationId) {
        self.composing.remove(id);
    }

    /// Whether the counterpart is shown as typing in this conversation.
    pub fn is_composing(&self, id: &ConversationId) -> bool {
        self.composing.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::message::SenderId,
        test_support::{at_ms, conversation, conversation_with_unread},
    };

    fn store() -> ConversationStore {
        ConversationStore::new(vec![
            conversation_with_unread("a", "Ravi Kumar", "Fresh Green Mussels", 2),
            conversation_with_unread("b", "Priya Menon", "Organic Farm Mussels", 0),
            conversation_with_unread("c", "Suresh Nair", "Premium Black Mussels", 1),
        ])
    }

    fn ids(conversations: &[&Conversation]) -> Vec<String> {
        conversations.iter().map(|c| c.id().to_string()).collect()
    }

    fn incoming(store: &mut ConversationStore, id: &str, text: &str, ms: i64) -> AppendReceipt {
        store
            .append_new(
                &ConversationId::new(id),
                |message_id| {
                    Message::create(message_id, SenderId::remote("peer"), "Peer", text, at_ms(ms))
                },
                Direction::Incoming,
                at_ms(ms),
            )
            .expect("append should succeed")
    }

    #[test]
    fn list_with_empty_term_returns_all_in_insertion_order() {
        let store = store();

        assert_eq!(ids(&store.list("")), vec!["a", "b", "c"]);
    }

    #[test]
    fn list_matches_participant_name_case_insensitively() {
        let store = store();

        assert_eq!(ids(&store.list("PRIYA")), vec!["b"]);
    }

    #[test]
    fn list_matches_product_label() {
        let store = store();

        assert_eq!(ids(&store.list("black")), vec!["c"]);
        assert_eq!(ids(&store.list("mussels")), vec!["a", "b", "c"]);
    }

    #[test]
    fn list_without_match_is_empty() {
        let store = store();

        assert!(store.list("xyz-no-match").is_empty());
    }

    #[test]
    fn list_does_not_reorder_by_recency() {
        let mut store = store();
        incoming(&mut store, "c", "newest", 10_000);

        assert_eq!(ids(&store.list("")), vec!["a", "b", "c"]);
    }

    #[test]
    fn get_unknown_conversation_is_not_found() {
        let store = store();

        let error = store.get(&ConversationId::new("zzz")).expect_err("must miss");

        assert!(error.is_not_found());
    }

    #[test]
    fn total_unread_sums_all_conversations() {
        let store = ConversationStore::new(vec![
            conversation_with_unread("a", "A", "x", 2),
            conversation_with_unread("b", "B", "y", 0),
        ]);

        assert_eq!(store.total_unread(), 2);
    }

    #[test]
    fn select_zeroes_unread_and_total() {
        let mut store = ConversationStore::new(vec![
            conversation_with_unread("a", "A", "x", 2),
            conversation_with_unread("b", "B", "y", 0),
        ]);

        store.select(&ConversationId::new("a")).expect("select should succeed");

        assert_eq!(store.total_unread(), 0);
        assert_eq!(store.open_conversation(), Some(&ConversationId::new("a")));
    }

    #[test]
    fn select_unknown_keeps_previous_open_conversation() {
        let mut store = store();
        store.select(&ConversationId::new("a")).expect("select should succeed");

        let result = store.select(&ConversationId::new("missing"));

        assert!(result.is_err());
        assert_eq!(store.open_conversation(), Some(&ConversationId::new("a")));
    }

    #[test]
    fn incoming_while_selected_keeps_unread_at_zero() {
        let mut store = store();
        store.select(&ConversationId::new("a")).expect("select should succeed");

        let receipt = incoming(&mut store, "a", "still here", 10_000);
        incoming(&mut store, "a", "and again", 11_000);

        assert!(!receipt.unread_bumped);
        let conversation = store.get(&ConversationId::new("a")).expect("exists");
        assert_eq!(conversation.unread_count(), 0);
    }

    #[test]
    fn incoming_after_deselect_bumps_unread_by_one() {
        let mut store = store();
        store.select(&ConversationId::new("a")).expect("select should succeed");
        store.deselect();

        let receipt = incoming(&mut store, "a", "are you there?", 10_000);

        assert!(receipt.unread_bumped);
        let conversation = store.get(&ConversationId::new("a")).expect("exists");
        assert_eq!(conversation.unread_count(), 1);
        assert_eq!(conversation.last_message_preview(), Some("are you there?"));
    }

    #[test]
    fn incoming_to_other_conversation_bumps_its_unread() {
        let mut store = store();
        store.select(&ConversationId::new("a")).expect("select should succeed");

        incoming(&mut store, "b", "ping", 10_000);

        let other = store.get(&ConversationId::new("b")).expect("exists");
        assert_eq!(other.unread_count(), 1);
    }

    #[test]
    fn append_new_rejects_invalid_message_without_side_effects() {
        let mut store = ConversationStore::new(vec![conversation("a", "A", "x")]);

        let result = store.append_new(
            &ConversationId::new("a"),
            |id| Message::create(id, SenderId::Local, "You", "   ", at_ms(0)),
            Direction::Outgoing,
            at_ms(0),
        );

        assert_eq!(result, Err(ChatError::EmptyContent));
        assert!(store.get(&ConversationId::new("a")).expect("exists").messages().is_empty());
    }

    #[test]
    fn advance_status_reports_missing_message() {
        let mut store = store();

        let error = store
            .advance_message_status(&ConversationId::new("a"), MessageId(1), MessageStatus::Read)
            .expect_err("message is missing");

        assert!(matches!(error, ChatError::MessageNotFound { .. }));
    }

    #[test]
    fn remove_clears_open_and_composing_state() {
        let mut store = store();
        let id = ConversationId::new("a");
        store.select(&id).expect("select should succeed");
        store.begin_composing(&id).expect("composing should start");

        store.remove(&id).expect("remove should succeed");

        assert_eq!(store.open_conversation(), None);
        assert!(!store.is_composing(&id));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn composing_counter_survives_overlapping_sends() {
        let mut store = store();
        let id = ConversationId::new("a");

        store.begin_composing(&id).expect("composing should start");
        store.begin_composing(&id).expect("composing should start");
        store.end_composing(&id);

        assert!(store.is_composing(&id));

        store.end_composing(&id);
        assert!(!store.is_composing(&id));
    }

    #[test]
    fn begin_composing_on_unknown_conversation_fails() {
        let mut store = store();

        assert!(store.begin_composing(&ConversationId::new("nope")).is_err());
    }
}
