//! One chat session: the store, navigation, pending timers and the simulator.
//!
//! The session is the only owner of the store. The host reads through it and
//! mutates only through `open`, `close`, `send` and `tick`; each of those
//! publishes the resulting changes on the feed.

use std::sync::mpsc;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::domain::{
    actor::Actor,
    conversation::{Conversation, ConversationId, Direction},
    conversation_store::ConversationStore,
    detail_view::DetailView,
    error::ChatError,
    events::ChatChange,
    navigation::{NavigationController, Screen},
};

use super::{
    change_feed::ChangeFeed,
    list_conversations::{list_conversations, ConversationListing, ListConversationsQuery},
    random::RandomSource,
    response_simulator::{ResponseSimulator, SimTask, SimulatorTimings, TaskOutcome},
    send_message::{send_message, SendMessageCommand, SendMessageError, SentMessage},
    timers::{Clock, TimerQueue},
};

#[derive(Debug)]
pub struct ChatSession<C, R> {
    actor: Actor,
    store: ConversationStore,
    navigation: NavigationController,
    timers: TimerQueue<SimTask>,
    simulator: ResponseSimulator<R>,
    clock: C,
    feed: ChangeFeed,
}

impl<C: Clock, R: RandomSource> ChatSession<C, R> {
    pub fn new(
        actor: Actor,
        conversations: Vec<Conversation>,
        timings: SimulatorTimings,
        clock: C,
        random: R,
    ) -> Self {
        let simulator = ResponseSimulator::new(actor.role, timings, random);
        Self {
            actor,
            store: ConversationStore::new(conversations),
            navigation: NavigationController::default(),
            timers: TimerQueue::default(),
            simulator,
            clock,
            feed: ChangeFeed::new(),
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn screen(&self) -> &Screen {
        self.navigation.screen()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<ChatChange> {
        self.feed.subscribe()
    }

    pub fn list(&self, query: &ListConversationsQuery) -> ConversationListing {
        list_conversations(&self.store, query)
    }

    /// Opens a conversation, replacing any conversation that was open.
    pub fn open(&mut self, id: &ConversationId) -> Result<(), ChatError> {
        let previous = self.navigation.open_conversation().cloned();
        self.navigation.select(&mut self.store, id)?;

        if let Some(previous) = previous.filter(|previous| previous != id) {
            self.release_view(&previous);
        }

        tracing::debug!(conversation_id = %id, "conversation opened");
        self.feed.publish(ChatChange::ConversationOpened(id.clone()));
        Ok(())
    }

    /// Returns to the list. Pending replies for the closed conversation still land.
    pub fn close(&mut self) -> Option<ConversationId> {
        let closed = self.navigation.close(&mut self.store)?;
        self.release_view(&closed);
        Some(closed)
    }

    pub fn send(
        &mut self,
        conversation_id: &ConversationId,
        text: &str,
    ) -> Result<SentMessage, SendMessageError> {
        // Work already due lands first so the history stays chronological.
        self.tick();

        let now = self.clock.now();
        let sent = send_message(
            &mut self.store,
            &self.actor,
            SendMessageCommand {
                conversation_id: conversation_id.clone(),
                text: text.to_owned(),
            },
            now,
        )?;

        self.simulator.schedule_for_send(
            &mut self.timers,
            &sent.conversation_id,
            sent.message_id,
            sent.sent_at,
        );
        self.feed.publish(ChatChange::MessageAppended {
            conversation_id: sent.conversation_id.clone(),
            message_id: sent.message_id,
            direction: Direction::Outgoing,
            unread_bumped: false,
        });

        Ok(sent)
    }

    /// Fires every task due at the current clock reading. Returns how many fired.
    ///
    /// Each task is applied at its own due instant so replies carry the
    /// timestamp they were scheduled for, however late the tick.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;

        while let Some(due) = self.timers.next_due().filter(|due| *due <= now) {
            let Some((_, task)) = self.timers.pop_due(now) else {
                break;
            };
            fired += 1;

            match self.simulator.apply(&mut self.store, task, due) {
                TaskOutcome::Applied(changes) => self.feed.publish_all(changes),
                TaskOutcome::Unchanged | TaskOutcome::LateCallback => {}
            }
        }

        fired
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    /// Detail snapshot of the open conversation in the local timezone.
    pub fn detail_view(&self) -> Option<DetailView> {
        self.detail_view_in(&Local)
    }

    pub fn detail_view_in<Tz>(&self, timezone: &Tz) -> Option<DetailView>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let id = self.navigation.open_conversation()?;
        let conversation = self.store.get(id).ok()?;
        let now = self.clock.now().with_timezone(timezone);
        Some(DetailView::build(
            conversation,
            self.store.is_composing(id),
            &now,
        ))
    }

    /// Drops a conversation from the inbox. Its pending tasks become late callbacks.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn remove_conversation(&mut self, id: &ConversationId) -> Result<Conversation, ChatError> {
        if self.navigation.open_conversation() == Some(id) {
            self.navigation.close(&mut self.store);
        }
        self.store.remove(id)
    }

    fn release_view(&mut self, id: &ConversationId) {
        let cancelled = self
            .simulator
            .release_view(&mut self.timers, &mut self.store, id);
        tracing::debug!(conversation_id = %id, cancelled, "conversation view released");
        self.feed.publish(ChatChange::ConversationClosed(id.clone()));
    }
}
