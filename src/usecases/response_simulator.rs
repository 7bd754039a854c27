//! Simulated counterpart replies.
//!
//! Each local send schedules four independent tasks: two status advances for
//! the sent message, a "counterpart is typing" indicator, and the reply
//! itself. The reply always speaks for the other side of the marketplace.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    actor::Role,
    conversation::{ConversationId, Direction},
    conversation_store::ConversationStore,
    error::ChatError,
    events::ChatChange,
    message::{Message, MessageId, MessageStatus, SenderId},
};

use super::{random::RandomSource, timers::TimerQueue};

const BUYER_LINES: [&str; 10] = [
    "Thank you for the quick response!",
    "That sounds perfect. When can I collect?",
    "Great! I'll take that quantity.",
    "Can you deliver to my location?",
    "What's your best price for bulk orders?",
    "Are these fresh from today's harvest?",
    "I need them by tomorrow morning.",
    "Perfect! I'll confirm the order.",
    "How do I make the payment?",
    "Can I get a sample first?",
];

const SELLER_LINES: [&str; 10] = [
    "Thank you for your message! I'll check our current stock.",
    "Yes, we can arrange that quantity. Let me confirm the pricing.",
    "Our mussels are fresh and of premium quality.",
    "We can deliver to your location. What's your preferred time?",
    "The harvest is ready. When would you like to collect?",
    "For bulk orders, we offer special pricing.",
    "Our farm follows sustainable practices.",
    "The mussels are packed and ready for delivery.",
    "Payment can be made on delivery or advance.",
    "We guarantee freshness and quality.",
];

/// Reply lines a counterpart with the given role may send.
pub fn candidate_lines(voice: Role) -> &'static [&'static str] {
    match voice {
        Role::Buyer => &BUYER_LINES,
        Role::Seller => &SELLER_LINES,
    }
}

/// Delays, in milliseconds after the local send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorTimings {
    pub delivered_after_ms: u64,
    pub read_after_ms: u64,
    pub typing_after_min_ms: u64,
    pub typing_after_max_ms: u64,
    pub response_after_min_ms: u64,
    pub response_after_max_ms: u64,
}

impl Default for SimulatorTimings {
    fn default() -> Self {
        Self {
            delivered_after_ms: 1_000,
            read_after_ms: 2_000,
            typing_after_min_ms: 150,
            typing_after_max_ms: 600,
            response_after_min_ms: 1_500,
            response_after_max_ms: 3_500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseId(u64);

/// Lifecycle of one simulated reply.
///
/// Appending the reply and clearing its indicator happen in one step, after
/// which the reply is no longer pending and reads as `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsePhase {
    Idle,
    TypingIndicatorShown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimTask {
    AdvanceStatus {
        conversation_id: ConversationId,
        message_id: MessageId,
        target: MessageStatus,
    },
    ShowTyping {
        response_id: ResponseId,
        conversation_id: ConversationId,
    },
    DeliverResponse {
        response_id: ResponseId,
        conversation_id: ConversationId,
    },
}

impl SimTask {
    pub fn conversation_id(&self) -> &ConversationId {
        match self {
            Self::AdvanceStatus {
                conversation_id, ..
            }
            | Self::ShowTyping {
                conversation_id, ..
            }
            | Self::DeliverResponse {
                conversation_id, ..
            } => conversation_id,
        }
    }

    /// Tasks that only change what an open view shows and carry no data.
    pub fn is_view_only(&self) -> bool {
        matches!(self, Self::ShowTyping { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Applied(Vec<ChatChange>),
    Unchanged,
    /// The target conversation or message no longer exists.
    LateCallback,
}

#[derive(Debug, Clone)]
struct PendingResponse {
    conversation_id: ConversationId,
    phase: ResponsePhase,
}

#[derive(Debug)]
pub struct ResponseSimulator<R> {
    timings: SimulatorTimings,
    voice: Role,
    random: R,
    next_response: u64,
    pending: HashMap<ResponseId, PendingResponse>,
}

impl<R: RandomSource> ResponseSimulator<R> {
    /// The simulator answers as the counterpart of `actor_role`.
    pub fn new(actor_role: Role, timings: SimulatorTimings, random: R) -> Self {
        Self {
            timings,
            voice: actor_role.counterpart(),
            random,
            next_response: 0,
            pending: HashMap::new(),
        }
    }

    pub fn voice(&self) -> Role {
        self.voice
    }

    pub fn phase(&self, response_id: ResponseId) -> ResponsePhase {
        self.pending
            .get(&response_id)
            .map(|pending| pending.phase)
            .unwrap_or(ResponsePhase::Idle)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn pending_responses(&self) -> usize {
        self.pending.len()
    }

    /// Schedules the follow-up work for a message the local actor just sent.
    pub fn schedule_for_send(
        &mut self,
        timers: &mut TimerQueue<SimTask>,
        conversation_id: &ConversationId,
        message_id: MessageId,
        sent_at: DateTime<Utc>,
    ) -> ResponseId {
        let timings = &self.timings;
        timers.schedule(
            sent_at + millis(timings.delivered_after_ms),
            SimTask::AdvanceStatus {
                conversation_id: conversation_id.clone(),
                message_id,
                target: MessageStatus::Delivered,
            },
        );
        timers.schedule(
            sent_at + millis(timings.read_after_ms),
            SimTask::AdvanceStatus {
                conversation_id: conversation_id.clone(),
                message_id,
                target: MessageStatus::Read,
            },
        );

        let typing_after = self
            .random
            .millis_between(timings.typing_after_min_ms, timings.typing_after_max_ms);
        let respond_after = self
            .random
            .millis_between(timings.response_after_min_ms, timings.response_after_max_ms)
            .max(typing_after);

        let response_id = ResponseId(self.next_response);
        self.next_response += 1;
        self.pending.insert(
            response_id,
            PendingResponse {
                conversation_id: conversation_id.clone(),
                phase: ResponsePhase::Idle,
            },
        );

        timers.schedule(
            sent_at + millis(typing_after),
            SimTask::ShowTyping {
                response_id,
                conversation_id: conversation_id.clone(),
            },
        );
        timers.schedule(
            sent_at + millis(respond_after),
            SimTask::DeliverResponse {
                response_id,
                conversation_id: conversation_id.clone(),
            },
        );

        tracing::debug!(
            conversation_id = %conversation_id,
            message_id = %message_id,
            typing_after_ms = typing_after,
            respond_after_ms = respond_after,
            "simulated response scheduled"
        );

        response_id
    }

    /// Applies one fired task to the store.
    pub fn apply(
        &mut self,
        store: &mut ConversationStore,
        task: SimTask,
        now: DateTime<Utc>,
    ) -> TaskOutcome {
        match task {
            SimTask::AdvanceStatus {
                conversation_id,
                message_id,
                target,
            } => match store.advance_message_status(&conversation_id, message_id, target) {
                Ok(true) => TaskOutcome::Applied(vec![ChatChange::StatusAdvanced {
                    conversation_id,
                    message_id,
                    status: target,
                }]),
                Ok(false) => TaskOutcome::Unchanged,
                Err(error) => late_callback(&error),
            },
            SimTask::ShowTyping {
                response_id,
                conversation_id,
            } => self.show_typing(store, response_id, conversation_id),
            SimTask::DeliverResponse {
                response_id,
                conversation_id,
            } => self.deliver_response(store, response_id, conversation_id, now),
        }
    }

    /// Drops the view-only work of a conversation whose view is going away.
    ///
    /// Replies and status advances stay scheduled; only the typing indicator
    /// is withdrawn. Returns how many timer tasks were cancelled.
    pub fn release_view(
        &mut self,
        timers: &mut TimerQueue<SimTask>,
        store: &mut ConversationStore,
        conversation_id: &ConversationId,
    ) -> usize {
        let cancelled = timers
            .cancel_where(|task| task.is_view_only() && task.conversation_id() == conversation_id)
            .len();

        for pending in self.pending.values_mut() {
            if &pending.conversation_id == conversation_id
                && pending.phase == ResponsePhase::TypingIndicatorShown
            {
                pending.phase = ResponsePhase::Idle;
            }
        }
        store.clear_composing(conversation_id);

        cancelled
    }

    fn show_typing(
        &mut self,
        store: &mut ConversationStore,
        response_id: ResponseId,
        conversation_id: ConversationId,
    ) -> TaskOutcome {
        let Some(pending) = self.pending.get_mut(&response_id) else {
            return TaskOutcome::LateCallback;
        };
        if pending.phase != ResponsePhase::Idle {
            return TaskOutcome::Unchanged;
        }
        if let Err(error) = store.begin_composing(&conversation_id) {
            return late_callback(&error);
        }

        pending.phase = ResponsePhase::TypingIndicatorShown;
        TaskOutcome::Applied(vec![ChatChange::ComposingChanged {
            conversation_id,
            composing: true,
        }])
    }

    fn deliver_response(
        &mut self,
        store: &mut ConversationStore,
        response_id: ResponseId,
        conversation_id: ConversationId,
        now: DateTime<Utc>,
    ) -> TaskOutcome {
        let was_typing = self
            .pending
            .remove(&response_id)
            .is_some_and(|pending| pending.phase == ResponsePhase::TypingIndicatorShown);

        let participant_name = match store.get(&conversation_id) {
            Ok(conversation) => conversation.participant_name().to_owned(),
            Err(error) => return late_callback(&error),
        };

        let lines = candidate_lines(self.voice);
        let index = self.random.index_below(lines.len());
        let Some(content) = lines.get(index).or_else(|| lines.first()) else {
            return TaskOutcome::Unchanged;
        };
        let sender_id = SenderId::remote(format!("{}-response", self.voice));

        let receipt = match store.append_new(
            &conversation_id,
            |message_id| Message::create(message_id, sender_id, participant_name, content, now),
            Direction::Incoming,
            now,
        ) {
            Ok(receipt) => receipt,
            Err(error) => return late_callback(&error),
        };

        tracing::debug!(
            conversation_id = %conversation_id,
            message_id = %receipt.message_id,
            unread_bumped = receipt.unread_bumped,
            was_typing,
            "simulated response appended"
        );

        let mut changes = vec![ChatChange::MessageAppended {
            conversation_id: conversation_id.clone(),
            message_id: receipt.message_id,
            direction: Direction::Incoming,
            unread_bumped: receipt.unread_bumped,
        }];

        if was_typing {
            store.end_composing(&conversation_id);
            if !store.is_composing(&conversation_id) {
                changes.push(ChatChange::ComposingChanged {
                    conversation_id,
                    composing: false,
                });
            }
        }

        TaskOutcome::Applied(changes)
    }
}

fn millis(ms: u64) -> Duration {
    Duration::milliseconds(i64::try_from(ms).unwrap_or(i64::MAX))
}

fn late_callback(error: &ChatError) -> TaskOutcome {
    if error.is_not_found() {
        tracing::debug!(error = %error, "late simulator callback ignored");
    } else {
        tracing::warn!(error = %error, "simulator task could not be applied");
    }
    TaskOutcome::LateCallback
}
