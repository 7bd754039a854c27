use std::{cell::Cell, collections::VecDeque, rc::Rc};

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    domain::{
        actor::{Actor, Role},
        conversation::{Conversation, ConversationId, ConversationProfile},
    },
    usecases::{random::RandomSource, timers::Clock},
};

pub fn at_ms(ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .expect("test timestamp should be valid")
}

pub fn profile(id: &str, name: &str, product: &str) -> ConversationProfile {
    ConversationProfile {
        id: ConversationId::new(id),
        participant_name: name.to_owned(),
        participant_role: Role::Seller,
        avatar_label: None,
        is_online: true,
        product_label: product.to_owned(),
        product_ref: format!("ref-{id}"),
    }
}

pub fn conversation(id: &str, name: &str, product: &str) -> Conversation {
    Conversation::new(profile(id, name, product))
}

pub fn conversation_with_unread(id: &str, name: &str, product: &str, unread: u32) -> Conversation {
    Conversation::with_history(profile(id, name, product), Vec::new(), unread)
}

pub fn buyer() -> Actor {
    Actor {
        id: "buyer1".to_owned(),
        display_name: "You".to_owned(),
        role: Role::Buyer,
    }
}

pub fn seller() -> Actor {
    Actor {
        id: "seller1".to_owned(),
        display_name: "You".to_owned(),
        role: Role::Seller,
    }
}

/// Clock advanced by hand. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn starting_at(ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(at_ms(ms))),
        }
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now
            .set(self.now.get() + chrono::Duration::milliseconds(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Random source replaying queued answers; falls back to the lowest value.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    indices: VecDeque<usize>,
    millis: VecDeque<u64>,
}

impl ScriptedRandom {
    pub fn new(indices: Vec<usize>, millis: Vec<u64>) -> Self {
        Self {
            indices: indices.into(),
            millis: millis.into(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn index_below(&mut self, len: usize) -> usize {
        self.indices
            .pop_front()
            .unwrap_or(0)
            .min(len.saturating_sub(1))
    }

    fn millis_between(&mut self, min: u64, max: u64) -> u64 {
        self.millis.pop_front().unwrap_or(min).clamp(min, max.max(min))
    }
}
