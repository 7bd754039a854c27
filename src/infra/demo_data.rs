//! Seed inbox for the demo marketplace.
//!
//! Histories are anchored relative to session start so the list always shows
//! the same relative ages.

use chrono::{DateTime, Duration, Utc};

use crate::{
    domain::{
        actor::{Actor, Role},
        conversation::{Conversation, ConversationId, ConversationProfile},
        error::ChatError,
        message::{Message, MessageId, MessageStatus, SenderId},
    },
    infra::contracts::ListingProvider,
};

struct SeedMessage {
    from_local: bool,
    content: &'static str,
    ago_ms: i64,
    status: MessageStatus,
}

struct SeedConversation {
    id: &'static str,
    participant_id: &'static str,
    participant_name: &'static str,
    product_ref: &'static str,
    is_online: bool,
    unread: u32,
    messages: &'static [SeedMessage],
}

const fn local(content: &'static str, ago_ms: i64, status: MessageStatus) -> SeedMessage {
    SeedMessage {
        from_local: true,
        content,
        ago_ms,
        status,
    }
}

const fn remote(content: &'static str, ago_ms: i64, status: MessageStatus) -> SeedMessage {
    SeedMessage {
        from_local: false,
        content,
        ago_ms,
        status,
    }
}

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;

const BUYER_INBOX: [SeedConversation; 3] = [
    SeedConversation {
        id: "1",
        participant_id: "seller1",
        participant_name: "Ravi Kumar",
        product_ref: "1",
        is_online: true,
        unread: 2,
        messages: &[
            local(
                "Hi, I'm interested in your fresh green mussels. Are they still available?",
                3 * HOUR_MS,
                MessageStatus::Read,
            ),
            remote(
                "Hello! Yes, we have fresh mussels harvested this morning. How much quantity do you need?",
                9_600_000,
                MessageStatus::Read,
            ),
            local(
                "I need around 25-30kg for my restaurant. What's your price per kg?",
                8_400_000,
                MessageStatus::Read,
            ),
            remote(
                "For 25-30kg, I can offer ₹115 per kg. These are premium quality mussels from clean waters.",
                7_800_000,
                MessageStatus::Read,
            ),
            local(
                "That sounds good. Can you deliver to Kozhikode by tomorrow morning?",
                7_500_000,
                MessageStatus::Read,
            ),
            remote(
                "Yes, we have 50kg fresh mussels available. When do you need them?",
                2 * HOUR_MS,
                MessageStatus::Delivered,
            ),
        ],
    },
    SeedConversation {
        id: "2",
        participant_id: "seller3",
        participant_name: "Priya Menon",
        product_ref: "3",
        is_online: false,
        unread: 0,
        messages: &[
            local(
                "Hi Priya, I saw your organic mussels listing. Are they certified organic?",
                2 * DAY_MS,
                MessageStatus::Read,
            ),
            remote(
                "Yes, we have organic certification. Our farm follows sustainable practices.",
                169_200_000,
                MessageStatus::Read,
            ),
            remote(
                "Thank you for the order! The mussels are packed and ready for pickup.",
                DAY_MS,
                MessageStatus::Read,
            ),
        ],
    },
    SeedConversation {
        id: "3",
        participant_id: "seller2",
        participant_name: "Suresh Nair",
        product_ref: "2",
        is_online: true,
        unread: 1,
        messages: &[
            local(
                "Hello, I need bulk quantity of black mussels. Do you have 100kg available?",
                3 * DAY_MS,
                MessageStatus::Read,
            ),
            remote(
                "Yes, we can arrange 100kg. Let me check our current stock and get back to you.",
                255_600_000,
                MessageStatus::Read,
            ),
            remote(
                "For 100kg, I can give you a special price of ₹140 per kg.",
                2 * DAY_MS,
                MessageStatus::Delivered,
            ),
        ],
    },
];

const SELLER_INBOX: [SeedConversation; 3] = [
    SeedConversation {
        id: "1",
        participant_id: "buyer1",
        participant_name: "Arjun Nair",
        product_ref: "1",
        is_online: true,
        unread: 1,
        messages: &[
            remote(
                "Hi, I'm interested in your fresh green mussels. Are they still available?",
                2 * HOUR_MS,
                MessageStatus::Read,
            ),
            local(
                "Hello! Yes, we have fresh mussels harvested this morning. How much quantity do you need?",
                6_600_000,
                MessageStatus::Read,
            ),
            remote(
                "I need around 30kg for my restaurant. What's your price per kg?",
                5_400_000,
                MessageStatus::Read,
            ),
            local(
                "For 30kg, I can offer ₹115 per kg. These are premium quality mussels from clean waters.",
                4_800_000,
                MessageStatus::Read,
            ),
            remote(
                "Can you deliver 30kg to Kochi by tomorrow? I need them for my restaurant.",
                HOUR_MS,
                MessageStatus::Delivered,
            ),
        ],
    },
    SeedConversation {
        id: "2",
        participant_id: "buyer2",
        participant_name: "Meera Krishnan",
        product_ref: "2",
        is_online: false,
        unread: 0,
        messages: &[
            remote(
                "Hello, I saw your premium black mussels. Are they organically farmed?",
                6 * HOUR_MS,
                MessageStatus::Read,
            ),
            local(
                "Yes, our black mussels are organically farmed using sustainable methods. They're premium quality.",
                5 * HOUR_MS,
                MessageStatus::Read,
            ),
            remote(
                "Perfect! I'll take 20kg. When can I pick them up?",
                4 * HOUR_MS,
                MessageStatus::Read,
            ),
        ],
    },
    SeedConversation {
        id: "3",
        participant_id: "buyer3",
        participant_name: "Rajesh Kumar",
        product_ref: "3",
        is_online: true,
        unread: 2,
        messages: &[
            remote(
                "Hi, I need mussels for my seafood processing unit. Do you have bulk quantities?",
                2 * DAY_MS,
                MessageStatus::Read,
            ),
            local(
                "Yes, we can supply bulk quantities. What quantity are you looking for?",
                169_200_000,
                MessageStatus::Read,
            ),
            remote(
                "Do you have bulk pricing for 100kg orders?",
                DAY_MS,
                MessageStatus::Delivered,
            ),
        ],
    },
];

/// Builds the inbox the actor sees on start: sellers for a buyer, buyers for a seller.
pub fn demo_inbox(
    actor: &Actor,
    listings: &dyn ListingProvider,
    now: DateTime<Utc>,
) -> Result<Vec<Conversation>, ChatError> {
    let seeds = match actor.role {
        Role::Buyer => &BUYER_INBOX,
        Role::Seller => &SELLER_INBOX,
    };

    seeds
        .iter()
        .map(|seed| build_conversation(seed, actor, listings, now))
        .collect()
}

fn build_conversation(
    seed: &SeedConversation,
    actor: &Actor,
    listings: &dyn ListingProvider,
    now: DateTime<Utc>,
) -> Result<Conversation, ChatError> {
    let product_label = listings
        .describe(seed.product_ref)
        .map(|listing| listing.label)
        .unwrap_or_else(|| format!("Listing {}", seed.product_ref));

    let messages = seed
        .messages
        .iter()
        .map(|message| {
            let timestamp = now - Duration::milliseconds(message.ago_ms);
            let (sender_id, sender_name) = if message.from_local {
                (SenderId::Local, actor.display_name.as_str())
            } else {
                (SenderId::remote(seed.participant_id), seed.participant_name)
            };

            Message::restored(
                MessageId(timestamp.timestamp_millis()),
                sender_id,
                sender_name,
                message.content,
                timestamp,
                message.status,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let profile = ConversationProfile {
        id: ConversationId::new(seed.id),
        participant_name: seed.participant_name.to_owned(),
        participant_role: actor.role.counterpart(),
        avatar_label: None,
        is_online: seed.is_online,
        product_label,
        product_ref: seed.product_ref.to_owned(),
    };

    Ok(Conversation::with_history(profile, messages, seed.unread))
}
