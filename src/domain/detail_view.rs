//! Render-ready snapshot of an open conversation.
//!
//! Built fresh from the store on every render so day labels and the typing
//! row always reflect the current clock and simulator state.

use std::fmt;

use chrono::{DateTime, TimeZone};

use super::{
    conversation::{Conversation, ConversationId},
    message::{Message, MessageId, MessageStatus},
};

/// Which side of the conversation pane a message sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Written by the local actor; drawn on the right.
    Own,
    /// Written by the counterpart; drawn on the left.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Online,
    RecentlySeen,
}

impl Presence {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Online => "Online now",
            Self::RecentlySeen => "Last seen recently",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub message_id: MessageId,
    pub alignment: Alignment,
    pub sender_name: String,
    pub content: String,
    pub time: String,
    /// Only own messages carry a delivery badge.
    pub status_badge: Option<MessageStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySection {
    pub label: String,
    pub rows: Vec<MessageRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub conversation_id: ConversationId,
    pub participant_name: String,
    pub avatar_label: String,
    pub product_label: String,
    pub presence: Presence,
    pub sections: Vec<DaySection>,
    pub counterpart_typing: bool,
}

impl DetailView {
    pub fn build<Tz>(conversation: &Conversation, counterpart_typing: bool, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let timezone = now.timezone();
        let sections = conversation
            .group_by_day(now)
            .into_iter()
            .map(|group| DaySection {
                label: group.label.to_string(),
                rows: group
                    .messages
                    .into_iter()
                    .map(|message| message_row(message, &timezone))
                    .collect(),
            })
            .collect();

        let presence = if conversation.is_online() {
            Presence::Online
        } else {
            Presence::RecentlySeen
        };

        Self {
            conversation_id: conversation.id().clone(),
            participant_name: conversation.participant_name().to_owned(),
            avatar_label: conversation.avatar_label().to_owned(),
            product_label: conversation.product_label().to_owned(),
            presence,
            sections,
            counterpart_typing,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn message_count(&self) -> usize {
        self.sections.iter().map(|section| section.rows.len()).sum()
    }

    /// Title and hint shown before the first message is sent.
    pub fn empty_state_lines(&self) -> (String, String) {
        (
            "Start a conversation".to_owned(),
            format!(
                "Send a message to {} about {}",
                self.participant_name, self.product_label
            ),
        )
    }

    pub fn typing_label(&self) -> Option<String> {
        self.counterpart_typing
            .then(|| format!("{} is typing...", self.participant_name))
    }
}

fn message_row<Tz>(message: &Message, timezone: &Tz) -> MessageRow
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let alignment = if message.is_own() {
        Alignment::Own
    } else {
        Alignment::Other
    };

    MessageRow {
        message_id: message.id(),
        alignment,
        sender_name: message.sender_name().to_owned(),
        content: message.content().to_owned(),
        time: message
            .timestamp()
            .with_timezone(timezone)
            .format("%H:%M")
            .to_string(),
        status_badge: (alignment == Alignment::Own).then(|| message.status()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            conversation::Direction,
            message::SenderId,
        },
        test_support::{at_ms, conversation},
    };

    // 2026-02-14 10:00:00 UTC
    const FEB_14_10AM: i64 = 1_771_063_200_000;

    fn push(conversation: &mut Conversation, sender: SenderId, text: &str, ms: i64) {
        let now = at_ms(ms);
        let direction = if sender.is_local() {
            Direction::Outgoing
        } else {
            Direction::Incoming
        };
        let message = Message::create(conversation.next_message_id(now), sender, "Ravi", text, now)
            .expect("message should be created");
        conversation.append_message(message, direction, false);
    }

    #[test]
    fn own_messages_align_right_with_status_badge() {
        let mut chat = conversation("1", "Ravi", "Mussels");
        push(&mut chat, SenderId::Local, "Hi", FEB_14_10AM);

        let view = DetailView::build(&chat, false, &at_ms(FEB_14_10AM));

        let row = &view.sections[0].rows[0];
        assert_eq!(row.alignment, Alignment::Own);
        assert_eq!(row.status_badge, Some(MessageStatus::Sent));
        assert_eq!(row.time, "10:00");
    }

    #[test]
    fn counterpart_messages_align_left_without_badge() {
        let mut chat = conversation("1", "Ravi", "Mussels");
        push(&mut chat, SenderId::remote("seller1"), "Hello", FEB_14_10AM);

        let view = DetailView::build(&chat, false, &at_ms(FEB_14_10AM));

        let row = &view.sections[0].rows[0];
        assert_eq!(row.alignment, Alignment::Other);
        assert_eq!(row.status_badge, None);
    }

    #[test]
    fn sections_follow_day_groups() {
        let mut chat = conversation("1", "Ravi", "Mussels");
        push(&mut chat, SenderId::Local, "Yesterday's question", FEB_14_10AM - 86_400_000);
        push(&mut chat, SenderId::remote("seller1"), "Today's answer", FEB_14_10AM);

        let view = DetailView::build(&chat, false, &at_ms(FEB_14_10AM));

        let labels: Vec<_> = view.sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Yesterday", "Today"]);
        assert_eq!(view.message_count(), 2);
    }

    #[test]
    fn empty_conversation_offers_start_hint() {
        let chat = conversation("1", "Ravi", "Fresh Green Mussels");

        let view = DetailView::build(&chat, false, &at_ms(FEB_14_10AM));

        assert!(view.is_empty());
        let (title, hint) = view.empty_state_lines();
        assert_eq!(title, "Start a conversation");
        assert_eq!(hint, "Send a message to Ravi about Fresh Green Mussels");
    }

    #[test]
    fn typing_label_only_when_composing() {
        let chat = conversation("1", "Ravi", "Mussels");

        let idle = DetailView::build(&chat, false, &at_ms(FEB_14_10AM));
        let typing = DetailView::build(&chat, true, &at_ms(FEB_14_10AM));

        assert_eq!(idle.typing_label(), None);
        assert_eq!(typing.typing_label(), Some("Ravi is typing...".to_owned()));
    }

    #[test]
    fn presence_reflects_online_flag() {
        let chat = conversation("1", "Ravi", "Mussels");

        let view = DetailView::build(&chat, false, &at_ms(FEB_14_10AM));

        assert_eq!(view.presence, Presence::Online);
        assert_eq!(view.presence.as_label(), "Online now");
    }
}
