//! Conversation detail rendering.
//!
//! Turns a `DetailView` into list items:
//! - a day separator before each day section
//! - own messages right-aligned with a status badge, counterpart messages left
//! - the sender name shown once per run of consecutive messages from one side
//! - a trailing typing row while the counterpart composes

use ratatui::{
    layout::Alignment as TextAlignment,
    text::{Line, Span},
    widgets::ListItem,
};

use crate::domain::{
    detail_view::{Alignment, DetailView},
    message::MessageStatus,
};

use super::styles;

/// Represents a visual element in the conversation pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailElement {
    /// Day separator line (e.g., "——— Yesterday ———").
    DaySeparator(String),
    Message {
        alignment: Alignment,
        time: String,
        sender: Option<String>,
        content: String,
        status: Option<MessageStatus>,
    },
    Typing(String),
}

/// Flattens day sections into visual elements, grouping consecutive rows
/// of the same side under one sender label.
pub fn build_detail_elements(view: &DetailView) -> Vec<DetailElement> {
    let mut elements = Vec::with_capacity(view.message_count() + view.sections.len() + 1);

    for section in &view.sections {
        elements.push(DetailElement::DaySeparator(section.label.clone()));

        let mut prev_alignment = None;
        for row in &section.rows {
            let sender = (prev_alignment != Some(row.alignment)).then(|| row.sender_name.clone());

            elements.push(DetailElement::Message {
                alignment: row.alignment,
                time: row.time.clone(),
                sender,
                content: row.content.clone(),
                status: row.status_badge,
            });

            prev_alignment = Some(row.alignment);
        }
    }

    if let Some(label) = view.typing_label() {
        elements.push(DetailElement::Typing(label));
    }

    elements
}

/// Converts a detail element to a ListItem for ratatui rendering.
pub fn element_to_list_item(element: &DetailElement) -> ListItem<'static> {
    match element {
        DetailElement::DaySeparator(label) => day_separator_item(label),
        DetailElement::Message {
            alignment,
            time,
            sender,
            content,
            status,
        } => message_item(*alignment, time, sender.as_deref(), content, *status),
        DetailElement::Typing(label) => ListItem::new(Line::from(Span::styled(
            label.clone(),
            styles::typing_style(),
        ))),
    }
}

fn day_separator_item(label: &str) -> ListItem<'static> {
    let line = Line::from(Span::styled(
        format!("——— {label} ———"),
        styles::date_separator_style(),
    ))
    .alignment(TextAlignment::Center);
    ListItem::new(vec![Line::default(), line, Line::default()])
}

fn message_item(
    alignment: Alignment,
    time: &str,
    sender: Option<&str>,
    content: &str,
    status: Option<MessageStatus>,
) -> ListItem<'static> {
    let (text_alignment, content_style) = match alignment {
        Alignment::Own => (TextAlignment::Right, styles::own_message_style()),
        Alignment::Other => (TextAlignment::Left, styles::other_message_style()),
    };

    let mut lines = Vec::new();

    if let Some(name) = sender {
        lines.push(
            Line::from(Span::styled(name.to_owned(), styles::message_sender_style()))
                .alignment(text_alignment),
        );
    }

    for text_line in content.lines() {
        lines.push(
            Line::from(Span::styled(text_line.to_owned(), content_style)).alignment(text_alignment),
        );
    }

    lines.push(meta_line(time, status).alignment(text_alignment));

    ListItem::new(lines)
}

/// Time, plus the delivery badge for own messages.
fn meta_line(time: &str, status: Option<MessageStatus>) -> Line<'static> {
    let mut spans = vec![Span::styled(time.to_owned(), styles::message_time_style())];

    if let Some(status) = status {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            status.as_label().to_owned(),
            styles::status_badge_style(status),
        ));
    }

    Line::from(spans)
}
