//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::message::MessageStatus;

// =============================================================================
// Frame styles
// =============================================================================

pub fn header_title_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the "N unread" header badge.
pub fn header_unread_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

pub fn notice_style() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn key_hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn active_panel_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn inactive_panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Conversation list styles
// =============================================================================

/// Style for participant name (bold, bright).
pub fn participant_name_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for the avatar initials column.
pub fn avatar_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn product_label_style() -> Style {
    Style::default().fg(Color::Magenta)
}

/// Style for message preview text (dimmed).
pub fn preview_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Preview of a conversation with unread messages.
pub fn unread_preview_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for unread count badge (green).
pub fn unread_count_style() -> Style {
    Style::default().fg(Color::Green)
}

pub fn online_indicator_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Style for the relative age column.
pub fn timestamp_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn separator_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Conversation detail styles
// =============================================================================

/// Style for message sender name (white, bold).
pub fn message_sender_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn message_time_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn own_message_style() -> Style {
    Style::default().fg(Color::LightCyan)
}

pub fn other_message_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn status_badge_style(status: MessageStatus) -> Style {
    match status {
        MessageStatus::Sent => Style::default().fg(Color::DarkGray),
        MessageStatus::Delivered => Style::default().fg(Color::Gray),
        MessageStatus::Read => Style::default().fg(Color::Green),
    }
}

/// Style for day separator line.
pub fn date_separator_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn typing_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::ITALIC)
}

pub fn presence_style(online: bool) -> Style {
    if online {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

// =============================================================================
// Input styles
// =============================================================================

pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn input_placeholder_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}
