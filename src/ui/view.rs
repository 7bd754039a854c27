use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::{
    composer_state::ComposerState,
    conversation_list_state::ConversationListUiState,
    detail_view::{DetailView, Presence},
    shell_state::ShellState,
    summary::ConversationSummary,
};

use super::message_input::{render_input, COMPOSER_PLACEHOLDER, SEARCH_PLACEHOLDER};
use super::message_rendering::{build_detail_elements, element_to_list_item};
use super::styles;

const ONLINE_DOT: &str = " \u{25CF}";
const ELLIPSIS: &str = "...";

pub fn render(frame: &mut Frame<'_>, state: &ShellState, now: DateTime<Utc>) {
    let [header_area, body_area, footer_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    frame.render_widget(Paragraph::new(header_line(state)), header_area);

    match state.detail() {
        Some(detail) => render_detail(frame, body_area, detail, state.composer()),
        None => render_list(frame, body_area, state, now),
    }

    frame.render_widget(Paragraph::new(footer_line(state)), footer_area);
}

fn header_line(state: &ShellState) -> Line<'static> {
    if let Some(detail) = state.detail() {
        let online = detail.presence == Presence::Online;
        return Line::from(vec![
            Span::styled(detail.participant_name.clone(), styles::header_title_style()),
            Span::styled(" \u{00B7} ", styles::separator_style()),
            Span::styled(detail.product_label.clone(), styles::product_label_style()),
            Span::styled(" \u{00B7} ", styles::separator_style()),
            Span::styled(
                detail.presence.as_label().to_owned(),
                styles::presence_style(online),
            ),
        ]);
    }

    let list = state.conversation_list();
    let mut spans = vec![
        Span::styled("Messages ", styles::header_title_style()),
        Span::styled(
            format!("{} conversations", list.total_conversations()),
            styles::timestamp_style(),
        ),
    ];

    if list.total_unread() > 0 {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!(" {} unread ", list.total_unread()),
            styles::header_unread_style(),
        ));
    }

    Line::from(spans)
}

fn footer_line(state: &ShellState) -> Line<'static> {
    if let Some(notice) = state.notice() {
        return Line::from(Span::styled(notice.to_owned(), styles::notice_style()));
    }

    let hints = if state.detail().is_some() {
        "Enter send | Esc back | Ctrl+C quit"
    } else if state.is_search_focused() {
        "Type to filter | Enter/Esc done | Ctrl+C quit"
    } else {
        "j/k move | Enter open | / search | q quit"
    };

    Line::from(Span::styled(hints, styles::key_hint_style()))
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &ShellState, now: DateTime<Utc>) {
    let [search_area, list_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .areas(area);

    render_input(
        frame,
        search_area,
        state.search(),
        SEARCH_PLACEHOLDER,
        state.is_search_focused(),
    );

    let list = state.conversation_list();
    let border_style = if state.is_search_focused() {
        styles::inactive_panel_border_style()
    } else {
        styles::active_panel_border_style()
    };

    match list.ui_state() {
        ConversationListUiState::Empty => render_list_message(
            frame,
            list_area,
            &["No conversations yet", "Chats with buyers and sellers show up here"],
            border_style,
        ),
        ConversationListUiState::NoMatches => render_list_message(
            frame,
            list_area,
            &["No chats found", "Try searching with a different name or product"],
            border_style,
        ),
        ConversationListUiState::Ready => {
            // Inner width = area width - 2 (borders)
            let inner_width = list_area.width.saturating_sub(2) as usize;
            let items: Vec<ListItem<'static>> = list
                .rows()
                .iter()
                .map(|row| ListItem::new(conversation_row_lines(row, inner_width, now)))
                .collect();

            let widget = List::new(items)
                .block(
                    Block::default()
                        .title(format!("Conversations ({})", list.rows().len()))
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

            let mut list_state = ListState::default();
            list_state.select(list.selected_index());
            frame.render_stateful_widget(widget, list_area, &mut list_state);
        }
    }
}

fn render_list_message(frame: &mut Frame<'_>, area: Rect, lines: &[&str], border_style: Style) {
    let text: Vec<Line<'static>> = lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let style = if idx == 0 {
                styles::participant_name_style()
            } else {
                styles::preview_style()
            };
            Line::from(Span::styled((*line).to_owned(), style))
        })
        .collect();

    let message = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .title("Conversations")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(message, area);
}

/// Two lines per conversation: identity and age on top, product, preview
/// and unread badge below.
fn conversation_row_lines(
    row: &ConversationSummary,
    width: usize,
    now: DateTime<Utc>,
) -> Vec<Line<'static>> {
    vec![identity_line(row, width, now), preview_line(row, width)]
}

fn identity_line(row: &ConversationSummary, width: usize, now: DateTime<Utc>) -> Line<'static> {
    let avatar = format!("{:>2} ", row.avatar_label);
    let online = if row.is_online { ONLINE_DOT } else { "" };
    let age = row
        .relative_age(now)
        .map(|age| format!(" {age}"))
        .unwrap_or_default();

    let used = avatar.width() + online.width() + age.width();
    let (name, padding) = fit(&row.participant_name, width.saturating_sub(used));

    let mut spans = vec![
        Span::styled(avatar, styles::avatar_style()),
        Span::styled(name, styles::participant_name_style()),
    ];
    if !online.is_empty() {
        spans.push(Span::styled(online, styles::online_indicator_style()));
    }
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(age, styles::timestamp_style()));

    Line::from(spans)
}

fn preview_line(row: &ConversationSummary, width: usize) -> Line<'static> {
    let indent = "   ";
    let product = format!("{} \u{00B7} ", row.product_label);
    let unread_badge = if row.unread_count > 0 {
        format!(" [{}]", row.unread_count)
    } else {
        String::new()
    };

    let (prefix, prefix_style) = preview_prefix(row);
    let (preview, preview_style) = if row.counterpart_typing {
        ("typing...".to_owned(), styles::typing_style())
    } else {
        let text = row
            .last_message_preview
            .as_deref()
            .map(normalize_preview)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| "No messages yet".to_owned());
        let style = if row.unread_count > 0 {
            styles::unread_preview_style()
        } else {
            styles::preview_style()
        };
        (text, style)
    };

    let used = indent.width() + product.width() + prefix.width() + unread_badge.width();
    let (preview, padding) = fit(&preview, width.saturating_sub(used));

    let mut spans = vec![
        Span::raw(indent),
        Span::styled(product, styles::product_label_style()),
    ];
    if !prefix.is_empty() {
        spans.push(Span::styled(prefix, prefix_style));
    }
    spans.push(Span::styled(preview, preview_style));
    spans.push(Span::raw(" ".repeat(padding)));
    if !unread_badge.is_empty() {
        spans.push(Span::styled(unread_badge, styles::unread_count_style()));
    }

    Line::from(spans)
}

/// Delivery status of the last message when the local actor sent it.
fn preview_prefix(row: &ConversationSummary) -> (String, Style) {
    match row.outgoing_status {
        Some(status) if !row.counterpart_typing => (
            format!("{}: ", status.as_label()),
            styles::status_badge_style(status),
        ),
        _ => (String::new(), Style::default()),
    }
}

fn normalize_preview(preview: &str) -> String {
    preview.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates `text` to `available` display columns, returning the text and
/// the padding needed to fill the remaining columns.
fn fit(text: &str, available: usize) -> (String, usize) {
    let text_width = text.width();
    if text_width <= available {
        return (text.to_owned(), available - text_width);
    }

    let budget = available.saturating_sub(ELLIPSIS.len());
    let mut truncated = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        truncated.push(ch);
        used += ch_width;
    }

    if available >= ELLIPSIS.len() {
        truncated.push_str(ELLIPSIS);
        used += ELLIPSIS.len();
    }

    (truncated, available.saturating_sub(used))
}

fn render_detail(frame: &mut Frame<'_>, area: Rect, detail: &DetailView, composer: &ComposerState) {
    let [messages_area, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .areas(area);

    let block = Block::default()
        .title(format!("{} {}", detail.avatar_label, detail.participant_name))
        .borders(Borders::ALL)
        .border_style(styles::inactive_panel_border_style());

    if detail.is_empty() && !detail.counterpart_typing {
        let (title, hint) = detail.empty_state_lines();
        let empty = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(title, styles::participant_name_style())),
            Line::from(Span::styled(hint, styles::preview_style())),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, messages_area);
    } else {
        let items: Vec<ListItem<'static>> = build_detail_elements(detail)
            .iter()
            .map(element_to_list_item)
            .collect();
        let heights: Vec<usize> = items.iter().map(ListItem::height).collect();
        let viewport = messages_area.height.saturating_sub(2) as usize;

        let mut list_state = ListState::default().with_offset(bottom_offset(&heights, viewport));
        frame.render_stateful_widget(List::new(items).block(block), messages_area, &mut list_state);
    }

    render_input(frame, input_area, composer, COMPOSER_PLACEHOLDER, true);
}

/// First item index that keeps the newest items visible in `viewport` rows.
fn bottom_offset(heights: &[usize], viewport: usize) -> usize {
    let mut remaining = viewport;
    for (idx, height) in heights.iter().enumerate().rev() {
        if *height > remaining {
            return (idx + 1).min(heights.len().saturating_sub(1));
        }
        remaining -= height;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{actor::Role, conversation::ConversationId, message::MessageStatus},
        test_support::at_ms,
    };
    use ratatui::{backend::TestBackend, Terminal};

    const TEST_WIDTH: usize = 60;
    const NOW: i64 = 1_771_063_200_000;

    fn summary(name: &str, unread: u32, preview: Option<&str>) -> ConversationSummary {
        ConversationSummary {
            conversation_id: ConversationId::new("1"),
            participant_name: name.to_owned(),
            participant_role: Role::Seller,
            avatar_label: "RK".to_owned(),
            is_online: true,
            product_label: "Fresh Green Mussels".to_owned(),
            last_message_preview: preview.map(str::to_owned),
            last_message_at: preview.map(|_| at_ms(NOW - 2 * 3_600_000)),
            unread_count: unread,
            outgoing_status: None,
            counterpart_typing: false,
        }
    }

    fn line_to_string(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn rows_text(row: &ConversationSummary) -> Vec<String> {
        conversation_row_lines(row, TEST_WIDTH, at_ms(NOW))
            .iter()
            .map(line_to_string)
            .collect()
    }

    fn buffer_text(state: &ShellState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, state, at_ms(NOW)))
            .expect("render should succeed");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn row_shows_name_online_dot_and_age() {
        let lines = rows_text(&summary("Ravi Kumar", 0, Some("Hello")));

        assert!(lines[0].contains("RK Ravi Kumar"));
        assert!(lines[0].contains('\u{25CF}'));
        assert!(lines[0].ends_with("2h ago"));
        assert_eq!(lines[0].width(), TEST_WIDTH);
    }

    #[test]
    fn row_shows_product_preview_and_unread_badge() {
        let lines = rows_text(&summary("Ravi Kumar", 3, Some("Hello")));

        assert!(lines[1].contains("Fresh Green Mussels"));
        assert!(lines[1].contains("Hello"));
        assert!(lines[1].ends_with("[3]"));
    }

    #[test]
    fn row_omits_badge_when_nothing_unread() {
        let lines = rows_text(&summary("Ravi Kumar", 0, Some("Hello")));

        assert!(!lines[1].contains('['));
    }

    #[test]
    fn row_prefixes_own_last_message_with_status() {
        let mut row = summary("Ravi Kumar", 0, Some("Hello"));
        row.outgoing_status = Some(MessageStatus::Delivered);

        assert!(rows_text(&row)[1].contains("Delivered: Hello"));
    }

    #[test]
    fn typing_replaces_preview() {
        let mut row = summary("Ravi Kumar", 0, Some("Hello"));
        row.outgoing_status = Some(MessageStatus::Read);
        row.counterpart_typing = true;

        let preview = &rows_text(&row)[1];
        assert!(preview.contains("typing..."));
        assert!(!preview.contains("Hello"));
        assert!(!preview.contains("Read"));
    }

    #[test]
    fn missing_preview_falls_back_to_placeholder() {
        let lines = rows_text(&summary("Ravi Kumar", 0, Some("  \n\t  ")));

        assert!(lines[1].contains("No messages yet"));
    }

    #[test]
    fn long_preview_is_truncated_to_width() {
        let long = "For 100kg, I can give you a special price of ₹140 per kg. ".repeat(3);
        let lines = rows_text(&summary("Ravi Kumar", 1, Some(&long)));

        assert!(lines[1].contains("..."));
        assert_eq!(lines[1].width(), TEST_WIDTH);
    }

    #[test]
    fn fit_pads_short_text_and_truncates_long_text() {
        assert_eq!(fit("abc", 6), ("abc".to_owned(), 3));
        assert_eq!(fit("abcdefgh", 6), ("abc...".to_owned(), 0));
        assert_eq!(fit("abcdefgh", 2), (String::new(), 2));
    }

    #[test]
    fn bottom_offset_keeps_newest_items_visible() {
        assert_eq!(bottom_offset(&[3, 3, 3], 20), 0);
        assert_eq!(bottom_offset(&[3, 3, 3, 3], 7), 2);
        assert_eq!(bottom_offset(&[3, 10], 5), 1);
    }

    #[test]
    fn header_omits_unread_when_zero() {
        let mut state = ShellState::default();
        state
            .conversation_list_mut()
            .refresh(vec![summary("Ravi Kumar", 0, Some("Hello"))], 1, 0);

        let header = line_to_string(&header_line(&state));
        assert!(header.contains("1 conversations"));
        assert!(!header.contains("unread"));
    }

    #[test]
    fn header_shows_total_unread() {
        let mut state = ShellState::default();
        state
            .conversation_list_mut()
            .refresh(vec![summary("Ravi Kumar", 2, Some("Hello"))], 3, 4);

        assert!(line_to_string(&header_line(&state)).contains("4 unread"));
    }

    #[test]
    fn notice_replaces_key_hints() {
        let mut state = ShellState::default();
        assert!(line_to_string(&footer_line(&state)).contains("q quit"));

        state.set_notice("New message from Ravi Kumar");
        assert_eq!(
            line_to_string(&footer_line(&state)),
            "New message from Ravi Kumar"
        );
    }

    #[test]
    fn renders_no_match_state() {
        let mut state = ShellState::default();
        state.conversation_list_mut().refresh(vec![], 3, 0);

        assert!(buffer_text(&state).contains("No chats found"));
    }

    #[test]
    fn renders_empty_conversation_placeholder() {
        let mut state = ShellState::default();
        state.set_detail(Some(DetailView {
            conversation_id: ConversationId::new("1"),
            participant_name: "Ravi Kumar".to_owned(),
            avatar_label: "RK".to_owned(),
            product_label: "Fresh Green Mussels".to_owned(),
            presence: Presence::RecentlySeen,
            sections: vec![],
            counterpart_typing: false,
        }));

        let text = buffer_text(&state);
        assert!(text.contains("Start a conversation"));
        assert!(text.contains("Last seen recently"));
    }
}
