//! Single-line input rendering for the composer and the search field.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::composer_state::ComposerState;

use super::styles;

/// Prompt symbol shown before the input text.
const PROMPT_SYMBOL: &str = "> ";

pub const COMPOSER_PLACEHOLDER: &str = "Type a message...";
pub const SEARCH_PLACEHOLDER: &str = "Press '/' to search by name or product...";

/// Renders a bordered input field and places the cursor when focused.
pub fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    buffer: &ComposerState,
    placeholder: &str,
    is_focused: bool,
) {
    let border_style = if is_focused {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let paragraph = Paragraph::new(build_input_line(buffer, placeholder, is_focused)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(paragraph, area);

    if is_focused {
        let offset = cursor_offset(buffer).min(u16::MAX as usize) as u16;
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(PROMPT_SYMBOL.len() as u16)
            .saturating_add(offset);
        let cursor_y = area.y.saturating_add(1);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn build_input_line(buffer: &ComposerState, placeholder: &str, is_focused: bool) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if buffer.is_empty() && !is_focused {
        Line::from(vec![
            prompt,
            Span::styled(placeholder.to_owned(), styles::input_placeholder_style()),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(buffer.text().to_owned(), styles::input_text_style()),
        ])
    }
}

/// Display columns between the start of the text and the cursor.
fn cursor_offset(buffer: &ComposerState) -> usize {
    let before: String = buffer.text().chars().take(buffer.cursor()).collect();
    before.width()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn buffer(text: &str) -> ComposerState {
        let mut state = ComposerState::default();
        for ch in text.chars() {
            state.insert_char(ch);
        }
        state
    }

    #[test]
    fn shows_placeholder_when_empty_and_unfocused() {
        let text = line_text(&build_input_line(&ComposerState::default(), COMPOSER_PLACEHOLDER, false));

        assert!(text.contains(COMPOSER_PLACEHOLDER));
        assert!(text.starts_with(PROMPT_SYMBOL));
    }

    #[test]
    fn shows_empty_prompt_when_focused_and_empty() {
        let text = line_text(&build_input_line(&ComposerState::default(), COMPOSER_PLACEHOLDER, true));

        assert_eq!(text, PROMPT_SYMBOL);
    }

    #[test]
    fn shows_text_when_has_content() {
        let text = line_text(&build_input_line(&buffer("Hi"), SEARCH_PLACEHOLDER, false));

        assert!(text.contains("Hi"));
        assert!(!text.contains(SEARCH_PLACEHOLDER));
    }

    #[test]
    fn cursor_offset_counts_display_columns() {
        let mut state = buffer("₹115 kg");
        state.move_left();
        state.move_left();

        assert_eq!(cursor_offset(&state), 5);
    }
}
