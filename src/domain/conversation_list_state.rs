use super::{conversation::ConversationId, summary::ConversationSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationListUiState {
    Ready,
    /// The inbox has no conversations at all.
    Empty,
    /// Conversations exist but none matches the search term.
    NoMatches,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationListState {
    ui_state: ConversationListUiState,
    rows: Vec<ConversationSummary>,
    selected_index: Option<usize>,
    total_conversations: usize,
    total_unread: u32,
}

impl Default for ConversationListState {
    fn default() -> Self {
        Self {
            ui_state: ConversationListUiState::Empty,
            rows: Vec::new(),
            selected_index: None,
            total_conversations: 0,
            total_unread: 0,
        }
    }
}

impl ConversationListState {
    pub fn ui_state(&self) -> ConversationListUiState {
        self.ui_state
    }

    pub fn rows(&self) -> &[ConversationSummary] {
        &self.rows
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&ConversationSummary> {
        self.selected_index.and_then(|index| self.rows.get(index))
    }

    pub fn total_conversations(&self) -> usize {
        self.total_conversations
    }

    pub fn total_unread(&self) -> u32 {
        self.total_unread
    }

    /// Replaces the visible rows, keeping the selection on the same conversation when possible.
    pub fn refresh(
        &mut self,
        rows: Vec<ConversationSummary>,
        total_conversations: usize,
        total_unread: u32,
    ) {
        self.total_conversations = total_conversations;
        self.total_unread = total_unread;

        if rows.is_empty() {
            self.ui_state = if total_conversations == 0 {
                ConversationListUiState::Empty
            } else {
                ConversationListUiState::NoMatches
            };
            self.rows.clear();
            self.selected_index = None;
            return;
        }

        let previous = self.selected().map(|row| row.conversation_id.clone());
        self.ui_state = ConversationListUiState::Ready;
        self.rows = rows;
        self.selected_index = resolve_selection_index(&self.rows, previous.as_ref());
    }

    pub fn select_next(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        let last_index = self.rows.len().saturating_sub(1);
        self.selected_index = Some(std::cmp::min(index.saturating_add(1), last_index));
    }

    pub fn select_previous(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        self.selected_index = Some(index.saturating_sub(1));
    }
}

fn resolve_selection_index(
    rows: &[ConversationSummary],
    previous: Option<&ConversationId>,
) -> Option<usize> {
    if rows.is_empty() {
        return None;
    }

    previous
        .and_then(|id| rows.iter().position(|row| &row.conversation_id == id))
        .or(Some(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::conversation;

    fn row(id: &str, name: &str) -> ConversationSummary {
        ConversationSummary::from_conversation(&conversation(id, name, "Mussels"), false)
    }

    #[test]
    fn default_state_is_empty_without_selection() {
        let state = ConversationListState::default();

        assert_eq!(state.ui_state(), ConversationListUiState::Empty);
        assert!(state.rows().is_empty());
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn refresh_with_rows_selects_first() {
        let mut state = ConversationListState::default();

        state.refresh(vec![row("1", "Ravi"), row("2", "Priya")], 2, 3);

        assert_eq!(state.ui_state(), ConversationListUiState::Ready);
        assert_eq!(state.selected_index(), Some(0));
        assert_eq!(state.total_unread(), 3);
        assert_eq!(
            state.selected().map(|r| r.conversation_id.as_str()),
            Some("1")
        );
    }

    #[test]
    fn refresh_with_no_rows_but_conversations_is_no_matches() {
        let mut state = ConversationListState::default();

        state.refresh(vec![], 3, 0);

        assert_eq!(state.ui_state(), ConversationListUiState::NoMatches);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn refresh_with_no_conversations_is_empty() {
        let mut state = ConversationListState::default();
        state.refresh(vec![row("1", "Ravi")], 1, 0);

        state.refresh(vec![], 0, 0);

        assert_eq!(state.ui_state(), ConversationListUiState::Empty);
        assert!(state.rows().is_empty());
    }

    #[test]
    fn selection_moves_within_bounds() {
        let mut state = ConversationListState::default();
        state.refresh(vec![row("1", "Ravi"), row("2", "Priya")], 2, 0);

        state.select_next();
        state.select_next();
        state.select_previous();

        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn refresh_preserves_selection_by_conversation_id() {
        let mut state = ConversationListState::default();
        state.refresh(vec![row("1", "Ravi"), row("2", "Priya"), row("3", "Suresh")], 3, 0);
        state.select_next();

        state.refresh(vec![row("2", "Priya"), row("3", "Suresh")], 3, 0);

        assert_eq!(state.selected_index(), Some(0));
        assert_eq!(
            state.selected().map(|r| r.conversation_id.as_str()),
            Some("2")
        );
    }

    #[test]
    fn refresh_falls_back_to_first_when_selection_disappears() {
        let mut state = ConversationListState::default();
        state.refresh(vec![row("1", "Ravi"), row("2", "Priya")], 2, 0);
        state.select_next();

        state.refresh(vec![row("3", "Suresh")], 3, 0);

        assert_eq!(state.selected_index(), Some(0));
    }
}
