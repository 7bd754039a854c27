use super::{
    composer_state::ComposerState, conversation_list_state::ConversationListState,
    detail_view::DetailView,
};

/// Everything the terminal view needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    conversation_list: ConversationListState,
    search: ComposerState,
    search_focused: bool,
    detail: Option<DetailView>,
    composer: ComposerState,
    notice: Option<String>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            running: true,
            conversation_list: ConversationListState::default(),
            search: ComposerState::default(),
            search_focused: false,
            detail: None,
            composer: ComposerState::default(),
            notice: None,
        }
    }
}

impl ShellState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn conversation_list(&self) -> &ConversationListState {
        &self.conversation_list
    }

    pub fn conversation_list_mut(&mut self) -> &mut ConversationListState {
        &mut self.conversation_list
    }

    pub fn search(&self) -> &ComposerState {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut ComposerState {
        &mut self.search
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn set_search_focused(&mut self, focused: bool) {
        self.search_focused = focused;
    }

    /// The open conversation, when the detail view is showing.
    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    pub fn set_detail(&mut self, detail: Option<DetailView>) {
        self.detail = detail;
    }

    pub fn composer(&self) -> &ComposerState {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut ComposerState {
        &mut self.composer
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
