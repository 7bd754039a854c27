use std::sync::mpsc;

use anyhow::Result;

use crate::domain::{
    composer_state::ComposerState,
    conversation::Direction,
    events::{AppEvent, ChatChange, KeyInput},
    navigation::Screen,
    shell_state::ShellState,
};

use super::{
    chat_session::ChatSession,
    contracts::ShellOrchestrator,
    list_conversations::ListConversationsQuery,
    random::RandomSource,
    send_message::SendMessageError,
    timers::Clock,
};

pub struct DefaultShellOrchestrator<C, R> {
    state: ShellState,
    session: ChatSession<C, R>,
    changes: mpsc::Receiver<ChatChange>,
}

impl<C: Clock, R: RandomSource> DefaultShellOrchestrator<C, R> {
    pub fn new(mut session: ChatSession<C, R>) -> Self {
        let changes = session.subscribe();
        let mut orchestrator = Self {
            state: ShellState::default(),
            session,
            changes,
        };
        orchestrator.refresh();
        orchestrator
    }

    fn handle_key(&mut self, key: KeyInput) {
        if key.ctrl && key.key == "c" {
            self.state.stop();
            return;
        }

        match self.session.screen().clone() {
            Screen::ListView if self.state.is_search_focused() => self.handle_search_key(&key),
            Screen::ListView => self.handle_list_key(&key),
            Screen::DetailView(_) => self.handle_detail_key(&key),
        }
    }

    fn handle_list_key(&mut self, key: &KeyInput) {
        match key.key.as_str() {
            "q" => self.state.stop(),
            "j" | "down" => self.state.conversation_list_mut().select_next(),
            "k" | "up" => self.state.conversation_list_mut().select_previous(),
            "/" => self.state.set_search_focused(true),
            "enter" => self.open_selected(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: &KeyInput) {
        match key.key.as_str() {
            "esc" | "enter" => self.state.set_search_focused(false),
            _ => edit_buffer(self.state.search_mut(), key),
        }
    }

    fn handle_detail_key(&mut self, key: &KeyInput) {
        match key.key.as_str() {
            "esc" => {
                self.session.close();
                self.state.composer_mut().clear();
            }
            "enter" => self.send_composer(),
            _ => edit_buffer(self.state.composer_mut(), key),
        }
    }

    fn open_selected(&mut self) {
        let Some(id) = self
            .state
            .conversation_list()
            .selected()
            .map(|row| row.conversation_id.clone())
        else {
            return;
        };

        match self.session.open(&id) {
            Ok(()) => {
                self.state.clear_notice();
                self.state.composer_mut().clear();
            }
            Err(error) => {
                tracing::warn!(conversation_id = %id, error = %error, "failed to open conversation");
            }
        }
    }

    fn send_composer(&mut self) {
        let Screen::DetailView(id) = self.session.screen().clone() else {
            return;
        };
        if self.state.composer().is_blank() {
            return;
        }

        let text = self.state.composer().text().to_owned();
        match self.session.send(&id, &text) {
            Ok(_) => self.state.composer_mut().clear(),
            Err(SendMessageError::EmptyMessage) => {}
            Err(SendMessageError::ConversationNotFound) => {
                tracing::warn!(conversation_id = %id, "send target disappeared");
                self.session.close();
            }
        }
    }

    fn drain_changes(&mut self) {
        while let Ok(change) = self.changes.try_recv() {
            if let ChatChange::MessageAppended {
                conversation_id,
                direction: Direction::Incoming,
                unread_bumped: true,
                ..
            } = change
            {
                if let Ok(conversation) = self.session.store().get(&conversation_id) {
                    self.state
                        .set_notice(format!("New message from {}", conversation.participant_name()));
                }
            }
        }
    }

    fn refresh(&mut self) {
        let listing = self
            .session
            .list(&ListConversationsQuery::new(self.state.search().text()));
        self.state.conversation_list_mut().refresh(
            listing.rows,
            listing.total_conversations,
            listing.total_unread,
        );
        self.state.set_detail(self.session.detail_view());
    }
}

impl<C: Clock, R: RandomSource> ShellOrchestrator for DefaultShellOrchestrator<C, R> {
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        // Key presses can arrive faster than the poll timeout, so every event drives the timers.
        self.session.tick();

        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => self.handle_key(key),
        }

        self.drain_changes();
        self.refresh();
        Ok(())
    }
}

fn edit_buffer(buffer: &mut ComposerState, key: &KeyInput) {
    match key.key.as_str() {
        "backspace" => buffer.backspace(),
        "delete" => buffer.delete(),
        "left" => buffer.move_left(),
        "right" => buffer.move_right(),
        "home" => buffer.move_home(),
        "end" => buffer.move_end(),
        _ => {
            if let Some(ch) = key.as_char() {
                buffer.insert_char(ch);
            }
        }
    }
}
