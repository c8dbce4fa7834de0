#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Session;
use crate::domain::models::SlashCommand;
use crate::domain::models::TurnRequest;
use crate::infrastructure::backends::BackendManager;

pub struct AppState<'a> {
    pub bubble_list: BubbleList<'a>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub scroll: Scroll,
    pub thread_id: String,
    pub waiting_for_backend: bool,
}

impl<'a> AppState<'a> {
    pub async fn new() -> Result<AppState<'a>> {
        let mut app_state = AppState {
            bubble_list: BubbleList::new(),
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![],
            scroll: Scroll::default(),
            thread_id: Session::create_thread_id(),
            waiting_for_backend: false,
        };

        let backend = BackendManager::get()?;
        if let Err(err) = backend.health_check().await {
            tracing::warn!(error = ?err, "agent health check failed");
            app_state.add_message(Message::new_with_type(
                Author::Assistant,
                MessageType::Error,
                "It looks like the billing service isn't reachable right now. You can still type, but messages won't go through until it's back.",
            ));
        }

        return Ok(app_state);
    }

    /// Dispatches one user turn. Returns false without touching any state
    /// when the input trims to nothing or another turn is still in flight;
    /// the caller keeps the input buffer in that case.
    pub fn submit(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        let text = input.trim();
        if text.is_empty() || self.waiting_for_backend {
            return Ok(false);
        }

        self.add_message(Message::new(Author::User, text));
        self.waiting_for_backend = true;
        tx.send(Action::BackendRequest(TurnRequest::new(
            text,
            &self.thread_id,
        )))?;

        return Ok(true);
    }

    /// The agent returns the full transcript on every exchange, so local
    /// state is replaced outright. Optimistic bubbles and client notices
    /// never survive a successful turn.
    pub fn handle_transcript(&mut self, transcript: Vec<Message>) {
        self.messages = transcript;
        self.waiting_for_backend = false;
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn handle_backend_message(&mut self, message: Message) {
        self.add_message(message);
        self.waiting_for_backend = false;
    }

    /// Returns (should_break, handled). Slash input never produces a user
    /// bubble or a trip to the agent.
    pub fn handle_slash_commands(&mut self, input: &str) -> (bool, bool) {
        if let Some(command) = SlashCommand::parse(input) {
            if command.is_quit() {
                return (true, false);
            }

            if command.is_help() {
                self.add_message(Message::new(Author::Assistant, &help_text()));
                return (false, true);
            }
        }

        return (false, false);
    }

    pub fn last_user_turn(&self) -> Option<String> {
        return self
            .messages
            .iter()
            .rev()
            .find(|message| return message.author == Author::User)
            .map(|message| return message.content.to_string());
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width);

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);

        if self.waiting_for_backend {
            self.scroll.last();
        }
    }
}
