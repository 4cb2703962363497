//! Main application state and logic.

use std::collections::VecDeque;
use std::path::PathBuf;

use parlor_core::RIDDLE_HINT;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::speech::Voice;
use crate::ui::theme::{ChatTheme, THEME_NAMES};
use crate::ui::widgets::ChatItem;
use crate::ui::Overlay;
use crate::worker::{WorkerReply, WorkerRequest};

/// Default transcript path for `:w` and `:wq` without an argument.
const DEFAULT_TRANSCRIPT: &str = "transcript.json";

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and hotkeys (default)
    #[default]
    Normal,
    /// Insert mode - free text input
    Insert,
    /// Command mode - entering : commands
    Command,
}

/// Main application state
pub struct App {
    // Channel endpoints to the session worker
    request_tx: mpsc::Sender<WorkerRequest>,
    reply_rx: mpsc::Receiver<WorkerReply>,

    // Chat display
    pub user_name: String,
    pub chat_history: Vec<ChatItem>,
    pub chat_scroll: usize,
    pub scroll_locked_to_bottom: bool,

    // Input state
    pub input_mode: InputMode,
    input_buffer: String,
    cursor_position: usize,
    pub input_history: VecDeque<String>,
    pub history_index: Option<usize>,
    pub saved_input: Option<String>,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,
    pub quit_after_save: bool,

    // Display mirror of session state; the worker owns the session itself
    pub riddle_active: bool,
    pub turns: u64,

    // Presentation
    pub theme: ChatTheme,
    overlay: Option<Overlay>,
    pub voice: Voice,

    // Reply in flight
    pub awaiting_reply: bool,
    pub animation_frame: u8,
}

impl App {
    /// Create a new application wired to the session worker's channels.
    pub fn new(
        request_tx: mpsc::Sender<WorkerRequest>,
        reply_rx: mpsc::Receiver<WorkerReply>,
        user_name: impl Into<String>,
        voice: Voice,
    ) -> Self {
        let mut app = Self {
            request_tx,
            reply_rx,
            user_name: user_name.into(),
            chat_history: Vec::new(),
            chat_scroll: 0,
            scroll_locked_to_bottom: true,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            input_history: VecDeque::with_capacity(100),
            history_index: None,
            saved_input: None,
            status_message: None,
            should_quit: false,
            quit_after_save: false,
            riddle_active: false,
            turns: 0,
            theme: ChatTheme::default(),
            overlay: None,
            voice,
            awaiting_reply: false,
            animation_frame: 0,
        };

        app.add_message(ChatItem::bot(
            "Hello! I'm Parlor. Type 'Riddles' for a riddle, or try 'jokes' and 'facts'.",
        ));
        app.add_message(ChatItem::system(
            "Press 'i' to type a message, '?' for help, j/k to scroll.",
        ));

        app
    }

    /// Non-blocking poll of the worker's reply channel.
    pub fn try_recv_reply(&mut self) -> Result<WorkerReply, TryRecvError> {
        self.reply_rx.try_recv()
    }

    /// Fold one worker reply into the display state.
    pub fn apply_worker_reply(&mut self, reply: WorkerReply) {
        match reply {
            WorkerReply::Reply(result) => {
                self.turns += 1;
                if result.riddle_asked {
                    self.riddle_active = true;
                } else if result.clear_riddle {
                    self.riddle_active = false;
                }
                self.voice.speak(&result.text);
                self.add_message(ChatItem::bot(result.text));
                if result.riddle_asked {
                    self.add_message(ChatItem::system(RIDDLE_HINT));
                }
                self.awaiting_reply = false;
                self.clear_status();
            }
            WorkerReply::Joke(text) | WorkerReply::Fact(text) => {
                self.voice.speak(&text);
                self.add_message(ChatItem::bot(text));
                self.awaiting_reply = false;
                self.clear_status();
            }
            WorkerReply::ContentAdded { kind, accepted } => {
                if accepted {
                    self.set_status(format!("Added to {}", kind.plural()));
                } else {
                    self.set_status("Nothing to add.");
                }
            }
            WorkerReply::Saved(path) => {
                self.add_message(ChatItem::system(format!(
                    "Transcript saved to {}.",
                    path.display()
                )));
                self.set_status(format!("Saved to {}", path.display()));
                if self.quit_after_save {
                    self.should_quit = true;
                }
            }
            WorkerReply::SaveFailed(error) => {
                self.set_status(format!("Save failed: {error}"));
                // Let the user see the error rather than quitting into it
                self.quit_after_save = false;
            }
        }
    }

    /// Echo a user line into the chat and hand it to the worker.
    pub fn send_chat_message(&mut self, line: String) {
        if line.trim().is_empty() {
            return;
        }

        self.add_message(ChatItem::user(line.clone()));
        self.awaiting_reply = true;
        self.set_status("Thinking...");

        if self.request_tx.try_send(WorkerRequest::Say(line)).is_err() {
            self.set_status("Worker busy, please wait...");
            self.awaiting_reply = false;
        }
    }

    /// Ask the worker for a random joke, bypassing the reply engine.
    pub fn request_joke(&mut self) {
        self.awaiting_reply = true;
        if self.request_tx.try_send(WorkerRequest::RandomJoke).is_err() {
            self.set_status("Worker busy, please wait...");
            self.awaiting_reply = false;
        }
    }

    /// Ask the worker for a random fact, bypassing the reply engine.
    pub fn request_fact(&mut self) {
        self.awaiting_reply = true;
        if self.request_tx.try_send(WorkerRequest::RandomFact).is_err() {
            self.set_status("Worker busy, please wait...");
            self.awaiting_reply = false;
        }
    }

    /// Add a chat entry, auto-scrolling while locked to the bottom.
    pub fn add_message(&mut self, item: ChatItem) {
        self.chat_history.push(item);
        if self.scroll_locked_to_bottom {
            self.scroll_to_bottom();
        }
    }

    /// Scroll the chat to the bottom and lock it there.
    pub fn scroll_to_bottom(&mut self) {
        // Set to max value - the widget caps it to the actual max scroll
        self.chat_scroll = usize::MAX / 2;
        self.scroll_locked_to_bottom = true;
    }

    /// Jump to the top and unlock from auto-scroll.
    pub fn scroll_to_top(&mut self) {
        self.chat_scroll = 0;
        self.scroll_locked_to_bottom = false;
    }

    /// Estimate max scroll from the chat content.
    /// Conservative estimate assuming ~60 char effective width.
    fn estimate_max_scroll(&self) -> usize {
        const ESTIMATED_WIDTH: usize = 60;
        const ESTIMATED_VISIBLE_HEIGHT: usize = 20;

        let estimated_lines: usize = self
            .chat_history
            .iter()
            .map(|item| {
                item.text
                    .lines()
                    .map(|line| (line.len() / ESTIMATED_WIDTH).max(1))
                    .sum::<usize>()
                    + 1 // blank line between entries
            })
            .sum();

        estimated_lines.saturating_sub(ESTIMATED_VISIBLE_HEIGHT)
    }

    /// Scroll up (unlocks from the bottom).
    pub fn scroll_up(&mut self, lines: usize) {
        let max_scroll = self.estimate_max_scroll();
        if self.chat_scroll > max_scroll {
            self.chat_scroll = max_scroll;
        }
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
        self.scroll_locked_to_bottom = false;
    }

    /// Scroll down. Does not re-lock to the bottom; G does that.
    pub fn scroll_down(&mut self, lines: usize) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines);
        let max_scroll = self.estimate_max_scroll();
        self.chat_scroll = self.chat_scroll.min(max_scroll + 100);
    }

    /// Enter command mode (starts with :)
    pub fn enter_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.input_buffer.clear();
        self.input_buffer.push(':');
        self.cursor_position = 1;
    }

    /// Exit to normal mode
    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        if self.input_buffer.starts_with(':') {
            self.input_buffer.clear();
            self.cursor_position = 0;
        }
    }

    /// Take the current input, pushing non-command lines into the history.
    pub fn submit_input(&mut self) -> Option<String> {
        if self.input_buffer.is_empty() {
            return None;
        }

        let input = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;

        if !input.starts_with(':') {
            self.input_history.push_front(input.clone());
            if self.input_history.len() > 100 {
                self.input_history.pop_back();
            }
        }
        self.history_index = None;
        self.saved_input = None;

        Some(input)
    }

    /// Insert a typed character at the cursor (unicode-safe).
    pub fn type_char(&mut self, c: char) {
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Delete the character before the cursor (unicode-safe).
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Delete the character under the cursor (unicode-safe).
    pub fn delete(&mut self) {
        let char_count = self.input_buffer.chars().count();
        if self.cursor_position < char_count {
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Recall the previous input from the history.
    pub fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }

        // Keep the current draft while browsing
        if self.history_index.is_none() && !self.input_buffer.is_empty() {
            self.saved_input = Some(self.input_buffer.clone());
        }

        let new_index = match self.history_index {
            None => Some(0),
            Some(i) if i + 1 < self.input_history.len() => Some(i + 1),
            Some(i) => Some(i),
        };

        if let Some(idx) = new_index {
            if let Some(entry) = self.input_history.get(idx) {
                self.input_buffer = entry.clone();
                self.cursor_position = self.input_buffer.chars().count();
                self.history_index = new_index;
            }
        }
    }

    /// Step back toward the newest input, restoring the saved draft last.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                self.input_buffer = self.saved_input.take().unwrap_or_default();
                self.cursor_position = self.input_buffer.chars().count();
                self.history_index = None;
            }
            Some(i) => {
                if let Some(entry) = self.input_history.get(i - 1) {
                    self.input_buffer = entry.clone();
                    self.cursor_position = self.input_buffer.chars().count();
                    self.history_index = Some(i - 1);
                }
            }
        }
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    /// Toggle the user-manual overlay.
    pub fn toggle_manual(&mut self) {
        if matches!(self.overlay, Some(Overlay::Manual)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Manual);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Process a colon command.
    pub fn process_command(&mut self, command: &str) {
        let cmd = command.trim_start_matches(':');
        let parts: Vec<&str> = cmd.split_whitespace().collect();

        let Some(&head) = parts.first() else {
            return;
        };

        match head {
            "q" | "quit" | "exit" => {
                self.should_quit = true;
            }
            "w" | "save" => {
                let path = parts.get(1).copied().unwrap_or(DEFAULT_TRANSCRIPT);
                self.set_status("Saving transcript...");
                self.send_request(WorkerRequest::SaveTranscript(PathBuf::from(path)));
            }
            "wq" => {
                self.set_status("Saving and quitting...");
                self.quit_after_save = true;
                self.send_request(WorkerRequest::SaveTranscript(PathBuf::from(
                    DEFAULT_TRANSCRIPT,
                )));
            }
            "theme" => match parts.get(1).and_then(|name| ChatTheme::by_name(name)) {
                Some(theme) => {
                    self.add_message(ChatItem::system(format!(
                        "Theme changed to {}.",
                        theme.name
                    )));
                    self.theme = theme;
                }
                None => {
                    self.set_status(format!("Themes: {}", THEME_NAMES.join(", ")));
                }
            },
            "clear" => {
                self.chat_history.clear();
                self.add_message(ChatItem::system(
                    "Screen cleared. Type anything to continue.",
                ));
                self.scroll_to_bottom();
            }
            "add-joke" => {
                let text = parts[1..].join(" ");
                if text.is_empty() {
                    self.set_status("Usage: :add-joke <text>");
                } else {
                    self.send_request(WorkerRequest::AddJoke(text));
                }
            }
            "add-fact" => {
                let text = parts[1..].join(" ");
                if text.is_empty() {
                    self.set_status("Usage: :add-fact <text>");
                } else {
                    self.send_request(WorkerRequest::AddFact(text));
                }
            }
            "joke" => self.request_joke(),
            "fact" => self.request_fact(),
            "voice" => match parts.get(1).copied() {
                Some("on") => {
                    if self.voice.configured() {
                        self.voice.set_enabled(true);
                        self.set_status("Voice on");
                    } else {
                        self.set_status("No speech command configured (set PARLOR_VOICE).");
                    }
                }
                Some("off") => {
                    self.voice.set_enabled(false);
                    self.set_status("Voice off");
                }
                _ => self.set_status("Usage: :voice on|off"),
            },
            "manual" => {
                self.toggle_manual();
            }
            "help" | "h" => {
                self.toggle_help();
            }
            other => {
                self.set_status(format!("Unknown command: {other}"));
            }
        }
    }

    /// Try to hand a request to the worker without blocking the draw loop.
    fn send_request(&mut self, request: WorkerRequest) {
        if self.request_tx.try_send(request).is_err() {
            self.set_status("Worker busy, please wait...");
        }
    }

    /// Tick for the thinking animation.
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Clear the input buffer
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
}
