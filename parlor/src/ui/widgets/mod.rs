//! TUI widgets for the chat interface.

pub mod input;
pub mod status_bar;
pub mod transcript;

pub use input::InputWidget;
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
pub use transcript::{ChatItem, ChatKind, TranscriptWidget};
