//! Color themes for the chat TUI.
//!
//! Three selectable themes (dark, light, blue), switched at runtime with
//! `:theme <name>`.

use ratatui::style::{Color, Modifier, Style};

/// Names accepted by `:theme`, in display order.
pub const THEME_NAMES: [&str; 3] = ["dark", "light", "blue"];

/// Chat UI color theme.
#[derive(Debug, Clone)]
pub struct ChatTheme {
    pub name: &'static str,

    // Surfaces
    pub background: Color,
    pub chat_bg: Color,
    pub entry_bg: Color,

    // Text
    pub chat_fg: Color,
    pub user_text: Color,
    pub system_text: Color,

    // Chrome
    pub border: Color,
    pub border_focused: Color,
    pub accent: Color,
}

impl Default for ChatTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ChatTheme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::Rgb(0x0f, 0x17, 0x2a),
            chat_bg: Color::Rgb(0x09, 0x10, 0x27),
            entry_bg: Color::Rgb(0x06, 0x10, 0x26),
            chat_fg: Color::Rgb(0xdb, 0xea, 0xfe),
            user_text: Color::Cyan,
            system_text: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            accent: Color::LightBlue,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::Rgb(0xf3, 0xf4, 0xf6),
            chat_bg: Color::Rgb(0xff, 0xff, 0xff),
            entry_bg: Color::Rgb(0xf8, 0xfa, 0xfc),
            chat_fg: Color::Rgb(0x0b, 0x12, 0x20),
            user_text: Color::Blue,
            system_text: Color::DarkGray,
            border: Color::Gray,
            border_focused: Color::Blue,
            accent: Color::Blue,
        }
    }

    pub fn blue() -> Self {
        Self {
            name: "blue",
            background: Color::Rgb(0xe6, 0xf0, 0xff),
            chat_bg: Color::Rgb(0xf0, 0xf8, 0xff),
            entry_bg: Color::Rgb(0xe9, 0xf3, 0xff),
            chat_fg: Color::Rgb(0x05, 0x20, 0x4a),
            user_text: Color::Rgb(0x0d, 0x47, 0xa1),
            system_text: Color::DarkGray,
            border: Color::Rgb(0xcf, 0xe4, 0xff),
            border_focused: Color::Blue,
            accent: Color::Blue,
        }
    }

    /// Look a theme up by its `:theme` name, case-insensitively.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "blue" => Some(Self::blue()),
            _ => None,
        }
    }

    /// Style for the user's own messages.
    pub fn user_style(&self) -> Style {
        Style::default()
            .fg(self.user_text)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for bot replies.
    pub fn bot_style(&self) -> Style {
        Style::default().fg(self.chat_fg)
    }

    /// Style for system lines (hints, screen notices).
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Border style for a panel.
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Style for the title bar text.
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Background fill for the whole frame.
    pub fn background_style(&self) -> Style {
        Style::default().bg(self.background)
    }

    /// Background fill for the chat panel interior.
    pub fn chat_style(&self) -> Style {
        Style::default().bg(self.chat_bg)
    }

    /// Background fill for the input line.
    pub fn entry_style(&self) -> Style {
        Style::default().bg(self.entry_bg)
    }

    /// Style for the mode tag in the status bar.
    pub fn mode_style(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_theme_resolves() {
        for name in THEME_NAMES {
            let theme = ChatTheme::by_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn test_lookup_ignores_case_and_whitespace() {
        assert!(ChatTheme::by_name(" Dark ").is_some());
        assert!(ChatTheme::by_name("BLUE").is_some());
        assert!(ChatTheme::by_name("solarized").is_none());
    }
}
