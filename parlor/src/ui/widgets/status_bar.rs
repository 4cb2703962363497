//! Status and hotkey bars.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::InputMode;
use crate::ui::theme::ChatTheme;

/// Bottom status bar: input mode, session info, transient message.
pub struct StatusBarWidget<'a> {
    input_mode: InputMode,
    theme: &'a ChatTheme,
    message: Option<&'a str>,
    riddle_active: bool,
    voice_on: bool,
    turns: u64,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(input_mode: InputMode, theme: &'a ChatTheme) -> Self {
        Self {
            input_mode,
            theme,
            message: None,
            riddle_active: false,
            voice_on: false,
            turns: 0,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    pub fn riddle_active(mut self, active: bool) -> Self {
        self.riddle_active = active;
        self
    }

    pub fn voice_on(mut self, on: bool) -> Self {
        self.voice_on = on;
        self
    }

    pub fn turns(mut self, turns: u64) -> Self {
        self.turns = turns;
        self
    }

    fn mode_tag(&self) -> &'static str {
        match self.input_mode {
            InputMode::Normal => " NORMAL ",
            InputMode::Insert => " INSERT ",
            InputMode::Command => " COMMAND ",
        }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(self.mode_tag(), self.theme.mode_style()),
            Span::styled(
                format!(" turns: {}", self.turns),
                self.theme.system_style(),
            ),
        ];

        if self.riddle_active {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                "riddle active",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            if self.voice_on { "voice on" } else { "voice off" },
            self.theme.system_style(),
        ));

        if let Some(message) = self.message {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                message.to_string(),
                Style::default().fg(self.theme.accent),
            ));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false))
            .style(self.theme.background_style());

        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}

/// One-line hint bar showing the keys available in the current mode.
pub struct HotkeyBarWidget<'a> {
    input_mode: InputMode,
    theme: &'a ChatTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(input_mode: InputMode, theme: &'a ChatTheme) -> Self {
        Self { input_mode, theme }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hints = match self.input_mode {
            InputMode::Normal => {
                " i insert  : command  J joke  F fact  R riddle  j/k scroll  ? help  q quit"
            }
            InputMode::Insert => " Enter send  Esc normal  ↑/↓ history",
            InputMode::Command => " Enter run  Esc cancel",
        };

        let line = Line::from(Span::styled(
            hints,
            self.theme.system_style(),
        ));

        Paragraph::new(line)
            .style(self.theme.background_style())
            .render(area, buf);
    }
}
