//! Chat transcript display widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
        StatefulWidget, Widget, Wrap,
    },
};

use crate::ui::theme::ChatTheme;

/// Who a displayed chat line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    User,
    Bot,
    System,
}

/// A single entry in the chat display.
#[derive(Debug, Clone)]
pub struct ChatItem {
    pub text: String,
    pub kind: ChatKind,
}

impl ChatItem {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ChatKind::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ChatKind::Bot,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ChatKind::System,
        }
    }
}

/// Widget rendering the chat history with a scrollbar.
pub struct TranscriptWidget<'a> {
    items: &'a [ChatItem],
    scroll: usize,
    theme: &'a ChatTheme,
    focused: bool,
    /// Animation frame while a reply is pending; `None` when idle.
    thinking_frame: Option<u8>,
}

impl<'a> TranscriptWidget<'a> {
    pub fn new(items: &'a [ChatItem], theme: &'a ChatTheme) -> Self {
        Self {
            items,
            scroll: 0,
            theme,
            focused: false,
            thinking_frame: None,
        }
    }

    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn thinking(mut self, frame: Option<u8>) -> Self {
        self.thinking_frame = frame;
        self
    }

    fn style_for_kind(&self, kind: ChatKind) -> Style {
        match kind {
            ChatKind::User => self.theme.user_style(),
            ChatKind::Bot => self.theme.bot_style(),
            ChatKind::System => self.theme.system_style(),
        }
    }
}

impl Widget for TranscriptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.focused {
            " Chat [j/k scroll] "
        } else {
            " Chat "
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused))
            .style(self.theme.chat_style());

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();

        for item in self.items {
            let style = self.style_for_kind(item.kind);

            let prefix = match item.kind {
                ChatKind::User => "> ",
                ChatKind::System => "[ ",
                ChatKind::Bot => "",
            };
            let suffix = match item.kind {
                ChatKind::System => " ]",
                _ => "",
            };

            let text = format!("{}{}{}", prefix, item.text, suffix);
            for line in text.lines() {
                lines.push(Line::from(Span::styled(line.to_string(), style)));
            }

            // Blank line between entries
            lines.push(Line::from(""));
        }

        if let Some(frame) = self.thinking_frame {
            let dots = ".".repeat(((frame / 3) % 4) as usize);
            let style = self.theme.bot_style().add_modifier(Modifier::DIM);
            lines.push(Line::from(Span::styled(
                format!("Parlor is thinking{dots}"),
                style,
            )));
        }

        let visible_height = inner.height as usize;
        let total_lines = lines.len();
        let max_scroll = total_lines.saturating_sub(visible_height);
        let scroll = self.scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .wrap(Wrap { trim: false });
        paragraph.render(inner, buf);

        if total_lines > visible_height {
            let scrollbar_area = Rect {
                x: inner.x + inner.width.saturating_sub(1),
                y: inner.y,
                width: 1,
                height: inner.height,
            };

            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .thumb_style(Style::default().fg(Color::DarkGray))
                .track_style(Style::default().fg(Color::Black))
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);

            // Hint rows for content above/below the viewport
            let hint_style = Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM);

            if scroll > 0 {
                let hint = format!(" ↑{scroll} ");
                for (i, ch) in hint.chars().enumerate() {
                    let x = inner.x + (i as u16);
                    if x < inner.x + inner.width.saturating_sub(2) {
                        buf[(x, inner.y)].set_char(ch).set_style(hint_style);
                    }
                }
            }

            if scroll < max_scroll {
                let remaining = max_scroll - scroll;
                let hint = format!(" ↓{remaining} more ");
                let hint_y = inner.y + inner.height.saturating_sub(1);
                for (i, ch) in hint.chars().enumerate() {
                    let x = inner.x + (i as u16);
                    if x < inner.x + inner.width.saturating_sub(2) {
                        buf[(x, hint_y)].set_char(ch).set_style(hint_style);
                    }
                }
            }
        }
    }
}
