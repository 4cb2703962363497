//! Render orchestration for the chat TUI.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, InputMode};
use crate::ui::layout::{centered_rect_fixed, ChatLayout};
use crate::ui::widgets::{HotkeyBarWidget, InputWidget, StatusBarWidget, TranscriptWidget};

/// Overlay types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Help,
    Manual,
}

/// Main render function.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Fill the frame so the theme background shows everywhere
    frame.render_widget(
        Block::default().style(app.theme.background_style()),
        area,
    );

    let layout = ChatLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    let thinking = app.awaiting_reply.then_some(app.animation_frame);
    let transcript_widget = TranscriptWidget::new(&app.chat_history, &app.theme)
        .scroll(app.chat_scroll)
        .focused(matches!(app.input_mode, InputMode::Normal))
        .thinking(thinking);
    frame.render_widget(transcript_widget, layout.chat_area);

    render_status_bar(frame, app, layout.status_area);

    frame.render_widget(
        HotkeyBarWidget::new(app.input_mode, &app.theme),
        layout.hotkey_area,
    );

    render_input(frame, app, layout.input_area);

    if let Some(overlay) = app.overlay() {
        match overlay {
            Overlay::Help => render_help_overlay(frame, app, area),
            Overlay::Manual => render_manual_overlay(frame, app, area),
        }
    }
}

/// Render the title bar.
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Parlor | chatting as {} ", app.user_name);
    let line = Line::from(Span::styled(title, app.theme.title_style()));
    frame.render_widget(
        Paragraph::new(line).style(app.theme.background_style()),
        area,
    );
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status_widget = StatusBarWidget::new(app.input_mode, &app.theme)
        .message(app.status_message())
        .riddle_active(app.riddle_active)
        .voice_on(app.voice.enabled())
        .turns(app.turns);
    frame.render_widget(status_widget, area);
}

/// Render the input area.
fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = matches!(app.input_mode, InputMode::Insert | InputMode::Command);
    let is_command = matches!(app.input_mode, InputMode::Command);

    let placeholder = if app.awaiting_reply {
        "Thinking..."
    } else {
        "Type a message (press 'i' to edit)..."
    };

    let input_widget = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .active(is_active)
        .command_mode(is_command)
        .placeholder(placeholder);

    frame.render_widget(input_widget, area);
}

/// Render the help overlay.
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(58, 28, area);
    frame.render_widget(Clear, popup_area);

    let section = Style::default().add_modifier(Modifier::UNDERLINED);
    let help_text = vec![
        Line::from(Span::styled(
            " Parlor - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Input Modes:", section)),
        Line::from("  i       Enter INSERT mode (type messages)"),
        Line::from("  :       Enter COMMAND mode"),
        Line::from("  Esc     Return to NORMAL mode"),
        Line::from(""),
        Line::from(Span::styled("Navigation (NORMAL mode):", section)),
        Line::from("  j/k or ↑/↓     Scroll up/down"),
        Line::from("  Ctrl+u/d       Scroll by half page"),
        Line::from("  g/G            Jump to top/bottom"),
        Line::from("  Mouse wheel    Scroll chat"),
        Line::from(""),
        Line::from(Span::styled("Shortcuts (NORMAL mode):", section)),
        Line::from("  J       Random joke"),
        Line::from("  F       Random fact"),
        Line::from("  R       Ask for a riddle"),
        Line::from("  q       Quit"),
        Line::from(""),
        Line::from(Span::styled("Commands:", section)),
        Line::from("  :w [file]          Save the transcript"),
        Line::from("  :theme <name>      dark, light, or blue"),
        Line::from("  :add-joke <text>   Add a joke"),
        Line::from("  :add-fact <text>   Add a fact"),
        Line::from("  :voice on|off      Toggle speech"),
        Line::from("  :clear  :manual  :q"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true))
        .style(app.theme.chat_style());

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

/// Render the user-manual overlay.
fn render_manual_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(64, 20, area);
    frame.render_widget(Clear, popup_area);

    let manual_text = vec![
        Line::from(Span::styled(
            " Parlor - User Manual ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Basic usage:"),
        Line::from("- Type common greetings like 'hello', 'how are you', 'bye'."),
        Line::from("- Type 'riddles' (or press R) to get a riddle."),
        Line::from("- Answer the riddle directly in the input box. Type 'skip'"),
        Line::from("  to see the answer."),
        Line::from("- Press J for a random joke, F for a random fact."),
        Line::from("- Use ':add-joke <text>' and ':add-fact <text>' to append"),
        Line::from("  new entries for jokes and facts."),
        Line::from(""),
        Line::from("- ':theme dark|light|blue' switches the colors."),
        Line::from("- ':voice on|off' toggles text-to-speech (set PARLOR_VOICE"),
        Line::from("  to a speech command such as espeak)."),
        Line::from("- ':w [file]' saves the transcript, ':clear' clears the"),
        Line::from("  screen, ':q' exits."),
        Line::from(""),
        Line::from("- Have fun!"),
    ];

    let block = Block::default()
        .title(" User Manual ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true))
        .style(app.theme.chat_style());

    let paragraph = Paragraph::new(manual_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
