//! Screen layout calculation.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The full-screen chat layout, top to bottom.
pub struct ChatLayout {
    pub title_area: Rect,
    pub chat_area: Rect,
    pub status_area: Rect,
    pub hotkey_area: Rect,
    pub input_area: Rect,
}

impl ChatLayout {
    pub fn calculate(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title bar
                Constraint::Min(5),    // chat transcript
                Constraint::Length(3), // status bar
                Constraint::Length(1), // hotkey hints
                Constraint::Length(3), // input line
            ])
            .split(area);

        Self {
            title_area: chunks[0],
            chat_area: chunks[1],
            status_area: chunks[2],
            hotkey_area: chunks[3],
            input_area: chunks[4],
        }
    }
}

/// A fixed-size centered rectangle, clamped to `area`.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_area() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = ChatLayout::calculate(area);
        let total: u16 = layout.title_area.height
            + layout.chat_area.height
            + layout.status_area.height
            + layout.hotkey_area.height
            + layout.input_area.height;
        assert_eq!(total, area.height);
        assert!(layout.chat_area.height >= 5);
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(60, 20, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
    }
}
