use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::NewTodo;
use crate::sync::EMPTY_TITLE_NOTICE;

use super::input::Input;

const PLACEHOLDER: &str = "What needs to be done?";

/// New-todo form: holds the draft until it is submitted.
#[derive(Debug, Default)]
pub(super) struct DraftForm {
    pub(super) input: Input,
    pub(super) error: Option<String>,
}

impl DraftForm {
    /// Empty-after-trim drafts are rejected and kept for editing.
    pub(super) fn submit(&mut self) -> Option<NewTodo> {
        if self.input.is_blank() {
            self.error = Some(EMPTY_TITLE_NOTICE.to_string());
            return None;
        }
        let draft = NewTodo::titled(self.input.buf.trim());
        self.input.clear();
        self.error = None;
        Some(draft)
    }

    pub(super) fn edited(&mut self) {
        self.error = None;
    }

    pub(super) fn render(&self, frame: &mut ratatui::Frame, area: Rect, focused: bool) {
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = match &self.error {
            Some(err) => Line::from(vec![
                Span::raw("New todo  "),
                Span::styled(err.as_str(), Style::default().fg(Color::Red)),
            ]),
            None => Line::from("New todo  (Enter: add)"),
        };
        let body = if self.input.buf.is_empty() && !focused {
            Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(self.input.buf.as_str())
        };
        let (scroll, col) = visible_window(self.input.cursor_col(), area.width.saturating_sub(2));
        frame.render_widget(
            Paragraph::new(body).scroll((0, scroll)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(title),
            ),
            area,
        );
        if focused {
            frame.set_cursor_position((area.x + 1 + col, area.y + 1));
        }
    }
}

/// Horizontal scroll offset and on-screen cursor column for a cursor at
/// `cursor_col` in a field `width` columns wide. The cursor stays inside.
fn visible_window(cursor_col: u16, width: u16) -> (u16, u16) {
    if width == 0 {
        return (0, 0);
    }
    let scroll = cursor_col.saturating_add(1).saturating_sub(width);
    (scroll, cursor_col - scroll)
}

#[cfg(test)]
#[path = "../tests/tui_shell/draft_tests.rs"]
mod tests;
