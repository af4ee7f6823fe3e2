use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug)]
pub(super) enum ModalKind {
    ConfirmDelete { token: u64 },
}

#[derive(Debug)]
pub(super) struct Modal {
    pub(super) title: String,
    pub(super) lines: Vec<String>,
    pub(super) kind: ModalKind,
}

impl Modal {
    pub(super) fn confirm_delete(token: u64, todo_title: &str) -> Self {
        Modal {
            title: "Delete todo".to_string(),
            lines: vec![
                "Are you sure you want to delete this todo?".to_string(),
                String::new(),
                format!("  {}", todo_title),
            ],
            kind: ModalKind::ConfirmDelete { token },
        }
    }
}

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &Modal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 60);
    let h = (modal.lines.len() as u16 + 4).min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let box_area = ratatui::layout::Rect {
        x,
        y,
        width: w,
        height: h,
    };

    frame.render_widget(ratatui::widgets::Clear, box_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(modal.title.as_str());
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let mut lines: Vec<Line> = modal.lines.iter().map(|s| Line::from(s.as_str())).collect();
    match modal.kind {
        ModalKind::ConfirmDelete { .. } => {
            lines.push(Line::from(vec![
                Span::styled("y", Style::default().fg(Color::Yellow)),
                Span::raw(": delete   "),
                Span::styled("n", Style::default().fg(Color::Yellow)),
                Span::raw(": keep"),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub(super) fn handle_modal_key(app: &mut super::App, key: KeyEvent) {
    enum ModalAction {
        None,
        Confirm(u64),
        Cancel(u64),
    }

    let action = {
        let Some(m) = app.modal.as_ref() else {
            return;
        };
        match m.kind {
            ModalKind::ConfirmDelete { token } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    ModalAction::Confirm(token)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    ModalAction::Cancel(token)
                }
                _ => ModalAction::None,
            },
        }
    };

    match action {
        ModalAction::None => {}
        ModalAction::Confirm(token) => {
            app.modal = None;
            app.confirm_delete(token);
        }
        ModalAction::Cancel(token) => {
            app.modal = None;
            app.cancel_delete(token);
        }
    }
}
