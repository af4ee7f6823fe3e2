use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};

use crate::model::{TodoId, TodoItem};

use super::super::view::{RenderCtx, View, render_view_chrome};

pub(in crate::tui_shell) const EMPTY_PLACEHOLDER: &str = "No todos yet. Add one above!";

/// Identity of a rendered row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum RowKey {
    Id(TodoId),
    Index(usize),
}

/// Rows key on the todo id; the position is only used when the id is blank.
pub(in crate::tui_shell) fn row_key(index: usize, item: &TodoItem) -> RowKey {
    if item.id.is_blank() {
        RowKey::Index(index)
    } else {
        RowKey::Id(item.id.clone())
    }
}

#[derive(Debug, Default)]
pub(in crate::tui_shell) struct TodoListView {
    pub(in crate::tui_shell) selected: usize,
    selected_key: Option<RowKey>,
}

impl TodoListView {
    /// Keeps the selection on the same row across snapshot changes, falling
    /// back to the nearest position when that row disappeared.
    pub(in crate::tui_shell) fn sync_selection(&mut self, items: &[&TodoItem]) {
        if items.is_empty() {
            self.selected = 0;
            self.selected_key = None;
            return;
        }
        if let Some(key) = &self.selected_key {
            if let Some(pos) = items
                .iter()
                .enumerate()
                .position(|(i, t)| &row_key(i, t) == key)
            {
                self.selected = pos;
            }
        }
        self.selected = self.selected.min(items.len() - 1);
        self.selected_key = Some(row_key(self.selected, items[self.selected]));
    }

    pub(in crate::tui_shell) fn selected_id(&self, items: &[&TodoItem]) -> Option<TodoId> {
        items.get(self.selected).map(|t| t.id.clone())
    }
}

impl View for TodoListView {
    fn title(&self) -> &str {
        "Todos"
    }

    fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.selected_key = None;
    }

    fn move_down(&mut self, len: usize) {
        self.selected = (self.selected + 1).min(len.saturating_sub(1));
        self.selected_key = None;
    }

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx<'_>) {
        let items = ctx.state.visible_items();
        let filter = ctx.state.filter();
        let detail = format!("{} shown ({})", items.len(), filter);
        let inner = render_view_chrome(frame, self.title(), &detail, ctx.focused, area);

        if items.is_empty() {
            let text = if ctx.state.items().is_empty() {
                EMPTY_PLACEHOLDER.to_string()
            } else {
                format!("No {} todos.", filter)
            };
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(text, Style::default().fg(Color::Gray))),
            ];
            frame.render_widget(
                Paragraph::new(lines)
                    .alignment(ratatui::layout::Alignment::Center)
                    .wrap(Wrap { trim: true }),
                inner,
            );
            return;
        }

        let rows: Vec<ListItem> = items
            .iter()
            .map(|t| {
                let (mark, style) = if t.completed {
                    (
                        "[x] ",
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                    )
                } else {
                    ("[ ] ", Style::default())
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, Style::default().fg(Color::Green)),
                    Span::styled(t.title.clone(), style),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        if ctx.focused {
            state.select(Some(self.selected.min(items.len() - 1)));
        }
        let list = List::new(rows).highlight_style(Style::default().bg(Color::DarkGray));
        frame.render_stateful_widget(list, inner, &mut state);
    }
}

#[cfg(test)]
#[path = "../../tests/tui_shell/views/todos_tests.rs"]
mod tests;
