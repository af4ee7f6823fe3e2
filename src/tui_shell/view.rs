use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use crate::sync::TodoState;

#[derive(Clone, Copy)]
pub(super) struct RenderCtx<'a> {
    pub(super) state: &'a TodoState,
    pub(super) focused: bool,
}

pub(super) trait View {
    fn title(&self) -> &str;

    fn move_up(&mut self) {}
    fn move_down(&mut self, _len: usize) {}

    fn render(&self, frame: &mut ratatui::Frame, area: Rect, ctx: &RenderCtx<'_>);
}

pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    detail: &str,
    focused: bool,
    area: Rect,
) -> Rect {
    let header = Line::from(vec![
        Span::styled(title.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(detail.to_string(), Style::default().fg(Color::Gray)),
    ]);
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(header);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}
