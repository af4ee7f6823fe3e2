use time::macros::format_description;

use super::*;

pub(in crate::tui_shell) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(header_lines(&app.state)), chunks[0]);
    frame.render_widget(Paragraph::new(stats_line(&app.state)), chunks[1]);
    frame.render_widget(Paragraph::new(filter_line(app.state.filter())), chunks[2]);

    app.draft
        .render(frame, chunks[3], app.focus == Focus::Form && app.modal.is_none());

    let ctx = RenderCtx {
        state: &app.state,
        focused: app.focus == Focus::List,
    };
    app.list.render(frame, chunks[4], &ctx);

    if let Some(notice) = app.state.notice() {
        let color = match notice.kind {
            NoticeKind::Validation => Color::Yellow,
            NoticeKind::Error => Color::Red,
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                notice.text.as_str(),
                Style::default().fg(color),
            ))),
            chunks[5],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hint_line(app.focus),
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[6],
    );

    if let Some(m) = &app.modal {
        modal::draw_modal(frame, m);
    }
}

fn header_lines(state: &TodoState) -> Vec<Line<'static>> {
    let synced = state
        .synced_at()
        .and_then(|t| t.format(format_description!("[hour]:[minute]:[second]")).ok());
    let status = match (state.phase(), synced) {
        (Phase::Requesting, _) => "saving...".to_string(),
        (Phase::Reloading, _) => "loading...".to_string(),
        (Phase::Idle, Some(t)) => format!("synced {} UTC", t),
        (Phase::Idle, None) => "not synced".to_string(),
    };
    vec![
        Line::from(vec![
            Span::styled(
                "📝 Todo App",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(status, Style::default().fg(Color::Gray)),
        ]),
        Line::from(Span::styled(
            "Organize what you need to do today",
            Style::default().fg(Color::Gray),
        )),
    ]
}

fn stats_line(state: &TodoState) -> Line<'static> {
    let stats = state.stats();
    let num = Style::default().add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(stats.total.to_string(), num),
        Span::raw(" total   "),
        Span::styled(stats.active.to_string(), num.fg(Color::Yellow)),
        Span::raw(" active   "),
        Span::styled(stats.completed.to_string(), num.fg(Color::Green)),
        Span::raw(" completed"),
    ])
}

fn filter_line(current: Filter) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, f) in Filter::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if f == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, f.label()), style));
    }
    Line::from(spans)
}

fn hint_line(focus: Focus) -> &'static str {
    match focus {
        Focus::Form => "Enter add  Tab list  F5 refresh  Ctrl-C quit",
        Focus::List => {
            "Space toggle  d delete  1/2/3 filter  r refresh  Tab form  x dismiss  q quit"
        }
    }
}
