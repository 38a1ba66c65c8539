use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::NameForm,
    ui::{
        components::{card::Card, centered_box},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, form: &NameForm) {
    let theme = Theme::default();
    let card = Card::new("Add / remove person", &theme).invalid(form.error.is_some());
    let inner = card.render_modal(frame, centered_box(40, 8, area));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(1), // Input
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hint or error
        ])
        .margin(1)
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled("Name", Style::default().fg(theme.dim))),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{}│", form.name),
            Style::default().fg(theme.accent),
        )),
        rows[1],
    );

    let footer = match form.error.as_deref() {
        Some(err) => Line::from(Span::styled(err, Style::default().fg(theme.error))),
        None => Line::from(Span::styled(
            "Enter: add or remove • Esc: cancel",
            Style::default().fg(theme.dim),
        )),
    };
    frame.render_widget(Paragraph::new(footer), rows[3]);
}
