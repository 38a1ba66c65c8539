use ledger::Direction as Action;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AdjustForm,
    ui::{
        components::{card::Card, centered_box},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, form: &AdjustForm) {
    let theme = Theme::default();
    let title = format!("Update: {}", form.name);
    let card = Card::new(&title, &theme).invalid(form.error.is_some());
    let inner = card.render_modal(frame, centered_box(44, 10, area));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Actions
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hint or error
        ])
        .margin(1)
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Amount (e.g. 10.50)",
            Style::default().fg(theme.dim),
        )),
        rows[0],
    );

    let amount_color = if form.error.is_some() {
        theme.error
    } else {
        theme.accent
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("{}│", form.amount),
            Style::default().fg(amount_color),
        )),
        rows[1],
    );

    let actions = Line::from(vec![
        action_button(
            "Owes me (+)",
            theme.positive,
            form.action == Action::CreditToUser,
        ),
        Span::raw("   "),
        action_button(
            "I owe (-)",
            theme.negative,
            form.action == Action::DebtFromUser,
        ),
    ]);
    frame.render_widget(
        Paragraph::new(actions).alignment(Alignment::Center),
        rows[3],
    );

    let footer = match form.error.as_deref() {
        Some(err) => Line::from(Span::styled(err, Style::default().fg(theme.error))),
        None => Line::from(Span::styled(
            "←/→: choose • Enter: apply • Esc: back",
            Style::default().fg(theme.dim),
        )),
    };
    frame.render_widget(Paragraph::new(footer), rows[5]);
}

fn action_button(label: &str, color: Color, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color)
    };
    Span::styled(format!(" {label} "), style)
}
