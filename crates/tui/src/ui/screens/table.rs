use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, TableView},
    ui::{
        components::{
            card::Card,
            centered_rect,
            money::{plain_amount, styled_balance},
        },
        theme::Theme,
    },
};

const HEADERS: [&str; 4] = ["Name", "Balance", "Owes me", "I owe"];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, view: &TableView) {
    let theme = Theme::default();
    let card = Card::new("Balances", &theme);
    let inner = card.render_modal(frame, centered_rect(80, 70, area));

    if state.ledger.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from("Nobody here yet."),
            Line::from("Add a person from the main window."),
        ])
        .style(Style::default().fg(theme.dim))
        .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let header = Row::new(HEADERS.map(|title| {
        Cell::from(title).style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .bottom_margin(1);

    let rows = state.ledger.iter().map(|(name, record)| {
        Row::new(vec![
            Cell::from(name.to_string()),
            Cell::from(styled_balance(record.balance, &theme)),
            Cell::from(plain_amount(record.owed_to_user, &theme)),
            Cell::from(plain_amount(record.owed_by_user, &theme)),
        ])
    });

    let widths = [
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut table_state = TableState::default();
    table_state.select(Some(view.selected));
    frame.render_stateful_widget(table, inner, &mut table_state);
}
