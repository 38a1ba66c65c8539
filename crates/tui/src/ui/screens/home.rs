use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, MenuItem},
    ui::{
        components::{
            card::Card,
            centered_box,
            money::{plain_amount, styled_balance},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card = Card::new("Debt tracker", &theme);
    let card_area = centered_box(44, 11, area);
    let inner = card.render_modal(frame, card_area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Summary
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Menu
        ])
        .margin(1)
        .split(inner);

    render_summary(frame, layout[0], state, &theme);
    render_menu(frame, layout[2], state, &theme);
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let (owed_to_me, i_owe) = state
        .ledger
        .iter()
        .fold((0.0, 0.0), |(plus, minus), (_, record)| {
            if record.balance >= 0.0 {
                (plus + record.balance, minus)
            } else {
                (plus, minus - record.balance)
            }
        });

    let lines = vec![
        Line::from(vec![
            Span::styled("People", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}", state.ledger.len())),
        ]),
        Line::from(vec![
            Span::styled("Owed to me", Style::default().fg(theme.dim)),
            Span::raw(": "),
            styled_balance(owed_to_me, theme),
            Span::raw("  "),
            Span::styled("I owe", Style::default().fg(theme.dim)),
            Span::raw(": "),
            plain_amount(i_owe, theme),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_menu(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items = MenuItem::ALL
        .iter()
        .map(|item| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", item.hotkey()), Style::default().fg(theme.accent)),
                Span::styled(item.label(), Style::default().fg(theme.text)),
            ]))
        })
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    // Keep the highlight off while a dialog owns the keyboard.
    if state.dialogs.is_empty() {
        list_state.select(Some(state.menu_selected));
    }

    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}
