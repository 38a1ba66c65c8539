pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Dialog};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main window and dialogs
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    screens::home::render(frame, layout[0], state);

    // Dialogs are drawn bottom to top so the active one ends up in front.
    let depth = state.dialogs.len();
    for (idx, dialog) in state.dialogs.iter().enumerate() {
        let focused = idx + 1 == depth;
        match dialog {
            Dialog::ManagePerson(form) => screens::manage::render(frame, layout[0], form),
            Dialog::Table(view) => screens::table::render(frame, layout[0], state, view),
            Dialog::PickPerson(picker) => {
                screens::picker::render(frame, layout[0], picker, focused)
            }
            Dialog::Adjust(form) => screens::adjust::render(frame, layout[0], form),
        }
    }

    render_bottom_bar(frame, layout[1], state, &theme);
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = context_hints(state, theme);

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("Ctrl+C", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

/// Returns keyboard hints for whatever currently owns the keyboard.
fn context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));
    match state.dialogs.last() {
        None => vec![
            key("↑/↓"),
            Span::raw(" move  "),
            key("Enter"),
            Span::raw(" open  "),
            key("q"),
            Span::raw(" save & quit"),
        ],
        Some(Dialog::ManagePerson(_)) => vec![
            key("Enter"),
            Span::raw(" submit  "),
            key("Esc"),
            Span::raw(" cancel"),
        ],
        Some(Dialog::Table(_)) => vec![
            key("↑/↓"),
            Span::raw(" scroll  "),
            key("Esc"),
            Span::raw(" close"),
        ],
        Some(Dialog::PickPerson(_)) => vec![
            key("↑/↓"),
            Span::raw(" select  "),
            key("Enter"),
            Span::raw(" choose  "),
            key("Esc"),
            Span::raw(" cancel"),
        ],
        Some(Dialog::Adjust(_)) => vec![
            key("←/→"),
            Span::raw(" owes me / I owe  "),
            key("Enter"),
            Span::raw(" apply  "),
            key("Esc"),
            Span::raw(" back"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use ledger::{Direction as Action, Ledger};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::{AdjustForm, PickerState, TableView};

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state_with_alex() -> AppState {
        let mut ledger = Ledger::new();
        ledger.toggle("Alex").unwrap();
        ledger.adjust("Alex", 5.0, Action::CreditToUser).unwrap();
        AppState::new(ledger, "balances.csv")
    }

    #[test]
    fn main_window_lists_the_three_actions() {
        let screen = draw(&AppState::new(Ledger::new(), "balances.csv"));
        assert!(screen.contains("Manage people"));
        assert!(screen.contains("Show table"));
        assert!(screen.contains("Change balance"));
    }

    #[test]
    fn table_shows_two_decimals() {
        let mut state = state_with_alex();
        state.dialogs.push(Dialog::Table(TableView::default()));
        let screen = draw(&state);
        assert!(screen.contains("Alex"));
        assert!(screen.contains("5.00"));
        assert!(screen.contains("0.00"));
    }

    #[test]
    fn empty_table_shows_placeholder() {
        let mut state = AppState::new(Ledger::new(), "balances.csv");
        state.dialogs.push(Dialog::Table(TableView::default()));
        assert!(draw(&state).contains("Nobody here yet."));
    }

    #[test]
    fn adjust_dialog_sits_on_top_of_picker() {
        let mut state = state_with_alex();
        state.dialogs.push(Dialog::PickPerson(PickerState {
            names: state.ledger.names(),
            selected: 0,
        }));
        state.dialogs.push(Dialog::Adjust(AdjustForm {
            name: "Alex".to_string(),
            amount: "abc".to_string(),
            action: Action::CreditToUser,
            error: Some("Invalid amount".to_string()),
        }));
        let screen = draw(&state);
        assert!(screen.contains("Update: Alex"));
        assert!(screen.contains("Invalid amount"));
        assert!(screen.contains("Owes me (+)"));
    }
}
