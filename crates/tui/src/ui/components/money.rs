use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// Formats an amount with two decimals.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Creates a styled span for a balance with semantic coloring.
///
/// - Positive: green, the person owes the user
/// - Negative: red, the user owes the person
/// - Zero (as displayed): neutral text color
#[must_use]
pub fn styled_balance(amount: f64, theme: &Theme) -> Span<'static> {
    let formatted = format_amount(amount);
    let color = if amount >= 0.005 {
        theme.positive
    } else if amount <= -0.005 {
        theme.negative
    } else {
        theme.text
    };

    Span::styled(formatted, Style::default().fg(color))
}

/// Creates a span for a running total, which carries no sign meaning.
#[must_use]
pub fn plain_amount(amount: f64, theme: &Theme) -> Span<'static> {
    Span::styled(format_amount(amount), Style::default().fg(theme.text))
}
