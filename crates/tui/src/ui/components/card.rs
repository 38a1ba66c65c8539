use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Clear},
};

use crate::ui::theme::Theme;

/// Rounded, titled frame shared by the main window and every dialog.
pub struct Card<'a> {
    title: &'a str,
    theme: &'a Theme,
    invalid: bool,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            theme,
            invalid: false,
        }
    }

    /// Paint the border in the error color.
    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let border_color = if self.invalid {
            self.theme.error
        } else {
            self.theme.border
        };

        Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.theme.accent),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
    }

    /// Clears `area`, draws the frame and returns the inner area. Dialogs use
    /// this so nothing underneath shows through.
    pub fn render_modal(&self, frame: &mut Frame<'_>, area: Rect) -> Rect {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);
        inner
    }
}
