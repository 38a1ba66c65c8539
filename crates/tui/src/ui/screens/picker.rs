use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, ListState},
};

use crate::{
    app::PickerState,
    ui::{
        components::{card::Card, centered_box},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, picker: &PickerState, focused: bool) {
    let theme = Theme::default();
    let card = Card::new("Who moved money?", &theme);
    let height = dialog_height(picker.names.len());
    let inner = card.render_modal(frame, centered_box(34, height, area));

    let items = picker
        .names
        .iter()
        .map(|name| ListItem::new(name.as_str()).style(Style::default().fg(theme.text)))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(picker.selected));
    }

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, inner, &mut list_state);
}

/// Borders plus one line per name, capped at 16 rows.
fn dialog_height(names: usize) -> u16 {
    u16::try_from(names)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_grows_with_names_up_to_the_cap() {
        assert_eq!(dialog_height(0), 2);
        assert_eq!(dialog_height(3), 5);
        assert_eq!(dialog_height(14), 16);
        assert_eq!(dialog_height(500), 16);
    }

    #[test]
    fn height_stays_capped_past_u16_range() {
        assert_eq!(dialog_height(65_536), 16);
        assert_eq!(dialog_height(65_537), 16);
    }
}
