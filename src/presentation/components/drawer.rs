use ratatui::{prelude::*, widgets::*};
use strum::IntoEnumIterator;

use crate::{
    core::state::{ui::DRAWER_ITEMS, AppState},
    domain::navigation::Section,
};

const WIDTH: u16 = 24;

/// Side menu over the Shop sections with a trailing logout entry
#[derive(Debug, Default)]
pub struct DrawerComponent;

impl DrawerComponent {
    pub fn labels() -> Vec<String> {
        Section::iter()
            .map(|section| section.to_string())
            .chain(["Logout".to_string()])
            .collect()
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let styles = &state.config.config.styles;
        let active = state.nav.drawer().map(|drawer| drawer.active);
        let area = Rect {
            width: WIDTH.min(area.width),
            ..area
        };

        let items: Vec<ListItem> = Self::labels()
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let is_active = Section::iter().nth(i).is_some_and(|s| Some(s) == active);
                let marker = if is_active { "● " } else { "  " };
                let style = if is_active {
                    styles.get_style("drawer_active")
                } else {
                    Style::default()
                };
                ListItem::new(Span::styled(format!("{marker}{label}"), style))
            })
            .collect();
        debug_assert_eq!(items.len(), DRAWER_ITEMS);

        let mut list_state = ListState::default().with_selected(Some(state.ui.drawer_cursor));
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Menu")
                    .border_style(styles.get_style("primary")),
            )
            .highlight_style(styles.get_style("selected"))
            .highlight_symbol("> ");

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::presentation::components::test_support::{demo_products, Harness};

    #[test]
    fn test_labels_end_with_logout() {
        assert_eq!(
            DrawerComponent::labels(),
            vec!["Products", "Orders", "Admin", "Logout"]
        );
    }

    #[test]
    fn test_drawer_marks_active_section() {
        let mut harness = Harness::signed_in(demo_products());
        harness.key(KeyCode::Char('m'));
        let lines = harness.render(60, 20);
        assert!(lines.iter().any(|l| l.contains("> ● Products")));
        assert!(lines.iter().any(|l| l.contains("Logout")));
    }
}
