use ratatui::{prelude::*, widgets::*};

use crate::{core::state::AppState, presentation::config::keybindings::Action};

const ENTRIES: &[(Action, &str)] = &[
    (Action::ScrollUp, "Move up"),
    (Action::ScrollDown, "Move down"),
    (Action::ScrollToTop, "Go to top"),
    (Action::ScrollToBottom, "Go to bottom"),
    (Action::Select, "Open / expand"),
    (Action::Back, "Go back"),
    (Action::ToggleDrawer, "Toggle menu"),
    (Action::AddToCart, "Add to cart"),
    (Action::OpenCart, "Open cart"),
    (Action::RemoveFromCart, "Remove one from cart"),
    (Action::OrderNow, "Order now"),
    (Action::Refresh, "Reload"),
    (Action::NewProduct, "Add product"),
    (Action::EditProduct, "Edit product"),
    (Action::DeleteProduct, "Delete product"),
    (Action::Logout, "Logout"),
    (Action::Suspend, "Suspend"),
    (Action::Quit, "Quit"),
];

const FORM_ENTRIES: &[(&str, &str)] = &[
    ("tab / shift-tab", "Next / previous field"),
    ("enter, ctrl-s", "Submit"),
    ("ctrl-t", "Switch login / sign up"),
    ("esc", "Leave the form"),
];

/// Key reference overlay
#[derive(Debug, Default)]
pub struct HelpComponent;

impl HelpComponent {
    pub fn lines(&self, state: &AppState) -> Vec<Line<'static>> {
        let styles = &state.config.config.styles;
        let key_style = styles.get_style("accent");
        let bindings = ENTRIES.iter().filter_map(|(action, label)| {
            let key = state.config.config.keybindings.describe(*action)?;
            Some((key, *label))
        });
        let form = FORM_ENTRIES
            .iter()
            .map(|(key, label)| (key.to_string(), *label));

        bindings
            .chain(form)
            .map(|(key, label)| {
                Line::from(vec![
                    Span::styled(format!("{key:>16}"), key_style),
                    Span::raw(format!("  {label}")),
                ])
            })
            .collect()
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let lines = self.lines(state);
        let height = (lines.len() as u16 + 2).min(area.height);
        let width = 48.min(area.width);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Help")
            .border_style(state.config.config.styles.get_style("primary"));

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}
