use ratatui::{prelude::*, widgets::*};

use crate::core::state::{screens::auth::AuthScreen, AppState};

use super::view_form;

const CARD_WIDTH: u16 = 50;

/// Login / sign-up card
#[derive(Debug, Default)]
pub struct AuthComponent;

impl AuthComponent {
    pub fn view(&self, state: &AppState, screen: &AuthScreen, frame: &mut Frame, area: Rect) {
        let styles = &state.config.config.styles;
        let width = CARD_WIDTH.min(area.width);
        let card = Rect {
            x: area.x + (area.width - width) / 2,
            width,
            ..area
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(screen.mode.submit_label())
            .border_style(styles.get_style("primary"))
            .padding(Padding::horizontal(1));
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let [form_area, actions] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(2)]).areas(inner);
        view_form(state, &screen.form, frame, form_area);

        let submit = if screen.submit.is_loading() {
            Line::styled("Loading…", styles.get_style("primary"))
        } else {
            Line::from(vec![
                Span::styled("enter", styles.get_style("accent")),
                Span::styled(format!(" {}", screen.mode.submit_label()), styles.get_style("muted")),
            ])
        };
        let switch = Line::from(vec![
            Span::styled("ctrl-t", styles.get_style("accent")),
            Span::styled(format!(" {}", screen.mode.switch_label()), styles.get_style("muted")),
        ]);
        frame.render_widget(Paragraph::new(vec![submit, switch]), actions);
    }
}
