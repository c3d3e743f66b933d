//! Status bar component
//!
//! Displays the signed-in account and the latest status message at the
//! bottom of the screen.

use ratatui::{prelude::*, widgets::*};

use crate::{core::state::AppState, presentation::config::keybindings::Action};

use super::key_hints;

#[derive(Debug, Clone, Default)]
pub struct StatusBarComponent;

impl StatusBarComponent {
    pub fn new() -> Self {
        Self
    }

    /// Renders two lines: account info with help hint, then the status message
    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let styles = &state.config.config.styles;
        let layout = Layout::new(
            Direction::Vertical,
            [Constraint::Length(1), Constraint::Length(1)],
        )
        .split(area);

        frame.render_widget(Clear, layout[0]);
        frame.render_widget(Clear, layout[1]);

        let account = Paragraph::new(Span::styled(
            self.account_label(state),
            styles.get_style("muted").italic(),
        ))
        .style(styles.get_style("status"));
        frame.render_widget(account, layout[0]);
        frame.render_widget(
            Paragraph::new(key_hints(state, &[(Action::Help, "help"), (Action::Quit, "quit")]))
                .alignment(Alignment::Right),
            layout[0],
        );

        let message = state.system.status_message.clone().unwrap_or_default();
        let style = if message.starts_with("Error") {
            styles.get_style("error")
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(Span::styled(message, style)), layout[1]);
    }

    pub fn account_label(&self, state: &AppState) -> String {
        match state.session.user_id() {
            Some(user_id) => format!("Signed in as {user_id}"),
            None => "Not signed in".to_string(),
        }
    }
}
