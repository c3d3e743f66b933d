use ratatui::prelude::*;

use crate::core::state::{screens::startup::StartupScreen, AppState};

use super::placeholder;

#[derive(Debug, Default)]
pub struct StartupComponent;

impl StartupComponent {
    pub fn view(&self, state: &AppState, screen: &StartupScreen, frame: &mut Frame, area: Rect) {
        let style = state.config.config.styles.get_style("primary");
        let text = if screen.restore.is_loading() {
            "Loading…"
        } else {
            "Starting…"
        };
        placeholder(frame, area, text, style);
    }
}
