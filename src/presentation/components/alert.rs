use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::{system::Alert, AppState},
    domain::text::wrap_text,
};

/// Blocking dialog. Informational alerts close on enter, confirmations
/// ask yes or no.
#[derive(Debug, Default)]
pub struct AlertComponent;

impl AlertComponent {
    pub fn footer(alert: &Alert) -> &'static str {
        if alert.is_confirmation() {
            "[y] Yes   [n] No"
        } else {
            "[enter] Okay"
        }
    }

    pub fn view(&self, state: &AppState, alert: &Alert, frame: &mut Frame, area: Rect) {
        let styles = &state.config.config.styles;
        let width = 50.min(area.width);
        let inner_width = width.saturating_sub(4) as usize;
        let message = wrap_text(&alert.message, inner_width);
        let mut lines: Vec<Line> = message.lines().map(|l| Line::raw(l.to_string())).collect();
        lines.push(Line::raw(""));
        lines.push(Line::styled(Self::footer(alert), styles.get_style("accent")));

        let height = (lines.len() as u16 + 2).min(area.height);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(alert.title.clone(), styles.get_style("title")))
            .border_style(styles.get_style("error"))
            .padding(Padding::horizontal(1));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(block).alignment(Alignment::Center),
            popup,
        );
    }
}
