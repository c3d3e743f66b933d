use ratatui::{prelude::*, widgets::*};

use crate::domain::{
    form::FieldSpec,
    text::{truncate_text, wrap_text},
};

const MULTILINE_ROWS: usize = 3;

/// Labelled text input with its validation message
#[derive(Clone, Debug)]
pub struct FormField<'a> {
    pub spec: &'a FieldSpec,
    pub value: &'a str,
    pub error: Option<&'static str>,
    pub focused: bool,
    pub label_style: Style,
    pub focused_style: Style,
    pub error_style: Style,
}

impl<'a> FormField<'a> {
    pub fn new(spec: &'a FieldSpec, value: &'a str) -> Self {
        Self {
            spec,
            value,
            error: None,
            focused: false,
            label_style: Style::default().bold(),
            focused_style: Style::default().fg(Color::Cyan),
            error_style: Style::default().fg(Color::Red),
        }
    }

    pub fn error(mut self, error: Option<&'static str>) -> Self {
        self.error = error;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn styles(mut self, label: Style, focused: Style, error: Style) -> Self {
        self.label_style = label;
        self.focused_style = focused;
        self.error_style = error;
        self
    }

    fn value_rows(&self) -> usize {
        if self.spec.multiline {
            MULTILINE_ROWS
        } else {
            1
        }
    }

    /// Label, bordered input and the error line
    pub fn height(&self) -> u16 {
        (1 + self.value_rows() + 2 + 1) as u16
    }

    fn display_value(&self, width: usize) -> String {
        let shown = if self.spec.secure {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.to_string()
        };
        let cursor = if self.focused { "▏" } else { "" };
        let text = format!("{shown}{cursor}");
        if self.spec.multiline {
            truncate_text(&wrap_text(&text, width), self.value_rows())
        } else {
            let len = text.chars().count();
            // keep the end of the value (where the cursor is) visible
            text.chars().skip(len.saturating_sub(width)).collect()
        }
    }
}

impl Widget for FormField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1),
                Constraint::Length(self.value_rows() as u16 + 2),
                Constraint::Length(1),
            ],
        )
        .split(area);

        Paragraph::new(Span::styled(self.spec.label, self.label_style)).render(layout[0], buf);

        let border_style = match (self.focused, self.error) {
            (_, Some(_)) => self.error_style,
            (true, None) => self.focused_style,
            (false, None) => Style::default(),
        };
        let block = Block::default().borders(Borders::ALL).border_style(border_style);
        let inner_width = block.inner(layout[1]).width as usize;
        Paragraph::new(self.display_value(inner_width))
            .block(block)
            .render(layout[1], buf);

        if let Some(error) = self.error {
            Paragraph::new(Span::styled(error, self.error_style)).render(layout[2], buf);
        }
    }
}
