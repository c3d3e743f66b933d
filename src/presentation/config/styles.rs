use std::collections::HashMap;

use derive_deref::{Deref, DerefMut};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// Style entry as written in the config file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub fg: Option<Color>,
    #[serde(default)]
    pub bg: Option<Color>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underlined: bool,
    #[serde(default)]
    pub dim: bool,
}

impl From<StyleConfig> for Style {
    fn from(config: StyleConfig) -> Self {
        let mut style = Style::default();
        if let Some(fg) = config.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = config.bg {
            style = style.bg(bg);
        }
        let modifiers = [
            (config.bold, Modifier::BOLD),
            (config.italic, Modifier::ITALIC),
            (config.underlined, Modifier::UNDERLINED),
            (config.dim, Modifier::DIM),
        ];
        for (enabled, modifier) in modifiers {
            if enabled {
                style = style.add_modifier(modifier);
            }
        }
        style
    }
}

/// Named styles used by the components
#[derive(Clone, Debug, Default, Deref, DerefMut, Deserialize)]
pub struct Styles(pub HashMap<String, StyleConfig>);

impl Styles {
    /// Style for `key`, or the terminal default when unset
    pub fn get_style(&self, key: &str) -> Style {
        self.get(key).copied().map(Style::from).unwrap_or_default()
    }
}
