use crate::core::msg::ui::UiMsg;

/// Drawer entries in display order. The trailing entry logs out.
pub const DRAWER_ITEMS: usize = 4;

/// UI-related state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub drawer_cursor: usize,
    pub show_help: bool,
}

impl UiState {
    pub fn update(&mut self, msg: UiMsg) {
        match msg {
            UiMsg::DrawerUp => {
                self.drawer_cursor = (self.drawer_cursor + DRAWER_ITEMS - 1) % DRAWER_ITEMS;
            }
            UiMsg::DrawerDown => {
                self.drawer_cursor = (self.drawer_cursor + 1) % DRAWER_ITEMS;
            }
            UiMsg::ToggleHelp => {
                self.show_help = !self.show_help;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawer_cursor_wraps() {
        let mut ui = UiState::default();
        ui.update(UiMsg::DrawerUp);
        assert_eq!(ui.drawer_cursor, DRAWER_ITEMS - 1);
        ui.update(UiMsg::DrawerDown);
        assert_eq!(ui.drawer_cursor, 0);
    }

    #[test]
    fn test_toggle_help() {
        let mut ui = UiState::default();
        ui.update(UiMsg::ToggleHelp);
        assert!(ui.show_help);
        ui.update(UiMsg::ToggleHelp);
        assert!(!ui.show_help);
    }
}
