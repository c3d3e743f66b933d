use serde::{Deserialize, Serialize};

/// UI-only messages for UiState transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiMsg {
    DrawerUp,
    DrawerDown,
    ToggleHelp,
}
