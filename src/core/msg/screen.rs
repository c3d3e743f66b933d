use serde::{Deserialize, Serialize};

use crate::domain::shop::ProductId;

/// Input addressed to the focused screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenMsg {
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    /// Enter on the selected row
    Activate,
    /// Re-run the screen's fetch (also the retry affordance)
    Refresh,
    AddToCart,
    RemoveFromCart,
    OrderNow,
    NewProduct,
    EditSelected,
    DeleteSelected,
    ConfirmDelete(ProductId),
    Submit,
    ToggleAuthMode,
    Form(FormMsg),
}

/// Text editing on the focused form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMsg {
    InsertChar(char),
    DeleteChar,
    FocusNext,
    FocusPrev,
}
