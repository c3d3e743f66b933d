use serde::{Deserialize, Serialize};

use crate::domain::{
    request::RequestId,
    shop::{OrderLine, ProductDraft, ProductId, ProductPatch, Secret, Session},
};

/// UI (TUI) specific sub-commands executed by the host/runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TuiCommand {
    // Render is orchestrated exclusively by AppRunner, not via TuiCommand.
    Resize { width: u16, height: u16 },
}

/// Remote operation carried out by the shop service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShopAction {
    FetchProducts,
    CreateProduct(ProductDraft),
    UpdateProduct { id: ProductId, patch: ProductPatch },
    DeleteProduct(ProductId),
    FetchOrders,
    AddOrder { items: Vec<OrderLine>, total_amount: f64 },
    Login { email: String, password: Secret },
    Signup { email: String, password: Secret },
    /// Load the persisted session
    RestoreSession,
}

impl ShopAction {
    /// Name for logs. Never includes credentials.
    pub fn name(&self) -> &'static str {
        match self {
            ShopAction::FetchProducts => "fetch_products",
            ShopAction::CreateProduct(_) => "create_product",
            ShopAction::UpdateProduct { .. } => "update_product",
            ShopAction::DeleteProduct(_) => "delete_product",
            ShopAction::FetchOrders => "fetch_orders",
            ShopAction::AddOrder { .. } => "add_order",
            ShopAction::Login { .. } => "login",
            ShopAction::Signup { .. } => "signup",
            ShopAction::RestoreSession => "restore_session",
        }
    }

    /// Reads are dropped when their screen goes away; writes always finish.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, ShopAction::FetchProducts | ShopAction::FetchOrders)
    }
}

/// Elm-like command definitions
/// Represents side effects (network communication, file I/O, etc.)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cmd {
    // Backend-related commands
    Shop {
        request: RequestId,
        session: Option<Session>,
        action: ShopAction,
    },
    CancelRequest {
        request: RequestId,
    },

    // Session persistence
    SaveSession(Session),
    ClearSession,

    // UI-related commands
    Tui(TuiCommand),
}

impl Cmd {
    /// Get command name for debugging
    pub fn name(&self) -> &'static str {
        match self {
            Cmd::Shop { action, .. } => action.name(),
            Cmd::CancelRequest { .. } => "CancelRequest",
            Cmd::SaveSession(_) => "SaveSession",
            Cmd::ClearSession => "ClearSession",
            Cmd::Tui(..) => "Tui",
        }
    }
}
