use serde::{Deserialize, Serialize};

pub mod nav;
pub mod screen;
pub mod shop;
pub mod store;
pub mod system;
pub mod ui;

use nav::NavMsg;
use screen::ScreenMsg;
use shop::{ShopReply, ShopResponse};
use store::{CartMsg, OrdersMsg, ProductsMsg, SessionMsg};
use system::SystemMsg;
use ui::UiMsg;

/// Domain messages representing application intent and business logic
/// These are processed by the update function and represent pure domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    // System operations (delegated to SystemState)
    System(SystemMsg),

    // UI operations (delegated to UiState)
    Ui(UiMsg),

    // Navigator operations
    Nav(NavMsg),

    // Input for the focused screen
    Screen(ScreenMsg),

    // Store reducers
    Products(ProductsMsg),
    Cart(CartMsg),
    Orders(OrdersMsg),
    Session(SessionMsg),

    // Settled backend request
    Shop(ShopResponse),
}

impl Msg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        match self {
            Msg::System(msg) => msg.is_frequent(),
            _ => false,
        }
    }

    /// Form keystrokes and credential-bearing messages stay out of the log
    pub fn is_sensitive(&self) -> bool {
        match self {
            Msg::Screen(ScreenMsg::Form(_)) => true,
            Msg::Session(SessionMsg::SignedIn(_) | SessionMsg::Restored(_)) => true,
            Msg::Shop(ShopResponse {
                result: Ok(ShopReply::Authenticated(_) | ShopReply::SessionRestored(_)),
                ..
            }) => true,
            _ => false,
        }
    }

    pub fn status(message: impl Into<String>) -> Self {
        Msg::System(SystemMsg::UpdateStatusMessage(message.into()))
    }
}

impl From<SystemMsg> for Msg {
    fn from(msg: SystemMsg) -> Self {
        Msg::System(msg)
    }
}

impl From<NavMsg> for Msg {
    fn from(msg: NavMsg) -> Self {
        Msg::Nav(msg)
    }
}

impl From<ScreenMsg> for Msg {
    fn from(msg: ScreenMsg) -> Self {
        Msg::Screen(msg)
    }
}

impl From<ProductsMsg> for Msg {
    fn from(msg: ProductsMsg) -> Self {
        Msg::Products(msg)
    }
}

impl From<CartMsg> for Msg {
    fn from(msg: CartMsg) -> Self {
        Msg::Cart(msg)
    }
}

impl From<OrdersMsg> for Msg {
    fn from(msg: OrdersMsg) -> Self {
        Msg::Orders(msg)
    }
}

impl From<SessionMsg> for Msg {
    fn from(msg: SessionMsg) -> Self {
        Msg::Session(msg)
    }
}
