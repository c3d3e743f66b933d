use crate::{
    domain::{
        navigation::{Navigator, RouteEntry},
        request::RequestIds,
    },
    infrastructure::config::Config,
};

pub mod screens;
pub mod store;
pub mod system;
pub mod ui;

use screens::{Dispatch, Screen, ScreenCtx, ScreensState, StoreView};
use store::{CartState, OrdersState, ProductsState, SessionState};
use system::SystemState;
use ui::UiState;

/// Unified application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub system: SystemState,
    pub ui: UiState,
    pub session: SessionState,
    pub products: ProductsState,
    pub cart: CartState,
    pub orders: OrdersState,
    pub nav: Navigator,
    pub screens: ScreensState,
    pub requests: RequestIds,
    pub config: ConfigState,
}

/// Configuration state - holds all user-configurable settings
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    /// Current configuration loaded from file
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: ConfigState { config },
            ..Default::default()
        }
    }

    pub fn store(&self) -> StoreView<'_> {
        StoreView {
            products: &self.products,
            cart: &self.cart,
            orders: &self.orders,
            session: self.session.current.as_ref(),
        }
    }

    /// The focused route entry and its screen
    pub fn current_screen(&self) -> Option<(&RouteEntry, &Screen)> {
        let entry = self.nav.current()?;
        let screen = self.screens.get(entry.key)?;
        Some((entry, screen))
    }

    /// Whether keystrokes go to a form on the focused screen
    pub fn is_editing(&self) -> bool {
        self.current_screen()
            .is_some_and(|(_, screen)| screen.has_form())
    }

    /// Splits the state into a screen context and the screen map so that a
    /// screen can be driven while it reads the store.
    pub fn screen_ctx(&mut self) -> (ScreenCtx<'_>, &mut ScreensState) {
        let AppState {
            session,
            products,
            cart,
            orders,
            screens,
            requests,
            ..
        } = self;
        let session = session.current.as_ref();
        let ctx = ScreenCtx {
            store: StoreView {
                products,
                cart,
                orders,
                session,
            },
            dispatch: Dispatch::new(requests, session),
        };
        (ctx, screens)
    }
}
