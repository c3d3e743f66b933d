//! Screen-local state, created and torn down from navigator transitions
//!
//! Every mounted route entry owns one [`Screen`]. Screens read the store
//! through a [`StoreView`] and act on the world only through [`Dispatch`]:
//! follow-up messages for the update loop and backend commands bracketed by
//! an [`AsyncSlot`](crate::domain::request::AsyncSlot).

use std::collections::HashMap;

use crate::{
    core::{
        cmd::{Cmd, ShopAction},
        msg::{screen::ScreenMsg, shop::ShopResponse, system::SystemMsg, Msg},
        state::{
            store::{CartState, OrdersState, ProductsState},
            system::Alert,
        },
    },
    domain::{
        form::FormState,
        navigation::{Route, RouteEntry, RouteKey},
        request::{AsyncSlot, RequestId, RequestIds},
        shop::Session,
    },
};

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod orders;
pub mod startup;

pub use admin::{EditProductScreen, UserProductsScreen};
pub use auth::{AuthMode, AuthScreen};
pub use catalog::{CartScreen, ProductDetailScreen, ProductsOverviewScreen};
pub use orders::OrdersScreen;
pub use startup::StartupScreen;

/// Read-only store snapshot handed to screens
#[derive(Debug, Clone, Copy)]
pub struct StoreView<'a> {
    pub products: &'a ProductsState,
    pub cart: &'a CartState,
    pub orders: &'a OrdersState,
    pub session: Option<&'a Session>,
}

/// Outbox of one screen update
#[derive(Debug)]
pub struct Dispatch<'a> {
    requests: &'a mut RequestIds,
    session: Option<&'a Session>,
    cmds: Vec<Cmd>,
    msgs: Vec<Msg>,
}

impl<'a> Dispatch<'a> {
    pub fn new(requests: &'a mut RequestIds, session: Option<&'a Session>) -> Self {
        Self {
            requests,
            session,
            cmds: vec![],
            msgs: vec![],
        }
    }

    /// Starts `action` in `slot`. Skipped (returns false) while the slot
    /// already has a request in flight.
    pub fn shop(&mut self, slot: &mut AsyncSlot, action: ShopAction) -> bool {
        if let Some(pending) = slot.pending() {
            log::debug!("Skipping {}: {pending} still in flight", action.name());
            return false;
        }
        let request = self.requests.next_id();
        if !slot.begin(request) {
            return false;
        }
        log::info!("Dispatching {} as {request}", action.name());
        self.cmds.push(Cmd::Shop {
            request,
            session: self.session.cloned(),
            action,
        });
        true
    }

    pub fn emit(&mut self, msg: impl Into<Msg>) {
        self.msgs.push(msg.into());
    }

    pub fn status(&mut self, message: impl Into<String>) {
        self.msgs.push(Msg::status(message));
    }

    pub fn alert(&mut self, alert: Alert) {
        self.msgs.push(Msg::System(SystemMsg::ShowAlert(alert)));
    }

    /// Alert shown when a submit is refused by the form gate
    pub fn wrong_input(&mut self) {
        self.alert(Alert::info(
            "Wrong input",
            "Please check the errors in the form.",
        ));
    }

    /// Alert shown for a failed mutation
    pub fn error_alert(&mut self, message: &str) {
        self.alert(Alert::info("An error occurred!", message));
    }

    pub fn into_parts(self) -> (Vec<Cmd>, Vec<Msg>) {
        (self.cmds, self.msgs)
    }
}

/// Screen call context
#[derive(Debug)]
pub struct ScreenCtx<'a> {
    pub store: StoreView<'a>,
    pub dispatch: Dispatch<'a>,
}

/// Selection within a list whose length is owned by the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListCursor {
    index: usize,
}

impl ListCursor {
    pub fn update(&mut self, msg: &ScreenMsg, len: usize) -> bool {
        match msg {
            ScreenMsg::ScrollUp => self.index = self.clamped(len).saturating_sub(1),
            ScreenMsg::ScrollDown => {
                self.index = (self.clamped(len) + 1).min(len.saturating_sub(1));
            }
            ScreenMsg::ScrollToTop => self.index = 0,
            ScreenMsg::ScrollToBottom => self.index = len.saturating_sub(1),
            _ => return false,
        }
        true
    }

    /// Selected row, if the list is not empty
    pub fn selected(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.clamped(len))
    }

    fn clamped(&self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Startup(StartupScreen),
    Auth(AuthScreen),
    ProductsOverview(ProductsOverviewScreen),
    ProductDetail(ProductDetailScreen),
    Cart(CartScreen),
    Orders(OrdersScreen),
    UserProducts(UserProductsScreen),
    EditProduct(EditProductScreen),
}

impl Screen {
    pub fn mount(entry: &RouteEntry, ctx: &mut ScreenCtx) -> Self {
        match entry.route {
            Route::Startup => Screen::Startup(StartupScreen::mount(ctx)),
            Route::Auth => Screen::Auth(AuthScreen::default()),
            Route::ProductsOverview => Screen::ProductsOverview(ProductsOverviewScreen::mount(ctx)),
            Route::ProductDetail => Screen::ProductDetail(ProductDetailScreen::new(&entry.params)),
            Route::Cart => Screen::Cart(CartScreen::default()),
            Route::Orders => Screen::Orders(OrdersScreen::mount(ctx)),
            Route::UserProducts => Screen::UserProducts(UserProductsScreen::mount(ctx)),
            Route::EditProduct => Screen::EditProduct(EditProductScreen::mount(&entry.params, ctx)),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Screen::Startup(_) => Route::Startup,
            Screen::Auth(_) => Route::Auth,
            Screen::ProductsOverview(_) => Route::ProductsOverview,
            Screen::ProductDetail(_) => Route::ProductDetail,
            Screen::Cart(_) => Route::Cart,
            Screen::Orders(_) => Route::Orders,
            Screen::UserProducts(_) => Route::UserProducts,
            Screen::EditProduct(_) => Route::EditProduct,
        }
    }

    /// Entry re-entered after being covered or after a params change
    pub fn on_focus(&mut self, entry: &RouteEntry, ctx: &mut ScreenCtx) {
        match self {
            Screen::ProductsOverview(screen) => screen.on_focus(ctx),
            Screen::ProductDetail(screen) => *screen = ProductDetailScreen::new(&entry.params),
            Screen::EditProduct(screen) if screen.params_differ(&entry.params) => {
                *screen = EditProductScreen::mount(&entry.params, ctx);
            }
            _ => {}
        }
    }

    pub fn update(&mut self, msg: ScreenMsg, ctx: &mut ScreenCtx) {
        match self {
            Screen::Startup(_) => {}
            Screen::Auth(screen) => screen.update(msg, ctx),
            Screen::ProductsOverview(screen) => screen.update(msg, ctx),
            Screen::ProductDetail(screen) => screen.update(msg, ctx),
            Screen::Cart(screen) => screen.update(msg, ctx),
            Screen::Orders(screen) => screen.update(msg, ctx),
            Screen::UserProducts(screen) => screen.update(msg, ctx),
            Screen::EditProduct(screen) => screen.update(msg, ctx),
        }
    }

    /// Delivers a settled request. Returns false when this screen was not
    /// waiting for it.
    pub fn settle(&mut self, response: &ShopResponse, ctx: &mut ScreenCtx) -> bool {
        match self {
            Screen::Startup(screen) => screen.settle(response, ctx),
            Screen::Auth(screen) => screen.settle(response, ctx),
            Screen::ProductsOverview(screen) => screen.settle(response),
            Screen::ProductDetail(_) => false,
            Screen::Cart(screen) => screen.settle(response, ctx),
            Screen::Orders(screen) => screen.settle(response),
            Screen::UserProducts(screen) => screen.settle(response, ctx),
            Screen::EditProduct(screen) => screen.settle(response, ctx),
        }
    }

    pub fn owns(&self, request: RequestId) -> bool {
        self.slots().iter().any(|slot| slot.owns(request))
    }

    /// In-flight fetch that may be cancelled when the screen goes away
    pub fn pending_fetch(&self) -> Option<RequestId> {
        match self {
            Screen::ProductsOverview(screen) => screen.fetch.pending(),
            Screen::Orders(screen) => screen.fetch.pending(),
            Screen::UserProducts(screen) => screen.fetch.pending(),
            _ => None,
        }
    }

    fn slots(&self) -> Vec<&AsyncSlot> {
        match self {
            Screen::Startup(screen) => vec![&screen.restore],
            Screen::Auth(screen) => vec![&screen.submit],
            Screen::ProductsOverview(screen) => vec![&screen.fetch],
            Screen::ProductDetail(_) => vec![],
            Screen::Cart(screen) => vec![&screen.order],
            Screen::Orders(screen) => vec![&screen.fetch],
            Screen::UserProducts(screen) => vec![&screen.fetch, &screen.delete],
            Screen::EditProduct(screen) => vec![&screen.submit],
        }
    }

    /// Whether text input goes to a form on this screen
    pub fn has_form(&self) -> bool {
        self.form().is_some()
    }

    pub fn form(&self) -> Option<&FormState> {
        match self {
            Screen::Auth(screen) => Some(&screen.form),
            Screen::EditProduct(screen) => Some(&screen.form),
            _ => None,
        }
    }
}

/// Screens keyed by the route entry they belong to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreensState {
    screens: HashMap<RouteKey, Screen>,
}

impl ScreensState {
    pub fn get(&self, key: RouteKey) -> Option<&Screen> {
        self.screens.get(&key)
    }

    pub fn get_mut(&mut self, key: RouteKey) -> Option<&mut Screen> {
        self.screens.get_mut(&key)
    }

    pub fn insert(&mut self, key: RouteKey, screen: Screen) {
        self.screens.insert(key, screen);
    }

    pub fn remove(&mut self, key: RouteKey) -> Option<Screen> {
        self.screens.remove(&key)
    }

    /// Screen waiting on `request`
    pub fn owner_of(&mut self, request: RequestId) -> Option<&mut Screen> {
        self.screens.values_mut().find(|screen| screen.owns(request))
    }

    pub fn values(&self) -> impl Iterator<Item = &Screen> {
        self.screens.values()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }
}
