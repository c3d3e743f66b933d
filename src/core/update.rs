use std::collections::VecDeque;

use strum::IntoEnumIterator;

use crate::{
    core::{
        cmd::Cmd,
        msg::{
            nav::NavMsg,
            shop::{ShopReply, ShopResponse},
            store::{CartMsg, OrdersMsg, ProductsMsg, SessionMsg},
            system::SystemMsg,
            Msg,
        },
        state::{screens::Screen, AppState},
    },
    domain::navigation::{Section, Transition},
};

/// Elm-like update function
/// Returns new state and list of commands from current state and message.
/// Follow-up messages produced along the way are processed before returning.
pub fn update(msg: Msg, mut state: AppState) -> (AppState, Vec<Cmd>) {
    let mut queue = VecDeque::from([msg]);
    let mut commands = vec![];
    while let Some(msg) = queue.pop_front() {
        let (cmds, follow_ups) = step(msg, &mut state);
        commands.extend(cmds);
        queue.extend(follow_ups);
    }
    (state, commands)
}

fn step(msg: Msg, state: &mut AppState) -> (Vec<Cmd>, Vec<Msg>) {
    match msg {
        // System messages (delegated to SystemState)
        Msg::System(system_msg) => state.system.update(system_msg),

        // UI messages (delegated to UiState)
        Msg::Ui(ui_msg) => {
            state.ui.update(ui_msg);
            (vec![], vec![])
        }

        Msg::Nav(nav_msg) => navigate(nav_msg, state),

        // Screen input goes to the focused entry only
        Msg::Screen(screen_msg) => {
            let Some(key) = state.nav.current().map(|entry| entry.key) else {
                return (vec![], vec![]);
            };
            let (mut ctx, screens) = state.screen_ctx();
            if let Some(screen) = screens.get_mut(key) {
                screen.update(screen_msg, &mut ctx);
            }
            ctx.dispatch.into_parts()
        }

        // Store reducers
        Msg::Products(products_msg) => {
            let follow_ups = match &products_msg {
                ProductsMsg::Deleted(id) => vec![Msg::Cart(CartMsg::RemoveProduct(id.clone()))],
                _ => vec![],
            };
            let user_id = state.session.user_id().cloned();
            state.products.update(products_msg, user_id.as_ref());
            (vec![], follow_ups)
        }

        Msg::Cart(cart_msg) => {
            state.cart.update(cart_msg);
            (vec![], vec![])
        }

        Msg::Orders(orders_msg) => {
            state.orders.update(orders_msg);
            (vec![], vec![])
        }

        Msg::Session(session_msg) => update_session(session_msg, state),

        Msg::Shop(response) => settle(response, state),
    }
}

fn navigate(msg: NavMsg, state: &mut AppState) -> (Vec<Cmd>, Vec<Msg>) {
    let session_live = state.session.is_present();
    match msg {
        NavMsg::Navigate { target, params } => {
            let transition = state.nav.navigate(target, params, session_live);
            apply_transition(transition, state)
        }
        NavMsg::Back => {
            let transition = state.nav.go_back();
            apply_transition(transition, state)
        }
        NavMsg::ToggleDrawer => {
            state.nav.toggle_drawer();
            if let Some(drawer) = state.nav.drawer().filter(|d| d.open) {
                state.ui.drawer_cursor = Section::iter()
                    .position(|section| section == drawer.active)
                    .unwrap_or_default();
            }
            (vec![], vec![])
        }
        NavMsg::DrawerSelect => {
            if !state.nav.is_drawer_open() {
                return (vec![], vec![]);
            }
            match Section::iter().nth(state.ui.drawer_cursor) {
                Some(section) => navigate(NavMsg::to(section), state),
                None => (vec![], vec![Msg::Session(SessionMsg::Logout)]),
            }
        }
    }
}

fn update_session(msg: SessionMsg, state: &mut AppState) -> (Vec<Cmd>, Vec<Msg>) {
    let ends_session = matches!(msg, SessionMsg::Logout | SessionMsg::Expired);
    let expired = msg == SessionMsg::Expired;
    let had_session = state.session.is_present();
    let mut cmds = state.session.update(msg);
    if !ends_session || !had_session {
        return (cmds, vec![]);
    }

    log::info!("Session ended (expired: {expired})");
    state.products.user_products.clear();
    let mut follow_ups = vec![Msg::Cart(CartMsg::Clear), Msg::Orders(OrdersMsg::Clear)];
    if expired {
        follow_ups.push(Msg::status("Your session expired. Please log in again."));
    }
    let transition = state.nav.sync_session(false);
    let (nav_cmds, nav_msgs) = apply_transition(transition, state);
    cmds.extend(nav_cmds);
    follow_ups.extend(nav_msgs);
    (cmds, follow_ups)
}

/// Store updates carried by a successful reply. Applied whether or not the
/// requesting screen still exists.
fn store_updates(reply: &ShopReply) -> Vec<Msg> {
    match reply {
        ShopReply::Products(products) => vec![Msg::Products(ProductsMsg::Set(products.clone()))],
        ShopReply::ProductCreated(product) => {
            vec![Msg::Products(ProductsMsg::Created(product.clone()))]
        }
        ShopReply::ProductUpdated { id, patch } => vec![Msg::Products(ProductsMsg::Updated {
            id: id.clone(),
            patch: patch.clone(),
        })],
        ShopReply::ProductDeleted(id) => vec![Msg::Products(ProductsMsg::Deleted(id.clone()))],
        ShopReply::Orders(orders) => vec![Msg::Orders(OrdersMsg::Set(orders.clone()))],
        ShopReply::OrderPlaced(order) => vec![
            Msg::Orders(OrdersMsg::Placed(order.clone())),
            Msg::Cart(CartMsg::Clear),
        ],
        ShopReply::Authenticated(session) => vec![Msg::Session(SessionMsg::SignedIn(session.clone()))],
        ShopReply::SessionRestored(Some(session)) => {
            vec![Msg::Session(SessionMsg::Restored(session.clone()))]
        }
        ShopReply::SessionRestored(None) => vec![],
    }
}

fn settle(response: ShopResponse, state: &mut AppState) -> (Vec<Cmd>, Vec<Msg>) {
    let mut follow_ups = match &response.result {
        Ok(reply) => store_updates(reply),
        Err(message) => {
            log::warn!("Request {} failed: {message}", response.request);
            vec![]
        }
    };

    let (mut ctx, screens) = state.screen_ctx();
    match screens.owner_of(response.request) {
        Some(screen) => {
            screen.settle(&response, &mut ctx);
        }
        None => log::debug!("No screen waiting on {}; response is stale", response.request),
    }
    let (cmds, msgs) = ctx.dispatch.into_parts();
    follow_ups.extend(msgs);
    (cmds, follow_ups)
}

/// Tears down disposed screens (cancelling their fetches), mounts new ones
/// and notifies a re-focused screen.
fn apply_transition(transition: Transition, state: &mut AppState) -> (Vec<Cmd>, Vec<Msg>) {
    let mut cancels = vec![];
    for entry in &transition.disposed {
        let Some(screen) = state.screens.remove(entry.key) else {
            continue;
        };
        log::debug!("Disposing {} screen", entry.route);
        if let Some(request) = screen.pending_fetch() {
            cancels.push(Cmd::CancelRequest { request });
        }
    }

    let (mut ctx, screens) = state.screen_ctx();
    for entry in &transition.mounted {
        log::debug!("Mounting {} screen", entry.route);
        screens.insert(entry.key, Screen::mount(entry, &mut ctx));
    }
    if let Some(entry) = transition.refocused() {
        if let Some(screen) = screens.get_mut(entry.key) {
            screen.on_focus(entry, &mut ctx);
        }
    }

    let (cmds, msgs) = ctx.dispatch.into_parts();
    cancels.extend(cmds);
    (cancels, msgs)
}

/// Surface a failed command on the status line
pub fn command_error(message: impl Into<String>) -> Msg {
    Msg::System(SystemMsg::ShowError(message.into()))
}
