//! Route graph and navigator
//!
//! The routing table is a static directed graph: a root switch
//! (`Startup → Auth → Shop`), a drawer of three sections inside `Shop`, and
//! one stack per section. Edges into the Shop subtree are guarded by session
//! presence. Every transition reports the route entries it mounted, disposed
//! and focused so that owners of screen-local state can react.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::domain::shop::{Product, ProductId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize, Deserialize,
)]
pub enum Route {
    Startup,
    Auth,
    ProductsOverview,
    ProductDetail,
    Cart,
    Orders,
    UserProducts,
    EditProduct,
}

/// Drawer sections of the Shop subtree
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter, Serialize, Deserialize,
)]
pub enum Section {
    Products,
    Orders,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Root {
    Startup,
    Auth,
    Shop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Root(Root),
    Stack(Section),
}

impl Route {
    /// Where the route lives in the graph
    pub const fn placement(self) -> Placement {
        match self {
            Route::Startup => Placement::Root(Root::Startup),
            Route::Auth => Placement::Root(Root::Auth),
            Route::ProductsOverview | Route::ProductDetail | Route::Cart => {
                Placement::Stack(Section::Products)
            }
            Route::Orders => Placement::Stack(Section::Orders),
            Route::UserProducts | Route::EditProduct => Placement::Stack(Section::Admin),
        }
    }

    pub const fn requires_session(self) -> bool {
        matches!(self.placement(), Placement::Stack(_))
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Startup => "Loading",
            Route::Auth => "Authenticate",
            Route::ProductsOverview => "All Products",
            Route::ProductDetail => "Product",
            Route::Cart => "Your Cart",
            Route::Orders => "Your Orders",
            Route::UserProducts => "Your Products",
            Route::EditProduct => "Edit Product",
        }
    }
}

impl Section {
    pub const fn initial_route(self) -> Route {
        match self {
            Section::Products => Route::ProductsOverview,
            Section::Orders => Route::Orders,
            Section::Admin => Route::UserProducts,
        }
    }

    pub fn routes(self) -> impl Iterator<Item = Route> {
        Route::iter().filter(move |r| r.placement() == Placement::Stack(self))
    }
}

/// Navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Route(Route),
    /// The Shop subtree on its default section
    Shop,
    /// A drawer section, landing on the top of its stack
    Section(Section),
}

impl From<Route> for Target {
    fn from(route: Route) -> Self {
        Target::Route(route)
    }
}

impl From<Section> for Target {
    fn from(section: Section) -> Self {
        Target::Section(section)
    }
}

impl Target {
    fn requires_session(self) -> bool {
        match self {
            Target::Route(route) => route.requires_session(),
            Target::Shop | Target::Section(_) => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    pub product_id: Option<ProductId>,
    pub product_title: Option<String>,
}

impl RouteParams {
    pub fn product(product: &Product) -> Self {
        Self {
            product_id: Some(product.id.clone()),
            product_title: Some(product.title.clone()),
        }
    }

    pub fn product_id(id: ProductId) -> Self {
        Self {
            product_id: Some(id),
            product_title: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteKey(u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub key: RouteKey,
    pub route: Route,
    pub params: RouteParams,
}

/// Effects of one navigator operation on mounted entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub mounted: Vec<RouteEntry>,
    pub disposed: Vec<RouteEntry>,
    /// Entry that became current, if the current entry changed or was re-entered
    pub focused: Option<RouteEntry>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty() && self.disposed.is_empty() && self.focused.is_none()
    }

    /// Whether `key` was focused by this transition without being newly mounted
    pub fn refocused(&self) -> Option<&RouteEntry> {
        self.focused
            .as_ref()
            .filter(|entry| !self.mounted.iter().any(|m| m.key == entry.key))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawerState {
    pub active: Section,
    pub open: bool,
    stacks: BTreeMap<Section, Vec<RouteEntry>>,
}

impl DrawerState {
    pub fn stack(&self, section: Section) -> &[RouteEntry] {
        self.stacks.get(&section).map(Vec::as_slice).unwrap_or_default()
    }

    fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.stacks.values().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootState {
    Startup(RouteEntry),
    Auth(RouteEntry),
    Shop(DrawerState),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    root: Option<RootState>,
    next_key: u64,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<Root> {
        self.root.as_ref().map(|root| match root {
            RootState::Startup(_) => Root::Startup,
            RootState::Auth(_) => Root::Auth,
            RootState::Shop(_) => Root::Shop,
        })
    }

    pub fn drawer(&self) -> Option<&DrawerState> {
        match &self.root {
            Some(RootState::Shop(drawer)) => Some(drawer),
            _ => None,
        }
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer().is_some_and(|d| d.open)
    }

    /// The focused entry
    pub fn current(&self) -> Option<&RouteEntry> {
        match self.root.as_ref()? {
            RootState::Startup(entry) | RootState::Auth(entry) => Some(entry),
            RootState::Shop(drawer) => drawer.stack(drawer.active).last(),
        }
    }

    /// Every mounted entry
    pub fn entries(&self) -> Vec<&RouteEntry> {
        match &self.root {
            None => vec![],
            Some(RootState::Startup(entry)) | Some(RootState::Auth(entry)) => vec![entry],
            Some(RootState::Shop(drawer)) => drawer.entries().collect(),
        }
    }

    /// Applies the session guard: targets in the Shop subtree resolve to
    /// `Auth` while no session is present.
    pub fn resolve(target: Target, session_live: bool) -> Target {
        if target.requires_session() && !session_live {
            Target::Route(Route::Auth)
        } else {
            target
        }
    }

    pub fn navigate(
        &mut self,
        target: impl Into<Target>,
        params: RouteParams,
        session_live: bool,
    ) -> Transition {
        let target = Self::resolve(target.into(), session_live);
        match target {
            Target::Route(route) => match route.placement() {
                Placement::Root(Root::Startup) => self.switch_root(Root::Startup, params),
                Placement::Root(Root::Auth) => self.switch_root(Root::Auth, params),
                Placement::Root(Root::Shop) => self.enter_section(Section::Products),
                Placement::Stack(section) => {
                    let mut transition = self.enter_section(section);
                    let inner = self.navigate_in_stack(section, route, params);
                    merge(&mut transition, inner);
                    transition
                }
            },
            Target::Shop => {
                let section = self.drawer().map(|d| d.active).unwrap_or(Section::Products);
                self.enter_section(section)
            }
            Target::Section(section) => self.enter_section(section),
        }
    }

    /// Pops the active stack. Closes the drawer instead when it is open.
    pub fn go_back(&mut self) -> Transition {
        let Some(RootState::Shop(drawer)) = &mut self.root else {
            return Transition::default();
        };
        if drawer.open {
            drawer.open = false;
            return Transition::default();
        }
        let stack = drawer.stacks.entry(drawer.active).or_default();
        if stack.len() <= 1 {
            return Transition::default();
        }
        let disposed = stack.pop().into_iter().collect();
        Transition {
            mounted: vec![],
            disposed,
            focused: stack.last().cloned(),
        }
    }

    pub fn toggle_drawer(&mut self) {
        if let Some(RootState::Shop(drawer)) = &mut self.root {
            drawer.open = !drawer.open;
        }
    }

    /// Redirects a Shop root to `Auth` once the session is gone
    pub fn sync_session(&mut self, session_live: bool) -> Transition {
        if !session_live && self.root() == Some(Root::Shop) {
            self.switch_root(Root::Auth, RouteParams::default())
        } else {
            Transition::default()
        }
    }

    fn entry(&mut self, route: Route, params: RouteParams) -> RouteEntry {
        let key = RouteKey(self.next_key);
        self.next_key += 1;
        RouteEntry { key, route, params }
    }

    fn switch_root(&mut self, root: Root, params: RouteParams) -> Transition {
        if self.root() == Some(root) {
            return Transition::default();
        }
        let disposed = self.entries().into_iter().cloned().collect();
        let (state, entry) = match root {
            Root::Startup => {
                let entry = self.entry(Route::Startup, params);
                (RootState::Startup(entry.clone()), entry)
            }
            Root::Auth => {
                let entry = self.entry(Route::Auth, params);
                (RootState::Auth(entry.clone()), entry)
            }
            Root::Shop => {
                return self.enter_section(Section::Products);
            }
        };
        self.root = Some(state);
        Transition {
            mounted: vec![entry.clone()],
            disposed,
            focused: Some(entry),
        }
    }

    /// Activates `section`, creating the Shop root and the section's initial
    /// entry when needed. Closes the drawer.
    fn enter_section(&mut self, section: Section) -> Transition {
        let mut transition = Transition::default();
        if self.root() != Some(Root::Shop) {
            transition.disposed = self.entries().into_iter().cloned().collect();
            self.root = Some(RootState::Shop(DrawerState {
                active: section,
                open: false,
                stacks: BTreeMap::new(),
            }));
        }

        let needs_initial = self
            .drawer()
            .is_some_and(|d| d.stack(section).is_empty());
        let initial = needs_initial.then(|| self.entry(section.initial_route(), RouteParams::default()));

        if let Some(RootState::Shop(drawer)) = &mut self.root {
            let changed = drawer.active != section || initial.is_some() || !transition.disposed.is_empty();
            drawer.active = section;
            drawer.open = false;
            let stack = drawer.stacks.entry(section).or_default();
            if let Some(entry) = initial {
                stack.push(entry.clone());
                transition.mounted.push(entry);
            }
            if changed {
                transition.focused = stack.last().cloned();
            }
        }
        transition
    }

    /// Stack semantics: pop back to an existing entry of `route` (replacing
    /// its params) or push a new one.
    fn navigate_in_stack(&mut self, section: Section, route: Route, params: RouteParams) -> Transition {
        let existing = self
            .drawer()
            .and_then(|d| d.stack(section).iter().position(|e| e.route == route));
        let pushed = existing.is_none().then(|| self.entry(route, params.clone()));

        let Some(RootState::Shop(drawer)) = &mut self.root else {
            return Transition::default();
        };
        let stack = drawer.stacks.entry(section).or_default();
        let mut transition = Transition::default();

        match (existing, pushed) {
            (Some(index), _) => {
                let is_top = index + 1 == stack.len();
                transition.disposed = stack.split_off(index + 1);
                let entry = &mut stack[index];
                let params_changed = entry.params != params;
                entry.params = params;
                if !is_top || params_changed {
                    transition.focused = Some(entry.clone());
                }
            }
            (None, Some(entry)) => {
                stack.push(entry.clone());
                transition.mounted.push(entry.clone());
                transition.focused = Some(entry);
            }
            (None, None) => {}
        }
        transition
    }
}

fn merge(into: &mut Transition, other: Transition) {
    into.mounted.extend(other.mounted);
    into.disposed.extend(other.disposed);
    if other.focused.is_some() {
        into.focused = other.focused;
    }
}
