//! Screen components
//!
//! Components are stateless renderers: they receive the application state
//! during render and never mutate it.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::{screens::Screen, AppState},
    domain::form::FormState,
    presentation::{config::keybindings::Action, widgets::FormField},
};

pub mod admin;
pub mod alert;
pub mod auth;
pub mod catalog;
pub mod drawer;
pub mod header;
pub mod help;
pub mod orders;
pub mod startup;
pub mod status_bar;

pub use admin::{EditProductComponent, UserProductsComponent};
pub use alert::AlertComponent;
pub use auth::AuthComponent;
pub use catalog::{CartComponent, ProductDetailComponent, ProductsOverviewComponent};
pub use drawer::DrawerComponent;
pub use header::HeaderComponent;
pub use help::HelpComponent;
pub use orders::OrdersComponent;
pub use startup::StartupComponent;
pub use status_bar::StatusBarComponent;

/// Collection of all components
#[derive(Debug, Default)]
pub struct Components {
    pub header: HeaderComponent,
    pub status_bar: StatusBarComponent,
    pub drawer: DrawerComponent,
    pub help: HelpComponent,
    pub alert: AlertComponent,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the focused screen and the overlays stacked above it
    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
            ],
        )
        .split(frame.area());

        self.header.view(state, frame, layout[0]);
        self.view_screen(state, frame, layout[1]);
        self.status_bar.view(state, frame, layout[2]);

        if state.nav.is_drawer_open() {
            self.drawer.view(state, frame, layout[1]);
        }
        if state.ui.show_help {
            self.help.view(state, frame, frame.area());
        }
        if let Some(alert) = &state.system.alert {
            self.alert.view(state, alert, frame, frame.area());
        }
    }

    fn view_screen(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let Some((entry, screen)) = state.current_screen() else {
            return;
        };
        match screen {
            Screen::Startup(screen) => StartupComponent.view(state, screen, frame, area),
            Screen::Auth(screen) => AuthComponent.view(state, screen, frame, area),
            Screen::ProductsOverview(screen) => {
                ProductsOverviewComponent.view(state, screen, frame, area)
            }
            Screen::ProductDetail(screen) => ProductDetailComponent.view(state, screen, frame, area),
            Screen::Cart(screen) => CartComponent.view(state, screen, frame, area),
            Screen::Orders(screen) => OrdersComponent.view(state, screen, frame, area),
            Screen::UserProducts(screen) => UserProductsComponent.view(state, screen, frame, area),
            Screen::EditProduct(screen) => EditProductComponent.view(state, screen, frame, area),
        }
        log::trace!("rendered {} ({:?})", entry.route, entry.key);
    }
}

/// Centered message used for loading, empty and failed lists
pub(crate) fn placeholder(frame: &mut Frame, area: Rect, text: impl Into<Text<'static>>, style: Style) {
    let text = text.into();
    let height = text.height() as u16;
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(text).style(style).alignment(Alignment::Center),
        middle,
    );
}

/// Failed fetch with the key that retries it
pub(crate) fn fetch_error(state: &AppState, error: &str, frame: &mut Frame, area: Rect) {
    let retry = state
        .config
        .config
        .keybindings
        .describe(Action::Refresh)
        .unwrap_or_default();
    placeholder(
        frame,
        area,
        format!("An error occurred!\n{error}\n\nPress {retry} to try again"),
        state.config.config.styles.get_style("error"),
    );
}

/// `key label` pairs for the bound actions, skipping unbound ones
pub(crate) fn key_hints(state: &AppState, hints: &[(Action, &str)]) -> Line<'static> {
    let styles = &state.config.config.styles;
    let key_style = styles.get_style("accent");
    let label_style = styles.get_style("muted");
    let mut spans = vec![];
    for (action, label) in hints {
        let Some(key) = state.config.config.keybindings.describe(*action) else {
            continue;
        };
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {label}"), label_style));
    }
    Line::from(spans)
}

/// List area above a one-line key hint footer
pub(crate) fn with_footer(area: Rect) -> (Rect, Rect) {
    let [body, footer] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    (body, footer)
}

/// Stacks the form's fields top to bottom in their declared order
pub(crate) fn view_form(state: &AppState, form: &FormState, frame: &mut Frame, area: Rect) {
    let styles = &state.config.config.styles;
    let mut y = area.y;
    for (index, spec) in form.fields().iter().enumerate() {
        let field = FormField::new(spec, form.value(spec.id))
            .error(form.error_for(spec.id))
            .focused(index == form.focus())
            .styles(
                styles.get_style("title"),
                styles.get_style("field_focused"),
                styles.get_style("error"),
            );
        let height = field.height();
        if y + height > area.bottom() {
            break;
        }
        frame.render_widget(field, Rect { y, height, ..area });
        y += height;
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::mem;

    use chrono::{TimeDelta, Utc};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    use crate::{
        core::{
            cmd::Cmd,
            msg::shop::{ShopReply, ShopResponse},
            raw_msg::RawMsg,
            state::AppState,
            translator::translate_raw_to_domain,
            update::update,
        },
        domain::{
            request::RequestId,
            shop::{Product, Session},
        },
        infrastructure::config::Config,
        presentation::components::Components,
    };

    /// Drives an `AppState` through the real translator and update loop
    pub struct Harness {
        pub state: AppState,
        pub cmds: Vec<Cmd>,
    }

    impl Harness {
        pub fn new() -> Self {
            let config = Config::embedded().unwrap_or_default();
            let mut harness = Self {
                state: AppState::new(config),
                cmds: vec![],
            };
            harness.raw(RawMsg::Init);
            harness
        }

        /// Restores a live session and loads `products` into the overview
        pub fn signed_in(products: Vec<Product>) -> Self {
            let mut harness = Self::new();
            let session = Session::new("token", "u1", Utc::now() + TimeDelta::hours(1));
            harness.respond(ShopReply::SessionRestored(Some(session)));
            harness.respond(ShopReply::Products(products));
            harness
        }

        pub fn raw(&mut self, raw: RawMsg) {
            for msg in translate_raw_to_domain(raw, &self.state) {
                let state = mem::take(&mut self.state);
                let (next, cmds) = update(msg, state);
                self.state = next;
                self.cmds.extend(cmds);
            }
        }

        pub fn key(&mut self, code: KeyCode) {
            self.raw(RawMsg::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        }

        pub fn chars(&mut self, text: &str) {
            text.chars().for_each(|c| self.key(KeyCode::Char(c)));
        }

        fn last_request(&mut self) -> Option<RequestId> {
            let request = self.cmds.iter().rev().find_map(|cmd| match cmd {
                Cmd::Shop { request, .. } => Some(*request),
                _ => None,
            });
            self.cmds.clear();
            request
        }

        /// Settles the most recent backend request with `reply`
        pub fn respond(&mut self, reply: ShopReply) {
            if let Some(request) = self.last_request() {
                self.raw(RawMsg::Backend(ShopResponse::ok(request, reply)));
            }
        }

        pub fn fail(&mut self, message: &str) {
            if let Some(request) = self.last_request() {
                self.raw(RawMsg::Backend(ShopResponse::err(request, message)));
            }
        }

        /// Renders the whole UI and returns the buffer as trimmed lines
        pub fn render(&self, width: u16, height: u16) -> Vec<String> {
            let mut terminal = match Terminal::new(TestBackend::new(width, height)) {
                Ok(terminal) => terminal,
                Err(e) => panic!("test terminal: {e}"),
            };
            let components = Components::new();
            if let Err(e) = terminal.draw(|frame| components.render(frame, &self.state)) {
                panic!("draw failed: {e}");
            }
            let buffer = terminal.backend().buffer();
            (0..buffer.area.height)
                .map(|y| {
                    (0..buffer.area.width)
                        .map(|x| buffer[(x, y)].symbol())
                        .collect::<String>()
                        .trim_end()
                        .to_string()
                })
                .collect()
        }

        pub fn shows(&self, needle: &str) -> bool {
            self.render(80, 30).iter().any(|line| line.contains(needle))
        }
    }

    pub fn demo_products() -> Vec<Product> {
        vec![
            Product::new(
                "p1",
                "u1",
                "Red Shirt",
                "https://example.com/shirt.jpg",
                "A red t-shirt, perfect for days with non-red weather.",
                29.99,
            ),
            Product::new(
                "p2",
                "u2",
                "Blue Carpet",
                "https://example.com/carpet.jpg",
                "Fits your red shirt perfectly.",
                99.99,
            ),
        ]
    }
}
