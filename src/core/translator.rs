use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    core::{
        msg::{
            nav::NavMsg,
            screen::{FormMsg, ScreenMsg},
            store::SessionMsg,
            system::SystemMsg,
            ui::UiMsg,
            Msg,
        },
        raw_msg::RawMsg,
        state::AppState,
    },
    domain::navigation::{Root, Route},
    presentation::config::keybindings::Action,
};

/// Translates raw external events into domain messages
/// This function is pure and contains no side effects
pub fn translate_raw_to_domain(raw: RawMsg, state: &AppState) -> Vec<Msg> {
    match raw {
        RawMsg::Init => vec![Msg::Nav(NavMsg::to(Route::Startup))],

        // System events - direct mapping
        RawMsg::Quit => vec![Msg::System(SystemMsg::Quit)],
        RawMsg::Suspend => vec![Msg::System(SystemMsg::Suspend)],
        RawMsg::Resume => vec![Msg::System(SystemMsg::Resume)],
        RawMsg::Resize(width, height) => vec![Msg::System(SystemMsg::Resize(width, height))],

        // A session is only as good as its expiry
        RawMsg::Tick(now) => match &state.session.current {
            Some(session) if !session.is_live(now) => vec![Msg::Session(SessionMsg::Expired)],
            _ => vec![],
        },

        // User input - translate based on context and key bindings
        RawMsg::Key(key) => translate_key_event(key, state),

        RawMsg::Backend(response) => vec![Msg::Shop(response)],

        // System events
        RawMsg::SystemMessage(msg) => vec![Msg::System(SystemMsg::UpdateStatusMessage(msg))],
        RawMsg::Error(error) => vec![Msg::System(SystemMsg::ShowError(error))],

        RawMsg::Render => vec![],
    }
}

/// Translates keyboard input to domain events based on current application state
fn translate_key_event(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    // Handle global key bindings first
    match key {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => return vec![Msg::System(SystemMsg::Quit)],

        KeyEvent {
            code: KeyCode::Char('z'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => return vec![Msg::System(SystemMsg::Suspend)],

        _ => {}
    }

    // Overlays capture input before the screen underneath
    if state.system.has_alert() {
        return translate_alert_keys(key);
    }
    if state.ui.show_help {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => vec![Msg::Ui(UiMsg::ToggleHelp)],
            _ => vec![],
        };
    }
    if state.nav.is_drawer_open() {
        return translate_drawer_keys(key, state);
    }
    if state.is_editing() {
        return translate_form_keys(key, state);
    }
    translate_normal_mode_keys(key, state)
}

fn translate_alert_keys(key: KeyEvent) -> Vec<Msg> {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') => vec![Msg::System(SystemMsg::ConfirmAlert)],
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => {
            vec![Msg::System(SystemMsg::DismissAlert)]
        }
        _ => vec![],
    }
}

fn translate_drawer_keys(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => vec![Msg::Ui(UiMsg::DrawerUp)],
        KeyCode::Down | KeyCode::Char('j') => vec![Msg::Ui(UiMsg::DrawerDown)],
        KeyCode::Enter => vec![Msg::Nav(NavMsg::DrawerSelect)],
        KeyCode::Esc => vec![Msg::Nav(NavMsg::ToggleDrawer)],
        _ => match bound_action(key, state) {
            Some(Action::ToggleDrawer) => vec![Msg::Nav(NavMsg::ToggleDrawer)],
            Some(Action::Quit) => vec![Msg::System(SystemMsg::Quit)],
            _ => vec![],
        },
    }
}

/// Key bindings when a form has the focus. Text keys edit the focused field.
fn translate_form_keys(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    let form = |msg: FormMsg| vec![Msg::Screen(ScreenMsg::Form(msg))];
    let multiline = state
        .current_screen()
        .and_then(|(_, screen)| screen.form())
        .and_then(|form| form.focused_field())
        .is_some_and(|field| field.multiline);

    match key {
        KeyEvent {
            code: KeyCode::Char('s'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => vec![Msg::Screen(ScreenMsg::Submit)],

        KeyEvent {
            code: KeyCode::Char('t'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => vec![Msg::Screen(ScreenMsg::ToggleAuthMode)],

        KeyEvent {
            code: KeyCode::Esc, ..
        } => vec![Msg::Nav(NavMsg::Back)],

        KeyEvent {
            code: KeyCode::Tab | KeyCode::Down,
            ..
        } => form(FormMsg::FocusNext),

        KeyEvent {
            code: KeyCode::BackTab | KeyCode::Up,
            ..
        } => form(FormMsg::FocusPrev),

        KeyEvent {
            code: KeyCode::Enter,
            ..
        } if multiline => form(FormMsg::InsertChar('\n')),

        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => vec![Msg::Screen(ScreenMsg::Submit)],

        KeyEvent {
            code: KeyCode::Backspace,
            ..
        } => form(FormMsg::DeleteChar),

        KeyEvent {
            code: KeyCode::Char(c),
            modifiers,
            ..
        } if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            form(FormMsg::InsertChar(c))
        }

        _ => vec![],
    }
}

/// Terminals report `?` or `G` with SHIFT set; bindings may be written with
/// or without it
fn bound_action(key: KeyEvent, state: &AppState) -> Option<Action> {
    let bindings = &state.config.config.keybindings;
    bindings.get(&vec![key]).copied().or_else(|| match key.code {
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::SHIFT) => {
            let unshifted = KeyEvent::new(key.code, key.modifiers - KeyModifiers::SHIFT);
            bindings.get(&vec![unshifted]).copied()
        }
        _ => None,
    })
}

/// Key bindings when in normal navigation mode
fn translate_normal_mode_keys(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    match bound_action(key, state) {
        Some(action) => translate_action_to_msg(action, state),
        None => vec![],
    }
}

fn translate_action_to_msg(action: Action, state: &AppState) -> Vec<Msg> {
    let in_shop = state.nav.root() == Some(Root::Shop);
    match action {
        Action::Quit => vec![Msg::System(SystemMsg::Quit)],
        Action::Suspend => vec![Msg::System(SystemMsg::Suspend)],
        Action::Help => vec![Msg::Ui(UiMsg::ToggleHelp)],
        Action::ScrollUp => vec![Msg::Screen(ScreenMsg::ScrollUp)],
        Action::ScrollDown => vec![Msg::Screen(ScreenMsg::ScrollDown)],
        Action::ScrollToTop => vec![Msg::Screen(ScreenMsg::ScrollToTop)],
        Action::ScrollToBottom => vec![Msg::Screen(ScreenMsg::ScrollToBottom)],
        Action::Select => vec![Msg::Screen(ScreenMsg::Activate)],
        Action::Back => vec![Msg::Nav(NavMsg::Back)],
        Action::Refresh => vec![Msg::Screen(ScreenMsg::Refresh)],
        Action::AddToCart => vec![Msg::Screen(ScreenMsg::AddToCart)],
        Action::RemoveFromCart => vec![Msg::Screen(ScreenMsg::RemoveFromCart)],
        Action::OrderNow => vec![Msg::Screen(ScreenMsg::OrderNow)],
        Action::NewProduct => vec![Msg::Screen(ScreenMsg::NewProduct)],
        Action::EditProduct => vec![Msg::Screen(ScreenMsg::EditSelected)],
        Action::DeleteProduct => vec![Msg::Screen(ScreenMsg::DeleteSelected)],
        Action::ToggleDrawer if in_shop => vec![Msg::Nav(NavMsg::ToggleDrawer)],
        Action::OpenCart if in_shop => vec![Msg::Nav(NavMsg::to(Route::Cart))],
        Action::Logout if in_shop => vec![Msg::Session(SessionMsg::Logout)],
        Action::ToggleDrawer | Action::OpenCart | Action::Logout => vec![],
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::{state::system::Alert, update::update},
        domain::{navigation::Target, shop::Session},
        presentation::config::keybindings::parse_key_sequence,
    };

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn with_bindings(mut state: AppState) -> AppState {
        let bindings = [
            ("<q>", Action::Quit),
            ("<j>", Action::ScrollDown),
            ("<enter>", Action::Select),
            ("<c>", Action::OpenCart),
            ("<m>", Action::ToggleDrawer),
            ("<d>", Action::DeleteProduct),
            ("<?>", Action::Help),
        ];
        for (seq, action) in bindings {
            if let Ok(seq) = parse_key_sequence(seq) {
                state.config.config.keybindings.insert(seq, action);
            }
        }
        state
    }

    fn shop_state() -> AppState {
        let session = Session::starting_at("t", "u1", Utc::now(), Duration::hours(1));
        let state = with_bindings(AppState::default());
        let (state, _) = update(Msg::Session(SessionMsg::Restored(session)), state);
        let (state, _) = update(Msg::Nav(NavMsg::to(Target::Shop)), state);
        state
    }

    fn auth_state() -> AppState {
        let (state, _) = update(Msg::Nav(NavMsg::to(Route::Auth)), with_bindings(AppState::default()));
        state
    }

    #[test]
    fn test_init_starts_navigator() {
        let msgs = translate_raw_to_domain(RawMsg::Init, &AppState::default());
        assert_eq!(msgs, vec![Msg::Nav(NavMsg::to(Route::Startup))]);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let state = auth_state();
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(ctrl('c')), &state),
            vec![Msg::System(SystemMsg::Quit)]
        );
    }

    #[test]
    fn test_keybindings_drive_screen() {
        let state = shop_state();
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Char('j'))), &state),
            vec![Msg::Screen(ScreenMsg::ScrollDown)]
        );
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Char('c'))), &state),
            vec![Msg::Nav(NavMsg::to(Route::Cart))]
        );
    }

    #[test]
    fn test_shifted_char_falls_back_to_unshifted_binding() {
        let state = shop_state();
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(question), &state),
            vec![Msg::Ui(UiMsg::ToggleHelp)]
        );
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let state = shop_state();
        assert!(translate_raw_to_domain(RawMsg::Key(key(KeyCode::Char('x'))), &state).is_empty());
    }

    #[test]
    fn test_form_keys_edit_instead_of_bindings() {
        let state = auth_state();
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Char('q'))), &state),
            vec![Msg::Screen(ScreenMsg::Form(FormMsg::InsertChar('q')))]
        );
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Tab)), &state),
            vec![Msg::Screen(ScreenMsg::Form(FormMsg::FocusNext))]
        );
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Enter)), &state),
            vec![Msg::Screen(ScreenMsg::Submit)]
        );
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(ctrl('t')), &state),
            vec![Msg::Screen(ScreenMsg::ToggleAuthMode)]
        );
    }

    #[test]
    fn test_alert_captures_keys() {
        let mut state = shop_state();
        state.system.alert = Some(Alert::info("Wrong input", "Please check the errors in the form."));
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Enter)), &state),
            vec![Msg::System(SystemMsg::ConfirmAlert)]
        );
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Esc)), &state),
            vec![Msg::System(SystemMsg::DismissAlert)]
        );
        assert!(translate_raw_to_domain(RawMsg::Key(key(KeyCode::Char('j'))), &state).is_empty());
    }

    #[test]
    fn test_drawer_keys() {
        let (state, _) = update(Msg::Nav(NavMsg::ToggleDrawer), shop_state());
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Char('j'))), &state),
            vec![Msg::Ui(UiMsg::DrawerDown)]
        );
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Enter)), &state),
            vec![Msg::Nav(NavMsg::DrawerSelect)]
        );
        assert_eq!(
            translate_raw_to_domain(RawMsg::Key(key(KeyCode::Char('m'))), &state),
            vec![Msg::Nav(NavMsg::ToggleDrawer)]
        );
    }

    #[test]
    fn test_drawer_and_cart_unavailable_outside_shop() {
        let mut state = auth_state();
        // Leave the form so bindings apply
        state.screens = Default::default();
        assert!(translate_raw_to_domain(RawMsg::Key(key(KeyCode::Char('m'))), &state).is_empty());
        assert!(translate_raw_to_domain(RawMsg::Key(key(KeyCode::Char('c'))), &state).is_empty());
    }

    #[test]
    fn test_tick_expires_session() {
        let state = shop_state();
        let later = Utc::now() + Duration::hours(2);
        assert_eq!(
            translate_raw_to_domain(RawMsg::Tick(later), &state),
            vec![Msg::Session(SessionMsg::Expired)]
        );
        assert!(translate_raw_to_domain(RawMsg::Tick(Utc::now()), &state).is_empty());
    }
}
