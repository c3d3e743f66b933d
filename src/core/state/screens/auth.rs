use lazy_static::lazy_static;

use crate::{
    core::{
        cmd::ShopAction,
        msg::{
            nav::NavMsg,
            screen::{FormMsg, ScreenMsg},
            shop::ShopResponse,
        },
        state::screens::ScreenCtx,
    },
    domain::{
        form::{FieldId, FieldSpec, FormState},
        navigation::Target,
        request::AsyncSlot,
        shop::Secret,
    },
};

pub const EMAIL: FieldId = FieldId::new("email");
pub const PASSWORD: FieldId = FieldId::new("password");

lazy_static! {
    static ref AUTH_FIELDS: Vec<FieldSpec> = vec![
        FieldSpec::new("email", "E-Mail")
            .required()
            .email()
            .error_text("Please enter a valid email address."),
        FieldSpec::new("password", "Password")
            .required()
            .min_length(5)
            .secure()
            .error_text("Please enter a valid password."),
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn submit_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::Signup => "Sign Up",
        }
    }

    pub fn switch_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Switch to Sign Up",
            AuthMode::Signup => "Switch to Login",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthScreen {
    pub form: FormState,
    pub mode: AuthMode,
    pub submit: AsyncSlot,
}

impl Default for AuthScreen {
    fn default() -> Self {
        Self {
            form: FormState::blank(AUTH_FIELDS.clone()),
            mode: AuthMode::default(),
            submit: AsyncSlot::default(),
        }
    }
}

impl AuthScreen {
    pub fn update(&mut self, msg: ScreenMsg, ctx: &mut ScreenCtx) {
        // The form is frozen while a request is in flight
        if self.submit.is_loading() {
            return;
        }
        match msg {
            ScreenMsg::Form(form_msg) => apply_form_msg(&mut self.form, form_msg),
            ScreenMsg::ToggleAuthMode => {
                self.mode = match self.mode {
                    AuthMode::Login => AuthMode::Signup,
                    AuthMode::Signup => AuthMode::Login,
                };
            }
            ScreenMsg::Submit => self.submit(ctx),
            _ => {}
        }
    }

    fn submit(&mut self, ctx: &mut ScreenCtx) {
        if !self.form.is_valid() {
            self.form.touch_all();
            ctx.dispatch.wrong_input();
            return;
        }
        let email = self.form.value(EMAIL).trim().to_string();
        let password = Secret::from(self.form.value(PASSWORD));
        let action = match self.mode {
            AuthMode::Login => ShopAction::Login { email, password },
            AuthMode::Signup => ShopAction::Signup { email, password },
        };
        ctx.dispatch.shop(&mut self.submit, action);
    }

    pub fn settle(&mut self, response: &ShopResponse, ctx: &mut ScreenCtx) -> bool {
        if !self.submit.settle(response.request, response.outcome()) {
            return false;
        }
        match response.outcome() {
            Ok(()) => ctx.dispatch.emit(NavMsg::to(Target::Shop)),
            Err(message) => ctx.dispatch.error_alert(message),
        }
        true
    }
}

/// Applies one editing message to a form
pub fn apply_form_msg(form: &mut FormState, msg: FormMsg) {
    match msg {
        FormMsg::InsertChar(c) => form.insert_char(c),
        FormMsg::DeleteChar => form.delete_char(),
        FormMsg::FocusNext => form.focus_next(),
        FormMsg::FocusPrev => form.focus_prev(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::{
            msg::{shop::ShopReply, system::SystemMsg, Msg},
            state::{
                screens::test_support::{request_of, shop_actions, Fixture},
                system::Alert,
            },
        },
        domain::shop::Session,
    };

    fn type_text(screen: &mut AuthScreen, fixture: &mut Fixture, text: &str) {
        for c in text.chars() {
            fixture.run(|ctx| screen.update(ScreenMsg::Form(FormMsg::InsertChar(c)), ctx));
        }
    }

    fn filled_screen(fixture: &mut Fixture) -> AuthScreen {
        let mut screen = AuthScreen::default();
        type_text(&mut screen, fixture, "test@test.com");
        fixture.run(|ctx| screen.update(ScreenMsg::Form(FormMsg::FocusNext), ctx));
        type_text(&mut screen, fixture, "secret");
        screen
    }

    #[test]
    fn test_submit_invalid_form_shows_alert() {
        let mut fixture = Fixture::default();
        let mut screen = AuthScreen::default();

        let (_, cmds, msgs) = fixture.run(|ctx| screen.update(ScreenMsg::Submit, ctx));
        assert!(cmds.is_empty());
        assert_eq!(
            msgs,
            vec![Msg::System(SystemMsg::ShowAlert(Alert::info(
                "Wrong input",
                "Please check the errors in the form."
            )))]
        );
        assert_eq!(screen.form.error_for(EMAIL), Some("Please enter a valid email address."));
    }

    #[test]
    fn test_submit_valid_form_logs_in() {
        let mut fixture = Fixture::default();
        let mut screen = filled_screen(&mut fixture);
        assert!(screen.form.is_valid());

        let (_, cmds, _) = fixture.run(|ctx| screen.update(ScreenMsg::Submit, ctx));
        assert_eq!(
            shop_actions(&cmds),
            vec![&ShopAction::Login {
                email: "test@test.com".to_string(),
                password: "secret".into(),
            }]
        );
        assert!(screen.submit.is_loading());
    }

    #[test]
    fn test_toggle_mode_signs_up() {
        let mut fixture = Fixture::default();
        let mut screen = filled_screen(&mut fixture);
        fixture.run(|ctx| screen.update(ScreenMsg::ToggleAuthMode, ctx));
        assert_eq!(screen.mode, AuthMode::Signup);

        let (_, cmds, _) = fixture.run(|ctx| screen.update(ScreenMsg::Submit, ctx));
        assert!(matches!(shop_actions(&cmds).as_slice(), [ShopAction::Signup { .. }]));
    }

    #[test]
    fn test_success_navigates_to_shop() {
        let mut fixture = Fixture::default();
        let mut screen = filled_screen(&mut fixture);
        let (_, cmds, _) = fixture.run(|ctx| screen.update(ScreenMsg::Submit, ctx));
        let session = Session::starting_at("t", "u1", Utc::now(), Duration::hours(1));
        let response = ShopResponse::ok(request_of(&cmds).unwrap(), ShopReply::Authenticated(session));

        let (accepted, _, msgs) = fixture.run(|ctx| screen.settle(&response, ctx));
        assert!(accepted);
        assert_eq!(msgs, vec![Msg::Nav(NavMsg::to(Target::Shop))]);
        assert!(!screen.submit.is_loading());
    }

    #[test]
    fn test_failure_shows_error_alert() {
        let mut fixture = Fixture::default();
        let mut screen = filled_screen(&mut fixture);
        let (_, cmds, _) = fixture.run(|ctx| screen.update(ScreenMsg::Submit, ctx));
        let response = ShopResponse::err(request_of(&cmds).unwrap(), "This password is not valid!");

        let (_, _, msgs) = fixture.run(|ctx| screen.settle(&response, ctx));
        assert_eq!(
            msgs,
            vec![Msg::System(SystemMsg::ShowAlert(Alert::info(
                "An error occurred!",
                "This password is not valid!"
            )))]
        );
    }

    #[test]
    fn test_input_ignored_while_loading() {
        let mut fixture = Fixture::default();
        let mut screen = filled_screen(&mut fixture);
        fixture.run(|ctx| screen.update(ScreenMsg::Submit, ctx));
        let before = screen.form.clone();

        type_text(&mut screen, &mut fixture, "x");
        assert_eq!(screen.form, before);
    }
}
