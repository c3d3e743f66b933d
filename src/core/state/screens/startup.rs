use crate::{
    core::{
        cmd::ShopAction,
        msg::{
            nav::NavMsg,
            shop::{ShopReply, ShopResponse},
        },
        state::screens::ScreenCtx,
    },
    domain::{
        navigation::{Route, Target},
        request::AsyncSlot,
    },
};

/// Loads the persisted session, then leaves for the Shop or Auth root
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartupScreen {
    pub restore: AsyncSlot,
}

impl StartupScreen {
    pub fn mount(ctx: &mut ScreenCtx) -> Self {
        let mut screen = Self::default();
        ctx.dispatch.shop(&mut screen.restore, ShopAction::RestoreSession);
        screen
    }

    pub fn settle(&mut self, response: &ShopResponse, ctx: &mut ScreenCtx) -> bool {
        if !self.restore.settle(response.request, response.outcome()) {
            return false;
        }
        let target = match &response.result {
            Ok(ShopReply::SessionRestored(Some(_))) => Target::Shop,
            Ok(_) => Target::Route(Route::Auth),
            Err(message) => {
                log::warn!("Could not restore session: {message}");
                Target::Route(Route::Auth)
            }
        };
        ctx.dispatch.emit(NavMsg::to(target));
        true
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::{
            msg::Msg,
            state::screens::test_support::{request_of, shop_actions, Fixture},
        },
        domain::shop::Session,
    };

    #[test]
    fn test_mount_restores_session() {
        let mut fixture = Fixture::default();
        let (screen, cmds, _) = fixture.run(StartupScreen::mount);

        assert!(screen.restore.is_loading());
        assert_eq!(shop_actions(&cmds), vec![&ShopAction::RestoreSession]);
    }

    #[test]
    fn test_restored_session_goes_to_shop() {
        let mut fixture = Fixture::default();
        let (mut screen, cmds, _) = fixture.run(StartupScreen::mount);
        let request = request_of(&cmds).unwrap();
        let session = Session::starting_at("t", "u1", Utc::now(), Duration::hours(1));
        let response = ShopResponse::ok(request, ShopReply::SessionRestored(Some(session)));

        let (accepted, _, msgs) = fixture.run(|ctx| screen.settle(&response, ctx));
        assert!(accepted);
        assert_eq!(msgs, vec![Msg::Nav(NavMsg::to(Target::Shop))]);
    }

    #[test]
    fn test_missing_session_goes_to_auth() {
        let mut fixture = Fixture::default();
        let (mut screen, cmds, _) = fixture.run(StartupScreen::mount);
        let response = ShopResponse::ok(request_of(&cmds).unwrap(), ShopReply::SessionRestored(None));

        let (_, _, msgs) = fixture.run(|ctx| screen.settle(&response, ctx));
        assert_eq!(msgs, vec![Msg::Nav(NavMsg::to(Route::Auth))]);
    }
}
