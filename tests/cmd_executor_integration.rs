use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use shoptui::{
    core::cmd::{ShopAction, TuiCommand},
    infrastructure::{config::Config, shop_service::ShopOperation},
    AppState, RawMsg, Runtime,
};

fn runtime() -> Runtime {
    Runtime::new(AppState::new(Config::embedded().unwrap_or_default()))
}

#[test]
fn test_startup_request_reaches_shop_channel() {
    let mut runtime = runtime();
    let (tx, mut rx) = mpsc::unbounded_channel();
    runtime.set_shop_sender(tx);

    runtime.send_raw_msg(RawMsg::Init);
    let errors = runtime.run_update_cycle();
    assert!(errors.is_empty(), "{errors:?}");

    match rx.try_recv() {
        Ok(ShopOperation::Run { session, action, .. }) => {
            assert_eq!(action, ShopAction::RestoreSession);
            assert!(session.is_none());
        }
        other => panic!("expected restore request, got {other:?}"),
    }
}

#[test]
fn test_resize_reaches_tui_channel() {
    let mut runtime = runtime();
    let (tx, mut rx) = mpsc::unbounded_channel();
    runtime.add_tui_sender(tx);

    runtime.send_raw_msg(RawMsg::Resize(100, 40));
    runtime.run_update_cycle();

    assert_eq!(
        rx.try_recv().ok(),
        Some(TuiCommand::Resize {
            width: 100,
            height: 40
        })
    );
}

#[test]
fn test_closed_shop_channel_is_reported() {
    let mut runtime = runtime();
    let (tx, rx) = mpsc::unbounded_channel();
    runtime.set_shop_sender(tx);
    drop(rx);

    runtime.send_raw_msg(RawMsg::Init);
    let errors = runtime.run_update_cycle();
    assert!(!errors.is_empty());
    assert!(errors.iter().all(|e| e.starts_with("Failed to execute")), "{errors:?}");
}

#[test]
fn test_missing_shop_service_is_not_fatal() {
    let mut runtime = runtime();
    runtime.send_raw_msg(RawMsg::Init);
    assert!(runtime.run_update_cycle().is_empty());
}
