use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::{
    core::cmd::{Cmd, TuiCommand},
    infrastructure::shop_service::ShopOperation,
};

/// Routes commands to the shop service and the host (resize)
#[derive(Clone, Default)]
pub struct CmdExecutor {
    shop_sender: Option<mpsc::UnboundedSender<ShopOperation>>,
    tui_sender: Option<mpsc::UnboundedSender<TuiCommand>>,
}

impl CmdExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_shop(shop_sender: mpsc::UnboundedSender<ShopOperation>) -> Self {
        Self {
            shop_sender: Some(shop_sender),
            ..Self::default()
        }
    }

    pub fn set_shop_sender(&mut self, shop_sender: mpsc::UnboundedSender<ShopOperation>) {
        self.shop_sender = Some(shop_sender);
    }

    /// Inject TUI command sender for executing TuiCommand asynchronously.
    pub fn set_tui_sender(&mut self, sender: mpsc::UnboundedSender<TuiCommand>) {
        self.tui_sender = Some(sender);
    }

    fn send_shop(&self, op: ShopOperation) -> Result<()> {
        match &self.shop_sender {
            Some(sender) => sender.send(op)?,
            None => log::warn!("{} ignored: ShopService not available", op.name()),
        }
        Ok(())
    }

    pub fn execute_command(&self, cmd: &Cmd) -> Result<()> {
        match cmd {
            Cmd::Shop {
                request,
                session,
                action,
            } => {
                log::debug!("CmdExecutor: request {request} {}", action.name());
                self.send_shop(ShopOperation::Run {
                    request: *request,
                    session: session.clone(),
                    action: action.clone(),
                })?;
            }

            Cmd::CancelRequest { request } => {
                self.send_shop(ShopOperation::Cancel { request: *request })?;
            }

            Cmd::SaveSession(session) => {
                self.send_shop(ShopOperation::SaveSession(session.clone()))?;
            }

            Cmd::ClearSession => {
                self.send_shop(ShopOperation::ClearSession)?;
            }

            Cmd::Tui(TuiCommand::Resize { width, height }) => {
                if let Some(tx) = &self.tui_sender {
                    let _ = tx.send(TuiCommand::Resize {
                        width: *width,
                        height: *height,
                    });
                } else {
                    log::warn!(
                        "CmdExecutor: TUI sender not configured; dropping Resize command {width}x{height}"
                    );
                }
            }
        }

        Ok(())
    }

    /// Executes every command; failures are logged and returned as messages
    pub fn execute_commands(&self, commands: &[Cmd]) -> Vec<String> {
        commands
            .iter()
            .filter_map(|cmd| match self.execute_command(cmd) {
                Ok(()) => None,
                Err(e) => {
                    let error_msg = format!("Failed to execute {}: {e}", cmd.name());
                    log::error!("{error_msg}");
                    Some(error_msg)
                }
            })
            .collect()
    }

    pub fn has_shop_sender(&self) -> bool {
        self.shop_sender.is_some()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::cmd::ShopAction,
        domain::{request::RequestIds, shop::Session},
    };

    fn create_test_executor() -> (CmdExecutor, mpsc::UnboundedReceiver<ShopOperation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (CmdExecutor::new_with_shop(tx), rx)
    }

    #[test]
    fn test_shop_command_is_forwarded_with_session() -> Result<()> {
        let (executor, mut rx) = create_test_executor();
        let request = RequestIds::default().next_id();
        let session = Session::starting_at("t", "u1", Utc::now(), Duration::hours(1));

        executor.execute_command(&Cmd::Shop {
            request,
            session: Some(session.clone()),
            action: ShopAction::FetchOrders,
        })?;

        assert_eq!(
            rx.try_recv().ok(),
            Some(ShopOperation::Run {
                request,
                session: Some(session),
                action: ShopAction::FetchOrders,
            })
        );
        Ok(())
    }

    #[test]
    fn test_commands_are_forwarded_in_order() -> Result<()> {
        let (executor, mut rx) = create_test_executor();
        let request = RequestIds::default().next_id();

        let errors = executor.execute_commands(&[Cmd::CancelRequest { request }, Cmd::ClearSession]);
        assert!(errors.is_empty());

        assert_eq!(rx.try_recv().ok(), Some(ShopOperation::Cancel { request }));
        assert_eq!(rx.try_recv().ok(), Some(ShopOperation::ClearSession));
        assert!(rx.try_recv().is_err());
        Ok(())
    }

    #[test]
    fn test_without_shop_sender_commands_are_dropped() -> Result<()> {
        let executor = CmdExecutor::new();
        assert!(!executor.has_shop_sender());
        executor.execute_command(&Cmd::ClearSession)?;
        Ok(())
    }

    #[test]
    fn test_closed_service_reports_failure() {
        let (executor, rx) = create_test_executor();
        drop(rx);
        let errors = executor.execute_commands(&[Cmd::ClearSession]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Failed to execute ClearSession"));
    }

    #[test]
    fn test_resize_reaches_host() -> Result<()> {
        let mut executor = CmdExecutor::new();
        let (tui_tx, mut tui_rx) = mpsc::unbounded_channel();
        executor.set_tui_sender(tui_tx);

        executor.execute_command(&Cmd::Tui(TuiCommand::Resize {
            width: 80,
            height: 24,
        }))?;

        assert_eq!(
            tui_rx.try_recv().ok(),
            Some(TuiCommand::Resize {
                width: 80,
                height: 24
            })
        );
        Ok(())
    }
}
