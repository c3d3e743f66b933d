use std::{collections::VecDeque, mem};

use tokio::sync::mpsc;

use crate::{
    core::{
        cmd::{Cmd, TuiCommand},
        cmd_executor::CmdExecutor,
        msg::Msg,
        raw_msg::RawMsg,
        state::AppState,
        translator::translate_raw_to_domain,
        update::{command_error, update},
    },
    infrastructure::shop_service::ShopOperation,
};

/// Owns the state and drives translate → update → execute
pub struct Runtime {
    state: AppState,
    msg_queue: VecDeque<Msg>,
    raw_msg_queue: VecDeque<RawMsg>,
    cmd_queue: VecDeque<Cmd>,
    raw_msg_tx: mpsc::UnboundedSender<RawMsg>,
    raw_msg_rx: mpsc::UnboundedReceiver<RawMsg>,
    cmd_executor: CmdExecutor,
}

impl Runtime {
    /// Runtime whose commands go nowhere (unit tests)
    pub fn new(initial_state: AppState) -> Self {
        Self::new_with_executor(initial_state, CmdExecutor::new())
    }

    pub fn new_with_executor(initial_state: AppState, cmd_executor: CmdExecutor) -> Self {
        let (raw_msg_tx, raw_msg_rx) = mpsc::unbounded_channel();
        Self {
            state: initial_state,
            msg_queue: VecDeque::new(),
            raw_msg_queue: VecDeque::new(),
            cmd_queue: VecDeque::new(),
            raw_msg_tx,
            raw_msg_rx,
            cmd_executor,
        }
    }

    pub fn set_shop_sender(&mut self, sender: mpsc::UnboundedSender<ShopOperation>) {
        self.cmd_executor.set_shop_sender(sender);
    }

    pub fn add_tui_sender(&mut self, sender: mpsc::UnboundedSender<TuiCommand>) {
        self.cmd_executor.set_tui_sender(sender);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn send_msg(&mut self, msg: Msg) {
        self.msg_queue.push_back(msg);
    }

    pub fn send_raw_msg(&mut self, raw_msg: RawMsg) {
        self.raw_msg_queue.push_back(raw_msg);
    }

    /// Sender for external producers (shop service)
    pub fn raw_sender(&self) -> mpsc::UnboundedSender<RawMsg> {
        self.raw_msg_tx.clone()
    }

    /// Waits for the next external raw message. Cancel safe.
    pub async fn recv_raw(&mut self) -> Option<RawMsg> {
        self.raw_msg_rx.recv().await
    }

    pub fn pending_commands(&mut self) -> Vec<Cmd> {
        self.cmd_queue.drain(..).collect()
    }

    pub fn process_message(&mut self, msg: Msg) -> Vec<Cmd> {
        if msg.is_sensitive() {
            log::trace!("Processing redacted message");
        } else if !msg.is_frequent() {
            log::debug!("Processing message: {msg:?}");
        }
        let (new_state, commands) = update(msg, mem::take(&mut self.state));
        self.state = new_state;
        self.cmd_queue.extend(commands.iter().cloned());
        commands
    }

    /// Translates every queued raw message, then runs every domain message
    pub fn process_all_messages(&mut self) -> Vec<Cmd> {
        while let Ok(raw_msg) = self.raw_msg_rx.try_recv() {
            self.raw_msg_queue.push_back(raw_msg);
        }

        let mut all_commands = Vec::new();
        while let Some(raw_msg) = self.raw_msg_queue.pop_front() {
            // Each translation sees the state left by the previous one
            let domain_msgs = translate_raw_to_domain(raw_msg, &self.state);
            for msg in domain_msgs {
                all_commands.extend(self.process_message(msg));
            }
            while let Some(msg) = self.msg_queue.pop_front() {
                all_commands.extend(self.process_message(msg));
            }
        }
        while let Some(msg) = self.msg_queue.pop_front() {
            all_commands.extend(self.process_message(msg));
        }
        all_commands
    }

    /// Process all messages and execute the resulting commands. Execution
    /// failures are queued as status errors for the next cycle.
    pub fn run_update_cycle(&mut self) -> Vec<String> {
        self.process_all_messages();
        let commands = self.pending_commands();
        let errors = self.cmd_executor.execute_commands(&commands);
        for error in &errors {
            self.msg_queue.push_back(command_error(error.clone()));
        }
        errors
    }

    pub fn stats(&self) -> RuntimeStats {
        RuntimeStats {
            queued_messages: self.msg_queue.len() + self.raw_msg_queue.len(),
            queued_commands: self.cmd_queue.len(),
            products_count: self.state.products.available.len(),
            cart_lines: self.state.cart.cart.len(),
            screens_mounted: self.state.screens.len(),
            has_session: self.state.session.is_present(),
            has_shop_service: self.cmd_executor.has_shop_sender(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeStats {
    pub queued_messages: usize,
    pub queued_commands: usize,
    pub products_count: usize,
    pub cart_lines: usize,
    pub screens_mounted: usize,
    pub has_session: bool,
    pub has_shop_service: bool,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::{
            cmd::ShopAction,
            msg::{
                shop::{ShopReply, ShopResponse},
                system::SystemMsg,
            },
        },
        domain::navigation::Route,
    };

    fn started_runtime() -> (Runtime, mpsc::UnboundedReceiver<ShopOperation>) {
        let (shop_tx, shop_rx) = mpsc::unbounded_channel();
        let mut runtime = Runtime::new(AppState::default());
        runtime.set_shop_sender(shop_tx);
        runtime.send_raw_msg(RawMsg::Init);
        runtime.run_update_cycle();
        (runtime, shop_rx)
    }

    #[test]
    fn test_init_mounts_startup_and_restores_session() {
        let (runtime, mut shop_rx) = started_runtime();
        assert_eq!(runtime.state().nav.current().map(|e| e.route), Some(Route::Startup));
        assert!(matches!(
            shop_rx.try_recv(),
            Ok(ShopOperation::Run {
                action: ShopAction::RestoreSession,
                ..
            })
        ));
        assert_eq!(runtime.stats().screens_mounted, 1);
    }

    #[test]
    fn test_external_raw_messages_are_drained() {
        let (mut runtime, mut shop_rx) = started_runtime();
        let request = match shop_rx.try_recv() {
            Ok(ShopOperation::Run { request, .. }) => request,
            other => panic!("expected restore request, got {other:?}"),
        };

        let tx = runtime.raw_sender();
        let _ = tx.send(RawMsg::Backend(ShopResponse::ok(
            request,
            ShopReply::SessionRestored(None),
        )));
        runtime.run_update_cycle();

        assert_eq!(runtime.state().nav.current().map(|e| e.route), Some(Route::Auth));
        assert!(!runtime.stats().has_session);
    }

    #[test]
    fn test_command_failure_surfaces_in_status() {
        let (shop_tx, shop_rx) = mpsc::unbounded_channel();
        drop(shop_rx);
        let mut runtime = Runtime::new(AppState::default());
        runtime.set_shop_sender(shop_tx);

        runtime.send_raw_msg(RawMsg::Init);
        let errors = runtime.run_update_cycle();
        assert_eq!(errors.len(), 1);

        runtime.run_update_cycle();
        let status = runtime.state().system.status_message.clone();
        assert!(status.is_some_and(|s| s.starts_with("Error: Failed to execute restore_session")));
    }

    #[test]
    fn test_quit_message() {
        let mut runtime = Runtime::new(AppState::default());
        runtime.send_msg(Msg::System(SystemMsg::Quit));
        runtime.run_update_cycle();
        assert!(runtime.state().system.should_quit);
    }
}
