use serde::{Deserialize, Serialize};

use crate::core::{
    cmd::{Cmd, TuiCommand},
    msg::{system::SystemMsg, Msg},
};

/// Blocking dialog. `on_confirm` is dispatched when the user accepts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub on_confirm: Option<Box<Msg>>,
}

impl Alert {
    /// Alert with a single "Okay" button
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            on_confirm: None,
        }
    }

    /// Yes/No alert running `msg` on confirmation
    pub fn confirm(title: impl Into<String>, message: impl Into<String>, msg: Msg) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            on_confirm: Some(Box::new(msg)),
        }
    }

    pub fn is_confirmation(&self) -> bool {
        self.on_confirm.is_some()
    }
}

/// System-related state
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub status_message: Option<String>,
    pub alert: Option<Alert>,
}

impl SystemState {
    /// System-specific update function
    /// Returns: Generated commands and follow-up messages
    pub fn update(&mut self, msg: SystemMsg) -> (Vec<Cmd>, Vec<Msg>) {
        match msg {
            // System control
            SystemMsg::Quit => {
                self.should_quit = true;
                (vec![], vec![])
            }

            SystemMsg::Suspend => {
                self.should_suspend = true;
                (vec![], vec![])
            }

            SystemMsg::Resume => {
                self.should_suspend = false;
                (vec![], vec![])
            }

            SystemMsg::Resize(width, height) => {
                (vec![Cmd::Tui(TuiCommand::Resize { width, height })], vec![])
            }

            // Status management
            SystemMsg::UpdateStatusMessage(message) => {
                self.status_message = Some(message);
                (vec![], vec![])
            }

            SystemMsg::ClearStatusMessage => {
                self.status_message = None;
                (vec![], vec![])
            }

            SystemMsg::ShowError(error) => {
                self.status_message = Some(format!("Error: {error}"));
                (vec![], vec![])
            }

            // Alerts
            SystemMsg::ShowAlert(alert) => {
                if let Some(previous) = self.alert.replace(alert) {
                    log::debug!("Alert '{}' replaced before it was answered", previous.title);
                }
                (vec![], vec![])
            }

            SystemMsg::DismissAlert => {
                self.alert = None;
                (vec![], vec![])
            }

            SystemMsg::ConfirmAlert => {
                let follow_up = self
                    .alert
                    .take()
                    .and_then(|alert| alert.on_confirm)
                    .map(|msg| *msg);
                (vec![], follow_up.into_iter().collect())
            }
        }
    }

    pub fn has_alert(&self) -> bool {
        self.alert.is_some()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_system_state_quit_isolated() {
        let mut system = SystemState::default();
        assert!(!system.should_quit);

        let (cmds, msgs) = system.update(SystemMsg::Quit);
        assert!(system.should_quit);
        assert!(cmds.is_empty());
        assert!(msgs.is_empty());
    }

    #[test]
    fn test_system_state_suspend_resume() {
        let mut system = SystemState::default();
        system.update(SystemMsg::Suspend);
        assert!(system.should_suspend);
        system.update(SystemMsg::Resume);
        assert!(!system.should_suspend);
    }

    #[test]
    fn test_system_state_resize_generates_tui_cmd() {
        let mut system = SystemState::default();
        let (cmds, _) = system.update(SystemMsg::Resize(120, 40));
        assert_eq!(
            cmds,
            vec![Cmd::Tui(TuiCommand::Resize {
                width: 120,
                height: 40
            })]
        );
    }

    #[test]
    fn test_show_error_prefixes_status() {
        let mut system = SystemState::default();
        system.update(SystemMsg::ShowError("boom".to_string()));
        assert_eq!(system.status_message.as_deref(), Some("Error: boom"));

        system.update(SystemMsg::ClearStatusMessage);
        assert_eq!(system.status_message, None);
    }

    #[test]
    fn test_confirm_alert_emits_follow_up() {
        let mut system = SystemState::default();
        system.update(SystemMsg::ShowAlert(Alert::confirm(
            "Are you sure?",
            "Do you really want to delete this item?",
            Msg::System(SystemMsg::Quit),
        )));
        assert!(system.has_alert());

        let (_, msgs) = system.update(SystemMsg::ConfirmAlert);
        assert_eq!(msgs, vec![Msg::System(SystemMsg::Quit)]);
        assert!(!system.has_alert());
    }

    #[test]
    fn test_dismiss_alert_drops_follow_up() {
        let mut system = SystemState::default();
        system.update(SystemMsg::ShowAlert(Alert::confirm(
            "Are you sure?",
            "Do you really want to delete this item?",
            Msg::System(SystemMsg::Quit),
        )));
        let (_, msgs) = system.update(SystemMsg::DismissAlert);
        assert!(msgs.is_empty());
        assert!(!system.has_alert());

        // Confirming with no alert open is a no-op
        let (_, msgs) = system.update(SystemMsg::ConfirmAlert);
        assert!(msgs.is_empty());
    }
}
