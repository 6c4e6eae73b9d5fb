//! Single owner of the directory state. Views and the backend worker only
//! talk to it through [`ViewMessage`] and [`UiEvent`].

use client_core::{DirectoryState, Effect, StateEvent};
use crossbeam_channel::Sender;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent, ViewMessage};
use crate::controller::orchestration::dispatch_backend_command;

pub struct Coordinator {
    state: DirectoryState,
    cmd_tx: Sender<BackendCommand>,
    status: String,
}

impl Coordinator {
    /// Creates the coordinator and queues the one and only user list fetch.
    pub fn start(cmd_tx: Sender<BackendCommand>) -> Self {
        let mut coordinator = Self {
            state: DirectoryState::new(),
            cmd_tx,
            status: "Loading users...".to_string(),
        };
        if !dispatch_backend_command(
            &coordinator.cmd_tx,
            BackendCommand::LoadUsers,
            &mut coordinator.status,
        ) {
            let reason = coordinator.status.clone();
            coordinator.transition(StateEvent::LoadFailed { reason });
        }
        coordinator
    }

    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn handle_view_message(&mut self, message: ViewMessage) {
        let event = match message {
            ViewMessage::Select { user_id } => StateEvent::Selected(user_id),
            ViewMessage::Delete { user_id } => StateEvent::DeleteRequested(user_id),
            ViewMessage::Dismiss(reason) => {
                tracing::debug!(?reason, "detail overlay dismissed");
                StateEvent::Deselected
            }
            ViewMessage::AcknowledgeNotice => StateEvent::NoticeAcknowledged,
        };
        self.transition(event);
    }

    pub fn handle_ui_event(&mut self, event: UiEvent) {
        let state_event = match event {
            UiEvent::UsersLoaded(users) => {
                self.status = format!("Loaded {} users", users.len());
                StateEvent::LoadSucceeded(users)
            }
            UiEvent::LoadFailed(err) => {
                self.status = err.notice().to_string();
                StateEvent::LoadFailed {
                    reason: err.message().to_string(),
                }
            }
            UiEvent::UserDeleted { user_id } => {
                self.status = format!("Deleted user {user_id}");
                StateEvent::Deleted(user_id)
            }
            UiEvent::DeleteFailed { user_id, error } => {
                tracing::warn!(user_id = user_id.0, category = ?error.category(), "delete not applied");
                self.status = format!("Delete of user {user_id} failed: {}", error.message());
                StateEvent::DeleteFailed {
                    user_id,
                    notice: error.notice().to_string(),
                }
            }
            UiEvent::Error(err) => {
                tracing::error!(context = ?err.context(), "backend error: {}", err.message());
                self.status = format!("{}: {}", err.notice(), err.message());
                if !self.state.is_loading() {
                    return;
                }
                StateEvent::LoadFailed {
                    reason: err.message().to_string(),
                }
            }
        };
        self.transition(state_event);
    }

    fn transition(&mut self, event: StateEvent) {
        let transition = std::mem::take(&mut self.state).apply(event);
        self.state = transition.state;
        if let Some(effect) = transition.effect {
            self.perform(effect);
        }
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::DeleteUser(user_id) => {
                let queued = dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::DeleteUser { user_id },
                    &mut self.status,
                );
                if !queued {
                    let error = UiError::from_message(UiErrorContext::DeleteUser, self.status.clone());
                    self.transition(StateEvent::DeleteFailed {
                        user_id,
                        notice: error.notice().to_string(),
                    });
                }
            }
        }
    }
}
