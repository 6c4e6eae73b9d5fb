//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::UserDirectory;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Each command runs as its own task, so a
/// slow delete never holds up another one.
pub fn launch(
    directory: Arc<dyn UserDirectory>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                let directory = Arc::clone(&directory);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let name = cmd.name();
                    let event = execute(directory.as_ref(), cmd).await;
                    deliver(ui_tx, event, name).await;
                });
            }
            tracing::info!("ui command queue closed; backend worker stopping");
        });
    });
}

/// Hands a completion to the UI, waiting for queue space when it is full.
/// Returns false only once the UI side has gone away.
pub async fn deliver(ui_tx: Sender<UiEvent>, event: UiEvent, command: &'static str) -> bool {
    let sent = tokio::task::spawn_blocking(move || ui_tx.send(event)).await;
    match sent {
        Ok(Ok(())) => true,
        Ok(Err(_)) => {
            tracing::warn!(command, "ui event queue closed; dropping completion");
            false
        }
        Err(err) => {
            tracing::error!(command, "event delivery task failed: {err}");
            false
        }
    }
}

pub async fn execute(directory: &dyn UserDirectory, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LoadUsers => match directory.list_users().await {
            Ok(users) => UiEvent::UsersLoaded(users),
            Err(err) => {
                tracing::error!("failed to load users: {err}");
                UiEvent::LoadFailed(UiError::from_client_error(UiErrorContext::LoadUsers, &err))
            }
        },
        BackendCommand::DeleteUser { user_id } => match directory.delete_user(user_id).await {
            Ok(()) => UiEvent::UserDeleted { user_id },
            Err(err) => {
                tracing::warn!(user_id = user_id.0, "failed to delete user: {err}");
                UiEvent::DeleteFailed {
                    user_id,
                    error: UiError::from_client_error(UiErrorContext::DeleteUser, &err),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use client_core::ClientError;
    use shared::{
        domain::{UserId, UserRecord},
        error::ApiError,
    };

    use crate::controller::events::UiErrorCategory;

    struct FailingDirectory {
        status: u16,
    }

    #[async_trait]
    impl UserDirectory for FailingDirectory {
        async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError> {
            Err(ApiError::from_status(self.status, "Internal Server Error").into())
        }

        async fn delete_user(&self, _user_id: UserId) -> Result<(), ClientError> {
            Err(ApiError::from_status(self.status, "Not Found").into())
        }
    }

    struct EmptyDirectory;

    #[async_trait]
    impl UserDirectory for EmptyDirectory {
        async fn list_users(&self) -> Result<Vec<UserRecord>, ClientError> {
            Ok(Vec::new())
        }

        async fn delete_user(&self, _user_id: UserId) -> Result<(), ClientError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_failure_becomes_load_failed_event() {
        let event = execute(&FailingDirectory { status: 500 }, BackendCommand::LoadUsers).await;
        match event {
            UiEvent::LoadFailed(err) => {
                assert_eq!(err.context(), UiErrorContext::LoadUsers);
                assert_eq!(err.category(), UiErrorCategory::Server);
            }
            _ => panic!("expected LoadFailed"),
        }
    }

    #[tokio::test]
    async fn rejected_delete_keeps_user_id() {
        let event = execute(
            &FailingDirectory { status: 404 },
            BackendCommand::DeleteUser { user_id: UserId(1) },
        )
        .await;
        match event {
            UiEvent::DeleteFailed { user_id, error } => {
                assert_eq!(user_id, UserId(1));
                assert_eq!(error.notice(), "Failed to delete user on server.");
            }
            _ => panic!("expected DeleteFailed"),
        }
    }

    #[tokio::test]
    async fn confirmed_delete_becomes_user_deleted_event() {
        let event = execute(&EmptyDirectory, BackendCommand::DeleteUser { user_id: UserId(3) }).await;
        assert!(matches!(event, UiEvent::UserDeleted { user_id } if user_id == UserId(3)));
    }

    #[tokio::test]
    async fn completion_waits_for_queue_space() {
        let (ui_tx, ui_rx) = crossbeam_channel::bounded(1);
        ui_tx
            .try_send(UiEvent::UserDeleted { user_id: UserId(1) })
            .expect("fill queue");

        let delivery = tokio::spawn(deliver(
            ui_tx,
            UiEvent::UserDeleted { user_id: UserId(2) },
            "delete_user",
        ));
        let drained = tokio::task::spawn_blocking(move || {
            let timeout = Duration::from_secs(5);
            [ui_rx.recv_timeout(timeout), ui_rx.recv_timeout(timeout)]
        })
        .await
        .expect("drain queue");

        assert!(delivery.await.expect("delivery task"));
        let delivered: Vec<UserId> = drained
            .into_iter()
            .map(|event| match event {
                Ok(UiEvent::UserDeleted { user_id }) => user_id,
                other => panic!("unexpected event: {other:?}"),
            })
            .collect();
        assert_eq!(delivered, vec![UserId(1), UserId(2)]);
    }

    #[tokio::test]
    async fn completion_for_closed_ui_is_reported_undelivered() {
        let (ui_tx, ui_rx) = crossbeam_channel::bounded(1);
        drop(ui_rx);
        let delivered = deliver(ui_tx, UiEvent::UserDeleted { user_id: UserId(1) }, "delete_user").await;
        assert!(!delivered);
    }

    #[tokio::test]
    async fn empty_load_is_still_a_success() {
        let event = execute(&EmptyDirectory, BackendCommand::LoadUsers).await;
        assert!(matches!(event, UiEvent::UsersLoaded(users) if users.is_empty()));
    }
}
