//! UI/backend events and error modeling for desktop GUI controller.

use client_core::ClientError;
use shared::domain::{UserId, UserRecord};

/// Results reported by the backend worker.
#[derive(Debug)]
pub enum UiEvent {
    UsersLoaded(Vec<UserRecord>),
    LoadFailed(UiError),
    UserDeleted { user_id: UserId },
    DeleteFailed { user_id: UserId, error: UiError },
    Error(UiError),
}

/// Messages emitted by views towards the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMessage {
    Select { user_id: UserId },
    Delete { user_id: UserId },
    Dismiss(DismissReason),
    AcknowledgeNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    CloseControl,
    OutsideClick,
    EscapeKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Server,
    Decode,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadUsers,
    DeleteUser,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Transport(_) => UiErrorCategory::Transport,
            ClientError::Rejected(_) => UiErrorCategory::Server,
            ClientError::Decode(_) => UiErrorCategory::Decode,
            ClientError::InvalidBaseUrl { .. } | ClientError::ClientBuild(_) => {
                UiErrorCategory::Unknown
            }
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("status") || message_lower.contains("rejected") {
            UiErrorCategory::Server
        } else if message_lower.contains("malformed") || message_lower.contains("decode") {
            UiErrorCategory::Decode
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Text shown to the user. Detail stays in `message` and the log.
    pub fn notice(&self) -> &'static str {
        match (self.context, self.category) {
            (UiErrorContext::BackendStartup, _) => {
                "Backend worker startup failure; restart the application."
            }
            (UiErrorContext::LoadUsers, _) => "Failed to load users.",
            (UiErrorContext::DeleteUser, UiErrorCategory::Server) => {
                "Failed to delete user on server."
            }
            (UiErrorContext::DeleteUser, _) => "Network error while deleting user.",
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
