//! Backend commands queued from UI to backend worker.

use shared::domain::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    LoadUsers,
    DeleteUser { user_id: UserId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadUsers => "load_users",
            Self::DeleteUser { .. } => "delete_user",
        }
    }
}
