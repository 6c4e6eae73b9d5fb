//! Directory state and its transitions.
//!
//! Every change goes through [`DirectoryState::apply`], which consumes the
//! current state and an event and returns the next state together with the
//! side effect (if any) the caller must perform. Nothing here touches the
//! network.

use std::collections::{BTreeSet, HashSet, VecDeque};

use shared::domain::{UserId, UserRecord};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    LoadSucceeded(Vec<UserRecord>),
    LoadFailed { reason: String },
    Selected(UserId),
    Deselected,
    DeleteRequested(UserId),
    Deleted(UserId),
    DeleteFailed { user_id: UserId, notice: String },
    NoticeAcknowledged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    DeleteUser(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryState {
    status: LoadStatus,
    users: Vec<UserRecord>,
    selected: Option<UserId>,
    pending_deletes: BTreeSet<UserId>,
    load_error: Option<String>,
    /// Failure notices awaiting acknowledgement, oldest first.
    notices: VecDeque<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: DirectoryState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn unchanged(state: DirectoryState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

impl DirectoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(mut self, event: StateEvent) -> Transition {
        match event {
            StateEvent::LoadSucceeded(users) => {
                if self.status != LoadStatus::Loading {
                    warn!(status = ?self.status, "ignoring late load result");
                    return Transition::unchanged(self);
                }
                self.users = dedupe_by_id(users);
                self.status = LoadStatus::Loaded;
                self.load_error = None;
            }
            StateEvent::LoadFailed { reason } => {
                if self.status != LoadStatus::Loading {
                    warn!(status = ?self.status, "ignoring late load failure");
                    return Transition::unchanged(self);
                }
                self.users.clear();
                self.status = LoadStatus::Failed;
                self.load_error = Some(reason);
            }
            StateEvent::Selected(user_id) => {
                if self.contains(user_id) {
                    self.selected = Some(user_id);
                } else {
                    debug!(user_id = user_id.0, "select ignored for unknown user");
                }
            }
            StateEvent::Deselected => {
                self.selected = None;
            }
            StateEvent::DeleteRequested(user_id) => {
                if !self.contains(user_id) {
                    debug!(user_id = user_id.0, "delete ignored for unknown user");
                    return Transition::unchanged(self);
                }
                if !self.pending_deletes.insert(user_id) {
                    debug!(user_id = user_id.0, "delete already in flight");
                    return Transition::unchanged(self);
                }
                return Transition {
                    state: self,
                    effect: Some(Effect::DeleteUser(user_id)),
                };
            }
            StateEvent::Deleted(user_id) => {
                self.pending_deletes.remove(&user_id);
                self.users.retain(|user| user.id != user_id);
                if self.selected == Some(user_id) {
                    self.selected = None;
                }
            }
            StateEvent::DeleteFailed { user_id, notice } => {
                self.pending_deletes.remove(&user_id);
                self.notices.push_back(notice);
            }
            StateEvent::NoticeAcknowledged => {
                self.notices.pop_front();
            }
        }
        Transition::unchanged(self)
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn has_error(&self) -> bool {
        self.status == LoadStatus::Failed
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn selected_id(&self) -> Option<UserId> {
        self.selected
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        let selected = self.selected?;
        self.users.iter().find(|user| user.id == selected)
    }

    pub fn is_delete_pending(&self, user_id: UserId) -> bool {
        self.pending_deletes.contains(&user_id)
    }

    pub fn pending_delete_count(&self) -> usize {
        self.pending_deletes.len()
    }

    /// The oldest unacknowledged notice.
    pub fn notice(&self) -> Option<&str> {
        self.notices.front().map(String::as_str)
    }

    pub fn queued_notice_count(&self) -> usize {
        self.notices.len()
    }

    fn contains(&self, user_id: UserId) -> bool {
        self.users.iter().any(|user| user.id == user_id)
    }
}

/// Keeps the first record for each id and preserves source order.
fn dedupe_by_id(users: Vec<UserRecord>) -> Vec<UserRecord> {
    let mut seen = HashSet::with_capacity(users.len());
    let total = users.len();
    let unique: Vec<UserRecord> = users.into_iter().filter(|user| seen.insert(user.id)).collect();
    if unique.len() != total {
        warn!(
            dropped = total - unique.len(),
            "duplicate user ids in load result"
        );
    }
    unique
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
