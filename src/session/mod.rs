//! Signed-in user identity.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Stable identifier of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub display_name: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Per-call view of who is signed in. Results are only recorded when a user is present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    user: Option<UserIdentity>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserIdentity) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().map(|u| &u.id)
    }
}

/// Owns the sign-in state and hands out [`SessionContext`] snapshots.
#[derive(Debug, Default)]
pub struct SessionManager {
    current: RwLock<Option<UserIdentity>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign a user in, replacing any previous user.
    pub fn sign_in(&self, user: UserIdentity) -> SessionContext {
        tracing::info!(user = %user.id, "Signed in");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());
        SessionContext::signed_in(user)
    }

    /// Sign out. Returns the user that was signed in, if any.
    pub fn sign_out(&self) -> Option<UserIdentity> {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(ref user) = previous {
            tracing::info!(user = %user.id, "Signed out");
        }
        previous
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> SessionContext {
        SessionContext {
            user: self
                .current
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_anonymous() {
        let manager = SessionManager::new();
        assert_eq!(manager.current(), SessionContext::anonymous());
        assert!(manager.current().user_id().is_none());
    }

    #[test]
    fn sign_in_and_out() {
        let manager = SessionManager::new();
        let session = manager.sign_in(UserIdentity::new("u-1").with_display_name("Ada"));
        assert_eq!(session.user_id().map(UserId::as_str), Some("u-1"));
        assert_eq!(manager.current(), session);

        let previous = manager.sign_out().unwrap();
        assert_eq!(previous.display_name.as_deref(), Some("Ada"));
        assert!(manager.current().user().is_none());
        assert!(manager.sign_out().is_none());
    }

    #[test]
    fn snapshots_do_not_follow_later_sign_out() {
        let manager = SessionManager::new();
        let session = manager.sign_in(UserIdentity::new("u-2"));
        manager.sign_out();
        assert_eq!(session.user_id().map(UserId::as_str), Some("u-2"));
    }
}
