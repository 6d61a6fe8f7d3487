//! In-memory history, used by tests and as the default store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::HistoryRecorder;
use crate::error::AtelierError;
use crate::session::UserId;
use crate::types::{HistoryEntry, NewHistoryEntry};

#[derive(Debug, Default)]
pub struct InMemoryHistory {
    entries: RwLock<HashMap<UserId, Vec<HistoryEntry>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries across all users.
    pub async fn len(&self) -> usize {
        self.entries.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl HistoryRecorder for InMemoryHistory {
    async fn append(
        &self,
        user: &UserId,
        entry: NewHistoryEntry,
    ) -> Result<HistoryEntry, AtelierError> {
        let stored = entry.stamp();
        self.entries
            .write()
            .await
            .entry(user.clone())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, user: &UserId) -> Result<Vec<HistoryEntry>, AtelierError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(user)
            .map(|list| list.iter().rev().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::Locator;
    use crate::types::{ArtifactKind, GeneratedArtifact};

    fn entry(prompt: &str) -> NewHistoryEntry {
        NewHistoryEntry::new(
            ArtifactKind::Image,
            prompt,
            GeneratedArtifact {
                locator: Locator::data_url("image/png", prompt.as_bytes()),
                caption: format!("caption for {prompt}"),
            },
        )
    }

    #[tokio::test]
    async fn list_is_newest_first_and_per_user() {
        let history = InMemoryHistory::new();
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        history.append(&alice, entry("first")).await.unwrap();
        history.append(&alice, entry("second")).await.unwrap();
        history.append(&bob, entry("other")).await.unwrap();

        let listed = history.list(&alice).await.unwrap();
        let prompts: Vec<_> = listed.iter().map(|e| e.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["second", "first"]);
        assert_eq!(history.len().await, 3);
    }

    #[tokio::test]
    async fn unknown_user_has_empty_history() {
        let history = InMemoryHistory::new();
        assert!(history.list(&UserId::new("nobody")).await.unwrap().is_empty());
        assert!(history.is_empty().await);
    }

    #[tokio::test]
    async fn append_assigns_distinct_ids() {
        let history = InMemoryHistory::new();
        let user = UserId::new("u");
        let a = history.append(&user, entry("a")).await.unwrap();
        let b = history.append(&user, entry("a")).await.unwrap();
        assert_ne!(a.id, b.id);
    }
}
