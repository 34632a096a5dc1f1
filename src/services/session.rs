use chrono::Utc;
use std::time::Duration;

use crate::models::{CampMatch, SessionState};

/// Per-visitor state keyed by session id
///
/// Entries expire after sitting idle; an unknown or expired id yields a fresh
/// empty session.
pub struct SessionStore {
    sessions: moka::future::Cache<String, SessionState>,
}

impl SessionStore {
    pub fn new(capacity: u64, idle_timeout_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(capacity)
            .time_to_idle(Duration::from_secs(idle_timeout_secs))
            .build();

        Self { sessions }
    }

    pub async fn get(&self, session_id: &str) -> SessionState {
        self.sessions
            .get(session_id)
            .await
            .unwrap_or_else(|| SessionState::new(session_id))
    }

    /// Read-modify-write one session as a single cache operation
    async fn update<F>(&self, session_id: &str, f: F) -> SessionState
    where
        F: FnOnce(&mut SessionState),
    {
        self.sessions
            .entry(session_id.to_string())
            .and_upsert_with(|existing| {
                let mut state = existing
                    .map(|entry| entry.into_value())
                    .unwrap_or_else(|| SessionState::new(session_id));
                f(&mut state);
                std::future::ready(state)
            })
            .await
            .into_value()
    }

    /// Remember when the session last searched and what it found
    pub async fn record_search(&self, session_id: &str, results: &[CampMatch]) -> SessionState {
        self.update(session_id, |state| {
            state.last_search = Some(Utc::now());
            state.last_results = results.to_vec();
        })
        .await
    }

    pub async fn add_favorite(&self, session_id: &str, camp_name: &str) -> SessionState {
        self.update(session_id, |state| {
            if state.add_favorite(camp_name) {
                tracing::debug!("Session {} favorited {}", session_id, camp_name);
            }
        })
        .await
    }

    pub async fn remove_favorite(&self, session_id: &str, camp_name: &str) -> SessionState {
        self.update(session_id, |state| {
            state.remove_favorite(camp_name);
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_unknown_session_is_empty() {
        let store = SessionStore::new(10, 60);
        let state = store.get("new").await;

        assert_eq!(state.session_id, "new");
        assert!(state.favorites.is_empty());
        assert!(state.last_search.is_none());
    }

    #[tokio::test]
    async fn test_favorites_persist_between_calls() {
        let store = SessionStore::new(10, 60);

        store.add_favorite("s1", "Zoo Explorers").await;
        store.add_favorite("s1", "Drama Workshop").await;
        store.add_favorite("s1", "Zoo Explorers").await;
        store.remove_favorite("s1", "Drama Workshop").await;

        assert_eq!(store.get("s1").await.favorites, vec!["Zoo Explorers"]);
        assert!(store.get("s2").await.favorites.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_favorites_are_all_kept() {
        let store = Arc::new(SessionStore::new(10, 60));

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.add_favorite("shared", &format!("Camp {}", i)).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let favorites = store.get("shared").await.favorites;
        assert_eq!(favorites.len(), 32);
        assert!((0..32).all(|i| favorites.contains(&format!("Camp {}", i))));
    }

    #[tokio::test]
    async fn test_record_search_sets_timestamp() {
        let store = SessionStore::new(10, 60);
        store.add_favorite("s1", "Zoo Explorers").await;

        let state = store.record_search("s1", &[]).await;

        assert!(state.last_search.is_some());
        assert_eq!(state.favorites, vec!["Zoo Explorers"]);
        assert_eq!(store.get("s1").await.last_search, state.last_search);
    }
}
