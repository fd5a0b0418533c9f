use crate::core::{Membership, MembershipError};
use crate::services::backend::{BackendClient, BackendError};
use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FriendsError {
    #[error(transparent)]
    Membership(#[from] MembershipError),

    #[error("Backend rejected friend update: {0}")]
    Backend(#[from] BackendError),
}

/// Per-viewer friend/favorite memberships
///
/// Friend changes go to the backend first and are applied locally only once
/// the backend confirms them. Favorites never leave this process.
#[derive(Default)]
pub struct FriendsService {
    memberships: DashMap<String, Membership>,
}

impl FriendsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the viewer's membership (empty if never seen)
    pub fn membership(&self, viewer_id: &str) -> Membership {
        self.memberships
            .get(viewer_id)
            .map(|m| m.clone())
            .unwrap_or_else(|| Membership::new(viewer_id))
    }

    /// Replace the viewer's friend set with the backend's
    ///
    /// On failure the current set is kept and the error is only logged.
    pub async fn sync_friends(&self, backend: &BackendClient, viewer_id: &str) -> Membership {
        match backend.fetch_friends(viewer_id).await {
            Ok(ids) => {
                let mut entry = self
                    .memberships
                    .entry(viewer_id.to_string())
                    .or_insert_with(|| Membership::new(viewer_id));
                entry.replace_friends(ids);
                tracing::debug!("Synced {} friends for {}", entry.friends().len(), viewer_id);
                entry.clone()
            }
            Err(e) => {
                tracing::warn!("Failed to fetch friends for {}, keeping local set: {}", viewer_id, e);
                self.membership(viewer_id)
            }
        }
    }

    /// Add a friend at the backend, then locally
    pub async fn add_friend(
        &self,
        backend: &BackendClient,
        viewer_id: &str,
        friend_id: &str,
    ) -> Result<bool, FriendsError> {
        // Reject self-reference before touching the backend
        if viewer_id == friend_id {
            return Err(MembershipError::SelfReference(viewer_id.to_string()).into());
        }

        backend.add_friend(viewer_id, friend_id).await?;

        let mut entry = self
            .memberships
            .entry(viewer_id.to_string())
            .or_insert_with(|| Membership::new(viewer_id));
        entry.add_friend(friend_id)?;

        tracing::info!("{} added friend {}", viewer_id, friend_id);
        Ok(entry.is_friend(friend_id))
    }

    /// Remove a friend at the backend, then locally
    pub async fn remove_friend(
        &self,
        backend: &BackendClient,
        viewer_id: &str,
        friend_id: &str,
    ) -> Result<bool, FriendsError> {
        backend.remove_friend(viewer_id, friend_id).await?;

        if let Some(mut entry) = self.memberships.get_mut(viewer_id) {
            entry.remove_friend(friend_id);
        }

        tracing::info!("{} removed friend {}", viewer_id, friend_id);
        Ok(false)
    }

    /// Toggle a favorite; returns whether the user is a favorite afterwards
    pub fn toggle_favorite(&self, viewer_id: &str, target_id: &str) -> Result<bool, FriendsError> {
        let mut entry = self
            .memberships
            .entry(viewer_id.to_string())
            .or_insert_with(|| Membership::new(viewer_id));

        Ok(entry.toggle_favorite(target_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn backend(url: String) -> BackendClient {
        BackendClient::new(url, None, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_add_friend_applies_after_success() {
        let mut server = mockito::Server::new_async().await;
        let _m1 = server
            .mock("POST", "/users/v1/friends")
            .match_body(mockito::Matcher::Json(serde_json::json!({ "friendId": "u1" })))
            .with_status(201)
            .create_async()
            .await;

        let service = FriendsService::new();
        let is_friend = service.add_friend(&backend(server.url()), "v1", "u1").await.unwrap();

        assert!(is_friend);
        assert!(service.membership("v1").is_friend("u1"));
    }

    #[tokio::test]
    async fn test_add_friend_failure_leaves_state() {
        let mut server = mockito::Server::new_async().await;
        let _m2 = server
            .mock("POST", "/users/v1/friends")
            .with_status(500)
            .create_async()
            .await;

        let service = FriendsService::new();
        let result = service.add_friend(&backend(server.url()), "v1", "u1").await;

        assert!(matches!(result, Err(FriendsError::Backend(_))));
        assert!(!service.membership("v1").is_friend("u1"));
    }

    #[tokio::test]
    async fn test_remove_friend_failure_leaves_state() {
        let mut server = mockito::Server::new_async().await;
        let _m3 = server
            .mock("GET", "/users/v1/friends")
            .with_status(200)
            .with_body(r#"["u1"]"#)
            .create_async()
            .await;
        let _m4 = server
            .mock("DELETE", "/users/v1/friends/u1")
            .with_status(503)
            .create_async()
            .await;

        let backend = backend(server.url());
        let service = FriendsService::new();
        service.sync_friends(&backend, "v1").await;

        assert!(service.remove_friend(&backend, "v1", "u1").await.is_err());
        assert!(service.membership("v1").is_friend("u1"));
    }

    #[tokio::test]
    async fn test_self_friend_never_reaches_backend() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/users/v1/friends")
            .expect(0)
            .create_async()
            .await;

        let service = FriendsService::new();
        let result = service.add_friend(&backend(server.url()), "v1", "v1").await;

        assert!(matches!(result, Err(FriendsError::Membership(_))));
        mock.assert_async().await;
    }

    #[test]
    fn test_toggle_favorite_is_local() {
        let service = FriendsService::new();

        assert!(service.toggle_favorite("v1", "u1").unwrap());
        assert!(!service.toggle_favorite("v1", "u1").unwrap());
        assert!(service.toggle_favorite("v1", "v1").is_err());
    }
}
