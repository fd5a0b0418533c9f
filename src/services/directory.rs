use crate::models::UserProfile;
use crate::services::backend::{BackendClient, BackendError};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const SNAPSHOT_KEY: &str = "directory";

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read fallback directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse fallback directory: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable view of the user directory
pub type Snapshot = Arc<Vec<UserProfile>>;

/// Directory snapshot holder
///
/// The directory is fetched wholesale and held for `ttl` as one shared
/// snapshot; a refetch replaces it entirely. When the backend is unreachable
/// the fallback dataset (or an empty list) is served and nothing is cached,
/// so the next request tries the backend again.
pub struct DirectoryCache {
    snapshots: moka::future::Cache<&'static str, Snapshot>,
    fallback: Snapshot,
    last_fetch_ok: AtomicBool,
    last_fetch_len: AtomicUsize,
}

impl DirectoryCache {
    pub fn new(ttl: Duration, fallback: Vec<UserProfile>) -> Self {
        let snapshots = moka::future::CacheBuilder::new(1)
            .time_to_live(ttl)
            .build();

        Self {
            snapshots,
            fallback: Arc::new(fallback),
            last_fetch_ok: AtomicBool::new(false),
            last_fetch_len: AtomicUsize::new(0),
        }
    }

    /// Load a fallback dataset: a JSON array of profiles
    pub fn load_fallback<P: AsRef<Path>>(path: P) -> Result<Vec<UserProfile>, DirectoryError> {
        let source = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&source)?)
    }

    /// Current snapshot, fetching it when missing or expired
    pub async fn snapshot(&self, backend: &BackendClient) -> Snapshot {
        if let Some(snapshot) = self.snapshots.get(SNAPSHOT_KEY).await {
            tracing::trace!("Directory cache hit ({} profiles)", snapshot.len());
            return snapshot;
        }

        self.refresh(backend).await
    }

    /// Fetch the directory now, replacing any cached snapshot
    pub async fn refresh(&self, backend: &BackendClient) -> Snapshot {
        match backend.fetch_directory().await {
            Ok(profiles) => {
                let snapshot: Snapshot = Arc::new(profiles);
                self.snapshots.insert(SNAPSHOT_KEY, snapshot.clone()).await;
                self.last_fetch_len.store(snapshot.len(), Ordering::Relaxed);
                self.last_fetch_ok.store(true, Ordering::Relaxed);
                tracing::info!("Directory refreshed: {} profiles", snapshot.len());
                snapshot
            }
            Err(e) => self.fall_back(e),
        }
    }

    fn fall_back(&self, error: BackendError) -> Snapshot {
        self.last_fetch_ok.store(false, Ordering::Relaxed);
        tracing::warn!(
            "Failed to fetch directory, serving fallback of {} profiles: {}",
            self.fallback.len(),
            error
        );
        self.fallback.clone()
    }

    /// Whether the most recent backend fetch succeeded (false before any fetch)
    pub fn last_fetch_ok(&self) -> bool {
        self.last_fetch_ok.load(Ordering::Relaxed)
    }

    /// Profile count of the most recent successful fetch
    pub fn last_fetch_len(&self) -> usize {
        self.last_fetch_len.load(Ordering::Relaxed)
    }

    /// Size of the cached snapshot, 0 when nothing is cached
    pub async fn cached_len(&self) -> usize {
        self.snapshots
            .get(SNAPSHOT_KEY)
            .await
            .map(|s| s.len())
            .unwrap_or(0)
    }
}

/// Look a profile up in a snapshot
pub fn find_profile<'a>(snapshot: &'a [UserProfile], user_id: &str) -> Option<&'a UserProfile> {
    snapshot.iter().find(|p| p.user_id == user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(url: String) -> BackendClient {
        BackendClient::new(url, None, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_snapshot_is_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users")
            .with_status(200)
            .with_body(r#"[{"userId": "u1"}, {"userId": "u2"}]"#)
            .expect(1)
            .create_async()
            .await;

        let backend = backend(server.url());
        let cache = DirectoryCache::new(Duration::from_secs(60), vec![]);

        assert_eq!(cache.snapshot(&backend).await.len(), 2);
        assert_eq!(cache.snapshot(&backend).await.len(), 2);
        assert_eq!(cache.cached_len().await, 2);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_failure_serves_fallback_uncached() {
        let mut server = mockito::Server::new_async().await;
        let _m1 = server.mock("GET", "/users").with_status(500).create_async().await;

        let backend = backend(server.url());
        let cache = DirectoryCache::new(Duration::from_secs(60), vec![UserProfile::new("demo")]);

        let snapshot = cache.snapshot(&backend).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].user_id, "demo");
        assert_eq!(cache.cached_len().await, 0);
        assert!(!cache.last_fetch_ok());
    }

    #[tokio::test]
    async fn test_last_fetch_outlives_cache_entry() {
        let mut server = mockito::Server::new_async().await;
        let _m2 = server
            .mock("GET", "/users")
            .with_status(200)
            .with_body(r#"[{"userId": "u1"}]"#)
            .create_async()
            .await;

        let backend = backend(server.url());
        let cache = DirectoryCache::new(Duration::from_millis(50), vec![]);

        assert!(!cache.last_fetch_ok());
        cache.refresh(&backend).await;
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(cache.cached_len().await, 0);
        assert!(cache.last_fetch_ok());
        assert_eq!(cache.last_fetch_len(), 1);
    }

    #[test]
    fn test_find_profile() {
        let profiles = vec![UserProfile::new("a"), UserProfile::new("b")];

        assert!(find_profile(&profiles, "b").is_some());
        assert!(find_profile(&profiles, "z").is_none());
    }
}
