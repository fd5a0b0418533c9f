use crate::models::UserProfile;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the Mooza backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Mooza REST backend client
///
/// Covers the calls the matching service depends on:
/// - Fetching the full user directory
/// - Fetching a single profile
/// - Reading and mutating a user's friend list
pub struct BackendClient {
    base_url: String,
    api_token: Option<String>,
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(
        base_url: String,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn check_status(status: StatusCode, what: &str) -> Result<(), BackendError> {
        match status {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::Unauthorized),
            StatusCode::NOT_FOUND => Err(BackendError::NotFound(what.to_string())),
            s => Err(BackendError::ApiError(format!("Failed to {}: {}", what, s))),
        }
    }

    /// Fetch every user profile
    ///
    /// Accepts either a bare JSON array or `{"users": [...]}`. Records that do
    /// not parse are skipped.
    pub async fn fetch_directory(&self) -> Result<Vec<UserProfile>, BackendError> {
        let url = self.url("/users");

        tracing::debug!("Fetching directory from: {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::check_status(response.status(), "fetch directory")?;

        let json: Value = response.json().await?;

        let records = match &json {
            Value::Array(items) => items,
            Value::Object(obj) => obj
                .get("users")
                .and_then(|u| u.as_array())
                .ok_or_else(|| BackendError::InvalidResponse("Missing users array".into()))?,
            _ => return Err(BackendError::InvalidResponse("Expected array or object".into())),
        };

        let profiles: Vec<UserProfile> = records
            .iter()
            .filter_map(|record| match serde_json::from_value(record.clone()) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::debug!("Skipping malformed profile record: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} profiles ({} records)", profiles.len(), records.len());

        Ok(profiles)
    }

    /// Get a single profile by user ID
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, BackendError> {
        let url = self.url(&format!("/users/{}", urlencoding::encode(user_id)));

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::check_status(response.status(), &format!("fetch profile {}", user_id))?;

        let json: Value = response.json().await?;
        let data = json.get("user").unwrap_or(&json);

        serde_json::from_value(data.clone())
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Fetch the friend ids of a user
    ///
    /// Accepts a bare array or `{"friends": [...]}`; items may be id strings
    /// or objects carrying `userId`.
    pub async fn fetch_friends(&self, user_id: &str) -> Result<Vec<String>, BackendError> {
        let url = self.url(&format!("/users/{}/friends", urlencoding::encode(user_id)));

        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::check_status(response.status(), &format!("fetch friends of {}", user_id))?;

        let json: Value = response.json().await?;

        let items = match &json {
            Value::Array(items) => items,
            Value::Object(obj) => obj
                .get("friends")
                .and_then(|f| f.as_array())
                .ok_or_else(|| BackendError::InvalidResponse("Missing friends array".into()))?,
            _ => return Err(BackendError::InvalidResponse("Expected array or object".into())),
        };

        let ids = items
            .iter()
            .filter_map(|item| match item {
                Value::String(id) => Some(id.clone()),
                Value::Object(obj) => obj
                    .get("userId")
                    .or_else(|| obj.get("id"))
                    .and_then(|id| id.as_str())
                    .map(str::to_string),
                _ => None,
            })
            .collect();

        Ok(ids)
    }

    /// Add `friend_id` to the friend list of `user_id`
    pub async fn add_friend(&self, user_id: &str, friend_id: &str) -> Result<(), BackendError> {
        let url = self.url(&format!("/users/{}/friends", urlencoding::encode(user_id)));

        let response = self
            .authorize(self.client.post(&url))
            .json(&serde_json::json!({ "friendId": friend_id }))
            .send()
            .await?;
        Self::check_status(response.status(), "add friend")?;

        tracing::debug!("Added friend: {} -> {}", user_id, friend_id);

        Ok(())
    }

    /// Remove `friend_id` from the friend list of `user_id`
    pub async fn remove_friend(&self, user_id: &str, friend_id: &str) -> Result<(), BackendError> {
        let url = self.url(&format!(
            "/users/{}/friends/{}",
            urlencoding::encode(user_id),
            urlencoding::encode(friend_id)
        ));

        let response = self.authorize(self.client.delete(&url)).send().await?;
        Self::check_status(response.status(), "remove friend")?;

        tracing::debug!("Removed friend: {} -> {}", user_id, friend_id);

        Ok(())
    }
}
