use serde::{Deserialize, Serialize};
use crate::core::taxonomy::TagPath;
use crate::models::domain::MatchResult;

/// Response for the search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub matches: Vec<MatchResult>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "totalMatched")]
    pub total_matched: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "directorySize")]
    pub directory_size: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Friend list of one viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendsResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub friends: Vec<String>,
    pub favorites: Vec<String>,
}

/// Outcome of a friend mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendMutationResponse {
    pub success: bool,
    #[serde(rename = "isFriend")]
    pub is_friend: bool,
}

/// Outcome of a favorite toggle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteToggleResponse {
    pub success: bool,
    #[serde(rename = "isFavorite")]
    pub is_favorite: bool,
}

/// Taxonomy locations of one tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagPathResponse {
    pub tag: String,
    pub paths: Vec<TagPath>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryRefreshResponse {
    #[serde(rename = "directorySize")]
    pub directory_size: usize,
}
