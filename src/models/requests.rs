use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::SortKey;

/// Request to rank the directory for a viewer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "viewer_id", rename = "viewerId")]
    pub viewer_id: String,
    #[validate(length(max = 64))]
    #[serde(default, alias = "selected_tags", rename = "selectedTags")]
    pub selected_tags: Vec<String>,
    #[serde(default, alias = "strict_mode", alias = "showOnlyMatches", rename = "strictMode")]
    pub strict_mode: bool,
    #[serde(default, alias = "sort_key", rename = "sortKey")]
    pub sort_key: Option<SortKey>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request naming a viewer and another user (friend and favorite mutations)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MembershipRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
}
