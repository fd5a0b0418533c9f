use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Musician profile as served by the Mooza backend directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId", alias = "id")]
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl UserProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Interest tags in source order, empty when absent
    pub fn interests(&self) -> &[String] {
        self.interests.as_deref().unwrap_or(&[])
    }

    /// Distinct interest tags
    pub fn interest_set(&self) -> HashSet<&str> {
        self.interests().iter().map(String::as_str).collect()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn city(&self) -> &str {
        self.city.as_deref().unwrap_or("")
    }

    pub fn country(&self) -> &str {
        self.country.as_deref().unwrap_or("")
    }

    pub fn has_interest(&self, tag: &str) -> bool {
        self.interests().iter().any(|t| t == tag)
    }
}

/// Ordering applied to ranked results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    #[serde(alias = "matchCount", alias = "matches")]
    MatchCount,
    Name,
    City,
    Country,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "match_count" | "matchcount" | "matches" => Ok(SortKey::MatchCount),
            "name" => Ok(SortKey::Name),
            "city" => Ok(SortKey::City),
            "country" => Ok(SortKey::Country),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Input of the ranking procedure besides the viewer and the directory
#[derive(Debug, Clone, Default)]
pub struct RankQuery {
    pub selected_tags: Vec<String>,
    /// With tags selected: require all of them. Without: require a shared interest.
    pub strict_mode: bool,
    pub sort_key: SortKey,
    pub limit: Option<usize>,
}

/// A candidate annotated with its overlap against the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(rename = "matchCount")]
    pub match_count: usize,
    #[serde(rename = "sharedTags")]
    pub shared_tags: Vec<String>,
    #[serde(rename = "isFriend", skip_serializing_if = "Option::is_none")]
    pub is_friend: Option<bool>,
    #[serde(rename = "isFavorite", skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}
