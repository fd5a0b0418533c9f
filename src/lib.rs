//! Mooza Match - interest matching service for the Mooza musician network
//!
//! This library provides the ranking procedure behind Mooza's Search and
//! Friends pages, the friend/favorite membership sets, and the static tag
//! taxonomy, plus the HTTP service that serves them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, Membership, Taxonomy, match_count, rank_candidates, russian_cmp};
pub use models::{UserProfile, MatchResult, RankQuery, SortKey, SearchRequest, SearchResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let viewer = UserProfile::new("viewer");
        let (matches, total) = rank_candidates(&viewer, &[], &RankQuery::default());

        assert!(matches.is_empty());
        assert_eq!(total, 0);
    }
}
