use crate::core::{
    collation::russian_cmp,
    filters::passes_tag_filter,
    membership::Membership,
    scoring::shared_tags,
};
use crate::models::{MatchResult, RankQuery, SortKey, UserProfile};

/// Result of the ranking process
#[derive(Debug)]
pub struct RankResult {
    pub matches: Vec<MatchResult>,
    /// Size of the directory that was ranked
    pub total_candidates: usize,
    /// Candidates that survived the filter, before the limit was applied
    pub total_matched: usize,
}

/// Rank a directory for a viewer
///
/// # Pipeline Stages
/// 1. Self exclusion (by `user_id`)
/// 2. Match count against the viewer's interests
/// 3. Tag filter (see [`passes_tag_filter`])
/// 4. Stable sort by `query.sort_key`
/// 5. Optional truncation to `query.limit`
///
/// Pure: the same inputs always give the same output.
pub fn rank_candidates(
    viewer: &UserProfile,
    candidates: &[UserProfile],
    query: &RankQuery,
) -> (Vec<MatchResult>, usize) {
    let viewer_interests = viewer.interest_set();

    let mut ranked: Vec<MatchResult> = candidates
        .iter()
        // Stage 1: never rank the viewer against themselves
        .filter(|candidate| candidate.user_id != viewer.user_id)
        // Stage 2 & 3: overlap and tag filter
        .filter_map(|candidate| {
            let shared = shared_tags(&viewer_interests, candidate);
            let match_count = shared.len();

            if passes_tag_filter(candidate, match_count, &query.selected_tags, query.strict_mode) {
                Some(MatchResult {
                    profile: candidate.clone(),
                    match_count,
                    shared_tags: shared,
                    is_friend: None,
                    is_favorite: None,
                })
            } else {
                None
            }
        })
        .collect();

    // Stage 4: `sort_by` is stable, so ties keep directory order
    match query.sort_key {
        SortKey::MatchCount => ranked.sort_by(|a, b| b.match_count.cmp(&a.match_count)),
        SortKey::Name => ranked.sort_by(|a, b| russian_cmp(a.profile.name(), b.profile.name())),
        SortKey::City => ranked.sort_by(|a, b| russian_cmp(a.profile.city(), b.profile.city())),
        SortKey::Country => {
            ranked.sort_by(|a, b| russian_cmp(a.profile.country(), b.profile.country()))
        }
    }

    let total_matched = ranked.len();

    // Stage 5
    if let Some(limit) = query.limit {
        ranked.truncate(limit);
    }

    (ranked, total_matched)
}

/// Ranking orchestrator holding the service-level defaults
#[derive(Debug, Clone)]
pub struct Matcher {
    default_sort: SortKey,
    max_limit: usize,
}

impl Matcher {
    pub fn new(default_sort: SortKey, max_limit: usize) -> Self {
        Self {
            default_sort,
            max_limit,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SortKey::MatchCount, 500)
    }

    /// Build a query, filling in the default sort and capping the limit
    pub fn query(
        &self,
        selected_tags: Vec<String>,
        strict_mode: bool,
        sort_key: Option<SortKey>,
        limit: Option<usize>,
    ) -> RankQuery {
        RankQuery {
            selected_tags,
            strict_mode,
            sort_key: sort_key.unwrap_or(self.default_sort),
            limit: Some(limit.unwrap_or(self.max_limit).min(self.max_limit)),
        }
    }

    /// Rank `candidates` for `viewer`
    ///
    /// # Arguments
    /// * `viewer` - The profile whose interests are the reference set
    /// * `candidates` - The full directory snapshot, viewer possibly included
    /// * `query` - Tag filter, sort key and limit
    pub fn rank(
        &self,
        viewer: &UserProfile,
        candidates: &[UserProfile],
        query: &RankQuery,
    ) -> RankResult {
        let (matches, total_matched) = rank_candidates(viewer, candidates, query);

        RankResult {
            matches,
            total_candidates: candidates.len(),
            total_matched,
        }
    }

    /// Set the friend/favorite flags on every match
    pub fn annotate(&self, result: &mut RankResult, membership: &Membership) {
        for m in &mut result.matches {
            m.is_friend = Some(membership.is_friend(&m.profile.user_id));
            m.is_favorite = Some(membership.is_favorite(&m.profile.user_id));
        }
    }

    /// Friends of the viewer ranked like a search (the Friends page)
    pub fn rank_friends(
        &self,
        viewer: &UserProfile,
        candidates: &[UserProfile],
        membership: &Membership,
        query: &RankQuery,
    ) -> RankResult {
        let friends: Vec<UserProfile> = candidates
            .iter()
            .filter(|c| membership.is_friend(&c.user_id))
            .cloned()
            .collect();

        let mut result = self.rank(viewer, &friends, query);
        result.total_candidates = candidates.len();
        self.annotate(&mut result, membership);
        result
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
