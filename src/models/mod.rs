// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{UserProfile, SortKey, RankQuery, MatchResult};
pub use requests::{SearchRequest, MembershipRequest};
pub use responses::{
    SearchResponse, HealthResponse, ErrorResponse, FriendsResponse, FriendMutationResponse,
    FavoriteToggleResponse, TagPathResponse, DirectoryRefreshResponse,
};
