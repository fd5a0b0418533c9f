// Core algorithm exports
pub mod collation;
pub mod filters;
pub mod matcher;
pub mod membership;
pub mod scoring;
pub mod taxonomy;

pub use collation::russian_cmp;
pub use filters::passes_tag_filter;
pub use matcher::{Matcher, RankResult, rank_candidates};
pub use membership::{Membership, MembershipError};
pub use scoring::{match_count, shared_tags};
pub use taxonomy::{Taxonomy, TaxonomyError, TagPath};
