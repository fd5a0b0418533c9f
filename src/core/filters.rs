use crate::models::UserProfile;

/// Decide whether a candidate survives the tag filter
///
/// * no tags selected: everyone passes unless `strict_mode`, in which case a
///   positive match count is required ("show only matches")
/// * tags selected, strict: every selected tag must be among the candidate's
///   interests
/// * tags selected, not strict: at least one selected tag must be present
#[inline]
pub fn passes_tag_filter(
    candidate: &UserProfile,
    match_count: usize,
    selected_tags: &[String],
    strict_mode: bool,
) -> bool {
    if selected_tags.is_empty() {
        return !strict_mode || match_count > 0;
    }

    if strict_mode {
        selected_tags.iter().all(|tag| candidate.has_interest(tag))
    } else {
        selected_tags.iter().any(|tag| candidate.has_interest(tag))
    }
}
