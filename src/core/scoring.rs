use crate::models::UserProfile;
use std::collections::HashSet;

/// Number of distinct tags shared by two interest lists
///
/// Both sides are treated as sets, so a tag repeated in either list counts
/// once. The result never exceeds the smaller of the two distinct counts.
#[inline]
pub fn match_count(viewer_interests: &[String], candidate_interests: &[String]) -> usize {
    let viewer: HashSet<&str> = viewer_interests.iter().map(String::as_str).collect();
    let candidate: HashSet<&str> = candidate_interests.iter().map(String::as_str).collect();

    viewer.intersection(&candidate).count()
}

/// Distinct tags of `candidate` also held by the viewer, in the candidate's order
///
/// This is what renderers highlight on a candidate card; its length is the
/// match count.
pub fn shared_tags(viewer: &HashSet<&str>, candidate: &UserProfile) -> Vec<String> {
    let mut shared: Vec<String> = Vec::new();

    for tag in candidate.interests() {
        if viewer.contains(tag.as_str()) && !shared.contains(tag) {
            shared.push(tag.clone());
        }
    }

    shared
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_match_count() {
        let viewer = tags(&["Рок", "Гитара", "Сведение"]);
        let candidate = tags(&["Рок", "Гитара", "Сведение", "Поп"]);

        assert_eq!(match_count(&viewer, &candidate), 3);
    }

    #[test]
    fn test_duplicates_do_not_inflate() {
        let viewer = tags(&["Рок"]);
        let candidate = tags(&["Рок", "Рок", "Рок"]);

        assert_eq!(match_count(&viewer, &candidate), 1);
        assert_eq!(match_count(&candidate, &viewer), 1);
    }

    #[test]
    fn test_empty_interests() {
        assert_eq!(match_count(&[], &tags(&["Джаз"])), 0);
        assert_eq!(match_count(&[], &[]), 0);
    }

    #[test]
    fn test_shared_tags_order_and_dedup() {
        let viewer_tags = tags(&["Джаз", "Рок"]);
        let viewer: HashSet<&str> = viewer_tags.iter().map(String::as_str).collect();

        let mut candidate = UserProfile::new("c1");
        candidate.interests = Some(tags(&["Рок", "Поп", "Джаз", "Рок"]));

        assert_eq!(shared_tags(&viewer, &candidate), tags(&["Рок", "Джаз"]));
    }
}
