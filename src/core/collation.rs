//! Russian-aware string ordering for name/city/country sorting.
//!
//! Code point order puts `ё` after `я` and every uppercase letter before every
//! lowercase one, which is wrong for Russian. The comparison here follows the
//! `ru` locale ordering in three levels:
//!
//! 1. Primary: base letters, case-insensitive. `ё` carries the weight of `е`
//!    and a Latin letter with a diacritic carries the weight of its base
//!    letter. Script groups are ordered whitespace/punctuation < digits <
//!    Cyrillic < Latin < everything else.
//! 2. Secondary: on a primary tie, the plain letter sorts before its variants
//!    (`е` < `ё`, `e` < `é`).
//! 3. Tertiary: on a secondary tie, lowercase sorts before uppercase.
//!
//! Finally the raw strings are compared, so distinct inputs never compare equal.

use std::cmp::Ordering;

/// Russian alphabet in collation order; `ё` is a variant of `е`, not a letter here
const RUSSIAN_ALPHABET: &str = "абвгдежзийклмнопрстуфхцчшщъыьэюя";

/// Latin letters with diacritics, keyed by the base letter they fold to
const LATIN_VARIANTS: &[(char, &str)] = &[
    ('a', "àáâãäåāăą"),
    ('c', "çćĉċč"),
    ('d', "ďđ"),
    ('e', "èéêëēĕėęě"),
    ('g', "ĝğġģ"),
    ('h', "ĥħ"),
    ('i', "ìíîïĩīĭįı"),
    ('j', "ĵ"),
    ('k', "ķ"),
    ('l', "ĺļľŀł"),
    ('n', "ñńņňŉ"),
    ('o', "òóôõöøōŏő"),
    ('r', "ŕŗř"),
    ('s', "śŝşš"),
    ('t', "ţťŧ"),
    ('u', "ùúûüũūŭůűų"),
    ('w', "ŵ"),
    ('y', "ýÿŷ"),
    ('z', "źżž"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharGroup {
    Separator,
    Digit,
    Cyrillic,
    Latin,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Weight {
    group: CharGroup,
    primary: u32,
    secondary: u8,
}

impl Weight {
    fn new(group: CharGroup, primary: u32, secondary: u8) -> Self {
        Self { group, primary, secondary }
    }

    fn primary_key(self) -> (CharGroup, u32) {
        (self.group, self.primary)
    }
}

fn fold_latin(c: char) -> Option<(char, u8)> {
    LATIN_VARIANTS.iter().find_map(|(base, variants)| {
        variants
            .chars()
            .position(|v| v == c)
            .map(|pos| (*base, pos as u8 + 1))
    })
}

fn cyrillic_position(c: char) -> Option<u32> {
    RUSSIAN_ALPHABET.chars().position(|r| r == c).map(|pos| pos as u32)
}

fn weight(c: char) -> Weight {
    let lower = c.to_lowercase().next().unwrap_or(c);

    if lower == 'ё' {
        return Weight::new(CharGroup::Cyrillic, cyrillic_position('е').unwrap_or(0), 1);
    }

    if let Some(pos) = cyrillic_position(lower) {
        return Weight::new(CharGroup::Cyrillic, pos, 0);
    }

    if lower.is_whitespace() || lower.is_ascii_punctuation() {
        Weight::new(CharGroup::Separator, lower as u32, 0)
    } else if lower.is_ascii_digit() {
        Weight::new(CharGroup::Digit, lower as u32, 0)
    } else if lower.is_ascii_lowercase() {
        Weight::new(CharGroup::Latin, lower as u32, 0)
    } else if let Some((base, secondary)) = fold_latin(lower) {
        Weight::new(CharGroup::Latin, base as u32, secondary)
    } else if ('\u{0400}'..='\u{04FF}').contains(&lower) {
        // Non-Russian Cyrillic letters follow я
        let after_ya = RUSSIAN_ALPHABET.chars().count() as u32;
        Weight::new(CharGroup::Cyrillic, after_ya + lower as u32, 0)
    } else {
        Weight::new(CharGroup::Other, lower as u32, 0)
    }
}

#[inline]
fn case_key(c: char) -> u8 {
    if c.is_uppercase() { 1 } else { 0 }
}

/// Compare two strings with Russian collation rules
pub fn russian_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .map(|c| weight(c).primary_key())
        .cmp(b.chars().map(|c| weight(c).primary_key()));

    primary
        .then_with(|| {
            a.chars()
                .map(|c| weight(c).secondary)
                .cmp(b.chars().map(|c| weight(c).secondary))
        })
        .then_with(|| a.chars().map(case_key).cmp(b.chars().map(case_key)))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(words: &[&str]) -> Vec<String> {
        let mut words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        words.sort_by(|a, b| russian_cmp(a, b));
        words
    }

    #[test]
    fn test_alphabet_order() {
        assert_eq!(russian_cmp("абрикос", "банан"), Ordering::Less);
        assert_eq!(russian_cmp("яблоко", "арбуз"), Ordering::Greater);
    }

    #[test]
    fn test_yo_is_a_variant_of_ye() {
        assert_eq!(
            sorted(&["Еремеев", "Ёлкин", "Ель"]),
            vec!["Ёлкин", "Ель", "Еремеев"]
        );
        assert_eq!(russian_cmp("елка", "ёлка"), Ordering::Less);
        assert_eq!(russian_cmp("ёж", "жук"), Ordering::Less);
        // Code point order would put ё after я
        assert_eq!(russian_cmp("ёж", "яма"), Ordering::Less);
    }

    #[test]
    fn test_latin_diacritics_fold_to_base_letter() {
        assert_eq!(
            sorted(&["Zoë", "Zof", "Émile", "Zack"]),
            vec!["Émile", "Zack", "Zoë", "Zof"]
        );
        assert_eq!(russian_cmp("Zoe", "Zoë"), Ordering::Less);
    }

    #[test]
    fn test_mixed_scripts() {
        assert_eq!(
            sorted(&["Еремеев", "Ёлкин", "Ель", "Ёж", "Zoë", "Zof", "Émile", "Zack"]),
            vec!["Ёж", "Ёлкин", "Ель", "Еремеев", "Émile", "Zack", "Zoë", "Zof"]
        );
    }

    #[test]
    fn test_case_insensitive_primary() {
        assert_eq!(russian_cmp("Москва", "казань"), Ordering::Greater);
        assert_eq!(russian_cmp("анна", "Борис"), Ordering::Less);
        assert_eq!(russian_cmp("анна", "Анна"), Ordering::Less);
    }

    #[test]
    fn test_secondary_before_case() {
        // The ё difference decides before the case difference
        assert_eq!(russian_cmp("Ель", "ёль"), Ordering::Less);
    }

    #[test]
    fn test_empty_sorts_first() {
        assert_eq!(russian_cmp("", "Абакан"), Ordering::Less);
        assert_eq!(russian_cmp("", ""), Ordering::Equal);
    }

    #[test]
    fn test_cyrillic_before_latin() {
        assert_eq!(russian_cmp("Яна", "Alex"), Ordering::Less);
        assert_eq!(russian_cmp("42", "Алла"), Ordering::Less);
    }
}
