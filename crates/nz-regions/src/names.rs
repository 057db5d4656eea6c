//! Name normalisation for catalogue lookups.

/// Fold a place name into its comparison key.
///
/// Trims surrounding whitespace, lowercases, and strips te reo Māori macrons
/// so `"Taupo"` and `"Taupō"` compare equal.
///
/// ```
/// use nz_regions::fold_name;
///
/// assert_eq!(fold_name("  Whakatāne "), "whakatane");
/// assert_eq!(fold_name("HAWKE'S BAY"), fold_name("Hawke's Bay"));
/// ```
#[must_use]
pub fn fold_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|ch| match ch {
            'ā' => 'a',
            'ē' => 'e',
            'ī' => 'i',
            'ō' => 'o',
            'ū' => 'u',
            other => other,
        })
        .collect()
}

pub(crate) fn same_name(left: &str, right: &str) -> bool {
    fold_name(left) == fold_name(right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Taupō", "taupo")]
    #[case("Manawatū-Whanganui", "manawatu-whanganui")]
    #[case("\tChristchurch\n", "christchurch")]
    #[case("ŌAMARU", "oamaru")]
    fn folds_case_whitespace_and_macrons(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(fold_name(raw), expected);
    }

    #[rstest]
    fn same_name_ignores_macrons() {
        assert!(same_name("Kaikoura", "Kaikōura"));
        assert!(!same_name("Kaikoura", "Kaitaia"));
    }
}
