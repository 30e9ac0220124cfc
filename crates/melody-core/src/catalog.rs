//! Options offered by the preference form.
//!
//! The form only offers these values, but the model accepts any text so
//! other front ends can pass free input through.

/// Selectable genres.
pub const GENRES: &[&str] = &[
    "K-Pop",
    "발라드",
    "인디",
    "힙합/R&B",
    "록/밴드",
    "댄스",
    "재즈",
    "클래식",
];

/// Selectable eras.
pub const ERAS: &[&str] = &["최신곡", "2010년대", "2000년대", "90년대 이전"];

/// Selectable vibes (single choice).
pub const VIBES: &[&str] = &[
    "차분하고 정적인",
    "활기차고 신나는",
    "집중이 잘되는",
    "감성적인",
    "비 오는 날 분위기",
];

/// Example themes shown as input hints in simple mode.
pub const EXAMPLE_THEMES: &[&str] = &["비 오는 날 감성", "신나는 팝", "출근하기 싫을 때"];

pub fn is_known_genre(value: &str) -> bool {
    GENRES.contains(&value.trim())
}

pub fn is_known_era(value: &str) -> bool {
    ERAS.contains(&value.trim())
}

pub fn is_known_vibe(value: &str) -> bool {
    VIBES.contains(&value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_lookups() {
        assert!(is_known_genre("K-Pop"));
        assert!(is_known_genre(" 힙합/R&B "));
        assert!(!is_known_genre("Polka"));
        assert!(is_known_era("90년대 이전"));
        assert!(is_known_vibe("감성적인"));
        assert!(!is_known_vibe("K-Pop"));
    }

    #[test]
    fn test_catalog_has_no_duplicates() {
        for list in [GENRES, ERAS, VIBES] {
            let mut sorted = list.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), list.len());
        }
    }
}
