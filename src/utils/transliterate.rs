//! Folding of non-ASCII text to ASCII for URL segments.

use deunicode::deunicode_with_tofu;

/// Replaces each non-ASCII character with its closest ASCII spelling.
///
/// Covers every script `deunicode` knows: diacritics fold to the base letter,
/// ligatures expand and Cyrillic, Greek and CJK are romanized. Characters with
/// no transliteration are dropped.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(to_ascii("Café Crème"), "Cafe Creme");
/// assert_eq!(to_ascii("Новости"), "Novosti");
/// ```
pub fn to_ascii(input: &str) -> String {
    if input.is_ascii() {
        return input.to_string();
    }
    deunicode_with_tofu(input, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_unchanged() {
        assert_eq!(to_ascii("About Us-2024"), "About Us-2024");
    }

    #[test]
    fn test_diacritics_fold_to_base_letter() {
        assert_eq!(to_ascii("Café Crème"), "Cafe Creme");
        assert_eq!(to_ascii("Łódź"), "Lodz");
    }

    #[test]
    fn test_ligatures_expand() {
        assert_eq!(to_ascii("Straße"), "Strasse");
        assert_eq!(to_ascii("Æther"), "AEther");
    }

    #[test]
    fn test_cyrillic_is_romanized() {
        assert_eq!(to_ascii("Новости"), "Novosti");
        assert_eq!(to_ascii("новости"), "novosti");
    }

    #[test]
    fn test_output_is_always_ascii() {
        for input in ["日本Japan", "Ελλάδα", "emoji 🦀 crab", "\u{10FFFF}"] {
            assert!(to_ascii(input).is_ascii(), "{input}");
        }
    }
}
