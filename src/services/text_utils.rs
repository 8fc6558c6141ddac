//! Shared text normalization utilities
//!
//! Record names and image filenames are reduced to the same key space so
//! that `Toyota Corolla.jpg`, `toyota-corolla` and `TOYOTA_COROLLA` all meet
//! at `toyotacorolla`.

use unicode_general_category::{GeneralCategory, get_general_category};

/// Normalize a name into its match key.
/// Lowercases the whole string, then keeps letters and numbers only.
///
/// # Example
/// ```ignore
/// assert_eq!(normalize_key("Toyota Corolla"), "toyotacorolla");
/// assert_eq!(normalize_key("toyota-corolla"), "toyotacorolla");
/// ```
pub fn normalize_key(s: &str) -> String {
    // Whole-string lowercasing keeps context rules such as final sigma
    s.to_lowercase().chars().filter(|&c| is_key_char(c)).collect()
}

/// Letters (`Lu`, `Ll`, `Lt`, `Lm`, `Lo`) and numbers (`Nd`, `Nl`, `No`).
/// Combining marks are dropped even where Rust counts them as alphabetic.
fn is_key_char(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// Split a filename at its final extension.
///
/// Only the last `.` counts, and dots leading the name never start an
/// extension, so `.hidden` has none while `archive.tar.gz` keeps
/// `archive.tar` as its stem.
pub fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(dot) if filename[..dot].chars().any(|c| c != '.') => {
            (&filename[..dot], &filename[dot..])
        }
        _ => (filename, ""),
    }
}

/// Match key for a filename: the normalized stem.
pub fn filename_key(filename: &str) -> String {
    let (stem, _) = split_extension(filename);
    normalize_key(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Toyota Corolla"), "toyotacorolla");
        assert_eq!(normalize_key("toyota-corolla"), "toyotacorolla");
        assert_eq!(normalize_key("Mercedes-Benz C_300 (2019)"), "mercedesbenzc3002019");
        assert_eq!(normalize_key("  --  "), "");
    }

    #[test]
    fn test_normalize_key_unicode() {
        assert_eq!(normalize_key("Škoda Octavia"), "škodaoctavia");
        assert_eq!(normalize_key("CITROËN C4"), "citroënc4");
    }

    #[test]
    fn test_normalize_key_final_sigma() {
        // Trailing capital sigma lowercases to the final form
        assert_eq!(normalize_key("ΟΔΟΣ"), "οδο\u{3c2}");
        assert_eq!(normalize_key("ΟΔΟΣ"), normalize_key("οδο\u{3c2}"));
    }

    #[test]
    fn test_normalize_key_drops_combining_marks() {
        // Devanagari vowel signs are marks, not letters
        assert_eq!(normalize_key("मारुति"), "मरत");
        assert_eq!(normalize_key("Cafe\u{301}"), "cafe");
        assert_eq!(normalize_key("Ⅻ ½"), "ⅻ½");
    }

    #[test]
    fn test_normalize_key_is_idempotent() {
        for name in ["Toyota Corolla", "BMW-X5 m", "Škoda", "a.b.c", ""] {
            let once = normalize_key(name);
            assert_eq!(normalize_key(&once), once, "not idempotent for {:?}", name);
        }
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("Toyota Corolla.jpg"), ("Toyota Corolla", ".jpg"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("noext"), ("noext", ""));
        assert_eq!(split_extension("trailing."), ("trailing", "."));
    }

    #[test]
    fn test_split_extension_leading_dots() {
        assert_eq!(split_extension(".hidden"), (".hidden", ""));
        assert_eq!(split_extension("..."), ("...", ""));
        assert_eq!(split_extension("..car.png"), ("..car", ".png"));
    }

    #[test]
    fn test_filename_key_strips_only_final_extension() {
        assert_eq!(filename_key("Toyota Corolla.jpg"), "toyotacorolla");
        assert_eq!(filename_key("Ford.Focus.png"), "fordfocus");
        assert_eq!(filename_key("Kia Rio"), "kiario");
    }
}
