use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for work-order / serial-number identifiers.
    /// Upper-cased alphanumeric with optional dashes, as scanned from labels.
    /// - Valid: "W1", "WO-2026-0153", "SN12345"
    /// - Invalid: "", "wo 1", "SN_1", "-W1"
    pub static ref IDENTIFIER_REGEX: Regex = Regex::new(r"^[A-Z0-9]+(?:-[A-Z0-9]+)*$").unwrap();
}

/// Normalize a free-text identifier the way the store keeps it: trimmed and
/// upper-cased.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// True when a dropdown value is a real selection, not the placeholder or
/// empty.
pub fn is_selected(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && v != crate::shared::constants::PLACEHOLDER_OPTION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_regex_valid() {
        assert!(IDENTIFIER_REGEX.is_match("W1"));
        assert!(IDENTIFIER_REGEX.is_match("WO-2026-0153"));
        assert!(IDENTIFIER_REGEX.is_match("SN12345"));
    }

    #[test]
    fn test_identifier_regex_invalid() {
        assert!(!IDENTIFIER_REGEX.is_match("")); // empty
        assert!(!IDENTIFIER_REGEX.is_match("wo 1")); // space, lowercase
        assert!(!IDENTIFIER_REGEX.is_match("SN_1")); // underscore
        assert!(!IDENTIFIER_REGEX.is_match("-W1")); // leading dash
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("  wo-12 "), "WO-12");
    }

    #[test]
    fn test_is_selected() {
        assert!(is_selected("Electrical"));
        assert!(!is_selected(""));
        assert!(!is_selected("  "));
        assert!(!is_selected("-- Select --"));
    }
}
