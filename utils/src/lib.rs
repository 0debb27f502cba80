//! Shared utilities for the placeplay workspace.

/// Normalizes a phone number into the shape the Place&Play API expects.
///
/// Strips spaces, dashes and parentheses (the formats Telegram contact
/// sharing produces) and prepends `+` when the number starts with a digit.
pub fn normalize_phone(raw: &str) -> String {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if stripped.starts_with('+') || stripped.is_empty() {
        stripped
    } else {
        format!("+{}", stripped)
    }
}

/// Checks that a normalized phone number has a plausible shape:
/// a leading `+` followed by 9 to 15 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let Some(digits) = phone.strip_prefix('+') else {
        return false;
    };
    (9..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_separators() {
        assert_eq!(normalize_phone("+998 99 888-89-31"), "+998998888931");
        assert_eq!(normalize_phone("(998) 99 8888931"), "+998998888931");
    }

    #[test]
    fn normalize_prepends_plus_for_bare_digits() {
        assert_eq!(normalize_phone("998998888931"), "+998998888931");
    }

    #[test]
    fn normalize_keeps_existing_plus() {
        assert_eq!(normalize_phone("  +998998888931 "), "+998998888931");
    }

    #[test]
    fn valid_phone_requires_plus_and_digits() {
        assert!(is_valid_phone("+998998888931"));
        assert!(!is_valid_phone("998998888931"));
        assert!(!is_valid_phone("+9989988a8931"));
    }

    #[test]
    fn valid_phone_rejects_out_of_range_lengths() {
        assert!(!is_valid_phone("+12345678"));
        assert!(is_valid_phone("+123456789"));
        assert!(is_valid_phone("+123456789012345"));
        assert!(!is_valid_phone("+1234567890123456"));
    }
}
