/// Whether a posted form field is set. Checkboxes post "on"; the
/// confirmation page posts "true". Missing or blank fields are unset.
pub fn parse_flag(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().to_lowercase())
        .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes" | "on"))
}

/// Numeric form input. Blank or malformed values yield `None` and are sent
/// to the API as `null`.
pub fn parse_number(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert!(parse_flag(Some("on")));
        assert!(parse_flag(Some(" TRUE ")));
        assert!(!parse_flag(Some("")));
        assert!(!parse_flag(Some("off")));
        assert!(!parse_flag(None));
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number(" 2048 "), Some(2048));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("2 GB"), None);
    }
}
