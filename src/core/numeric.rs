//! Cleaning of human-formatted numeric cell text

/// Parses the numeric content of `text`, ignoring every character that is
/// not an ASCII digit or a decimal point.
///
/// Returns `None` when nothing numeric remains (e.g. `"N/A"`, `"--"`, `""`)
/// or when the remainder is not a valid float (e.g. `"1.2.3"`). Sign glyphs
/// are stripped, so the result is never negative.
///
/// ```
/// use fxscrape::core::numeric::clean_number;
///
/// assert_eq!(clean_number("$1,234.56"), Some(1234.56));
/// assert_eq!(clean_number("N/A"), None);
/// ```
pub fn clean_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_number_strips_formatting() {
        assert_eq!(clean_number("$1,234.56"), Some(1234.56));
        assert_eq!(clean_number("  42 "), Some(42.0));
        assert_eq!(clean_number("0.8123"), Some(0.8123));
    }

    #[test]
    fn test_clean_number_drops_sign_glyphs() {
        assert_eq!(clean_number("+1.23"), Some(1.23));
        assert_eq!(clean_number("-1.23"), Some(1.23));
        assert_eq!(clean_number("-0.45%"), Some(0.45));
    }

    #[test]
    fn test_clean_number_absent_when_nothing_numeric() {
        assert_eq!(clean_number(""), None);
        assert_eq!(clean_number("N/A"), None);
        assert_eq!(clean_number("--"), None);
    }

    #[test]
    fn test_clean_number_absent_on_malformed_remainder() {
        assert_eq!(clean_number("1.2.3"), None);
        assert_eq!(clean_number("."), None);
    }
}
