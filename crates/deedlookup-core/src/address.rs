//! Best-effort splitting of a free-text address into a house number
//! and street name for form submission.

/// Split a free-text address into `(house_number, street)`.
///
/// A leading digit run followed by whitespace is the house number and
/// the rest (sans that whitespace) is the street. Anything else
/// degrades to an empty house number with the whole string as the
/// street. Never fails.
///
/// Intentionally not a postal-address parser: the downstream form
/// portals expect exactly this split.
pub fn split_house_number(address: &str) -> (&str, &str) {
    let digit_end = address
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(address.len());
    if digit_end == 0 {
        return ("", address);
    }
    let rest = &address[digit_end..];
    let street = rest.trim_start();
    if street.len() == rest.len() {
        // Digits not followed by whitespace: treat as part of the street.
        return ("", address);
    }
    (&address[..digit_end], street)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_street() {
        assert_eq!(split_house_number("123 Main St"), ("123", "Main St"));
    }

    #[test]
    fn test_multiple_spaces_consumed() {
        assert_eq!(split_house_number("45   Elm Rd"), ("45", "Elm Rd"));
    }

    #[test]
    fn test_no_leading_number() {
        assert_eq!(split_house_number("Main St"), ("", "Main St"));
    }

    #[test]
    fn test_digits_without_space() {
        assert_eq!(split_house_number("123MainSt"), ("", "123MainSt"));
    }

    #[test]
    fn test_bare_number() {
        assert_eq!(split_house_number("123"), ("", "123"));
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(split_house_number(""), ("", ""));
    }

    #[test]
    fn test_number_with_trailing_space_only() {
        assert_eq!(split_house_number("123 "), ("123", ""));
    }
}
