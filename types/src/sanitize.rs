//! Input format stripping.
//!
//! These helpers only normalise what was typed; they never judge whether the
//! value is a real PAN, phone number, or date.

/// Keep ASCII digits only, truncated to `cap` characters.
pub fn digits_only(input: &str, cap: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(cap).collect()
}

/// Keep ASCII letters and digits, upper-cased, truncated to `cap` characters.
pub fn alphanumeric_upper(input: &str, cap: usize) -> String {
    input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .take(cap)
        .collect()
}

/// Keep digits and `-` separators, truncated to `cap` characters.
pub fn date_chars(input: &str, cap: usize) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_phone_formatting() {
        assert_eq!(digits_only("+91 98765-43210", 10), "9198765432");
        assert_eq!(digits_only("(987) 654 3210", 10), "9876543210");
    }

    #[test]
    fn upper_cases_pan() {
        assert_eq!(alphanumeric_upper("abcde 1234 f", 10), "ABCDE1234F");
    }

    #[test]
    fn keeps_date_separators() {
        assert_eq!(date_chars("1990/01/01", 10), "19900101");
        assert_eq!(date_chars("1990-01-01T00", 10), "1990-01-01");
    }
}
