use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Permissive phone number pattern for the contact form.
    /// Accepts digits, spaces, dots, parentheses, plus and hyphen.
    /// - Valid: "+55 11 91234-5678", "(11) 3456-7890", "11987654321"
    /// - Invalid: "abc", "12", "555-CALL-NOW"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9()+\-\s.]{6,20}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_regex_valid() {
        assert!(PHONE_REGEX.is_match("+55 11 91234-5678"));
        assert!(PHONE_REGEX.is_match("(11) 3456-7890"));
        assert!(PHONE_REGEX.is_match("11987654321"));
        assert!(PHONE_REGEX.is_match("11 2345.6789"));
    }

    #[test]
    fn test_phone_regex_invalid() {
        assert!(!PHONE_REGEX.is_match("abc"));
        assert!(!PHONE_REGEX.is_match("12")); // too short
        assert!(!PHONE_REGEX.is_match("555-CALL-NOW"));
        assert!(!PHONE_REGEX.is_match("")); // empty
        assert!(!PHONE_REGEX.is_match("123456789012345678901")); // too long
    }
}
