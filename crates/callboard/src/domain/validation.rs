//! Client-side input validation for new call requests

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::errors::ValidationError;

/// Minimum customer name length after trimming, in characters
pub const MIN_NAME_CHARS: usize = 2;

/// Optional `+`, a non-zero leading digit, then 1 to 14 more digits
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").expect("phone pattern must compile"));

/// Check the customer name
pub fn validate_name(customer_name: &str) -> Result<(), ValidationError> {
    if customer_name.trim().chars().count() < MIN_NAME_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

/// Check the phone number after removing all whitespace
pub fn validate_phone(phone_number: &str) -> Result<(), ValidationError> {
    let compact: String = phone_number.chars().filter(|c| !c.is_whitespace()).collect();
    // `\d` in the regex crate is Unicode-aware; the contract is ASCII digits only.
    if !compact.is_ascii() || !PHONE_PATTERN.is_match(&compact) {
        return Err(ValidationError::InvalidPhoneNumber);
    }
    Ok(())
}

/// Validate form input in order, stopping at the first failure
pub fn validate(customer_name: &str, phone_number: &str) -> Result<(), ValidationError> {
    validate_name(customer_name)?;
    validate_phone(phone_number)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_names_rejected() {
        for name in ["", " ", "a", "  b  ", "\tc\n"] {
            assert_eq!(validate_name(name), Err(ValidationError::NameTooShort), "{name:?}");
        }
    }

    #[test]
    fn test_name_counts_characters_not_bytes() {
        assert_eq!(validate_name("é"), Err(ValidationError::NameTooShort));
        assert!(validate_name("Jo").is_ok());
        assert!(validate_name(" 李明 ").is_ok());
    }

    #[test]
    fn test_phone_boundaries() {
        assert_eq!(validate_phone("1"), Err(ValidationError::InvalidPhoneNumber));
        assert!(validate_phone("12").is_ok());
        assert!(validate_phone("123").is_ok());
        assert!(validate_phone("+14155550100").is_ok());
        // 15 digits is the maximum
        assert!(validate_phone("123456789012345").is_ok());
        assert_eq!(
            validate_phone("1234567890123456"),
            Err(ValidationError::InvalidPhoneNumber)
        );
    }

    #[test]
    fn test_phone_format_rejections() {
        for phone in ["", "+", "0123456", "+0123456", "++14155550100", "415-555-0100", "(415)5550100", "١٢٣٤"] {
            assert_eq!(
                validate_phone(phone),
                Err(ValidationError::InvalidPhoneNumber),
                "{phone:?}"
            );
        }
    }

    #[test]
    fn test_phone_whitespace_is_stripped() {
        assert!(validate_phone("+1 415 555 0100").is_ok());
        assert!(validate_phone(" 4155550100\t").is_ok());
    }

    #[test]
    fn test_name_checked_before_phone() {
        assert_eq!(validate("x", "bad"), Err(ValidationError::NameTooShort));
        assert_eq!(validate("Ada", "bad"), Err(ValidationError::InvalidPhoneNumber));
        assert_eq!(validate("Ada", "+14155550100"), Ok(()));
    }
}
