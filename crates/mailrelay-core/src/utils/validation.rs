/// Input validation utilities
use crate::error::RelayError;
use regex::Regex;

lazy_static::lazy_static! {
    // Permissive shape only: local@domain.tld with no whitespace or extra '@'
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub fn is_email_shaped(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check that `email` is address-shaped.
///
/// The error names the offending field, not the value, so it can be logged.
pub fn validate_email_address(field: &str, email: &str) -> Result<(), RelayError> {
    if is_email_shaped(email) {
        Ok(())
    } else {
        Err(RelayError::InvalidEmail(field.to_string()))
    }
}
