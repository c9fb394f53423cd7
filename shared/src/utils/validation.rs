//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Practical email shape check: local part, one `@`, dotted domain.
/// Full RFC 5322 validation is deliberately not attempted.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$")
        .unwrap_or_else(|e| panic!("invalid email regex: {}", e))
});

/// Maximum accepted email length (matches the accounts schema column)
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Check whether an email address has a valid shape
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Normalize an email for storage and lookup: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Password strength verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordStrength {
    /// Meets requirements
    Acceptable,
    /// Too short for the configured minimum
    TooShort { min_length: usize },
    /// Lacks character variety (needs letters and digits)
    TooSimple,
}

/// Check password strength: minimum length plus at least one letter and
/// one digit.
pub fn check_password(password: &str, min_length: usize) -> PasswordStrength {
    if password.chars().count() < min_length {
        return PasswordStrength::TooShort { min_length };
    }
    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return PasswordStrength::TooSimple;
    }
    PasswordStrength::Acceptable
}
