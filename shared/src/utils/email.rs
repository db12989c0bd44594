//! Email address utility functions
//!
//! Validation is deliberately conservative: one `@`, a non-empty local
//! part, and a dotted domain. Anything stricter belongs to the email
//! provider, which is the final authority on deliverability.

use once_cell::sync::Lazy;
use regex::Regex;

/// Regular expression for a plausible email address
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$").unwrap()
});

/// Check whether a string looks like a valid email address
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Normalize an email address for use as a lookup key
///
/// Trims surrounding whitespace and lowercases; the database treats
/// addresses case-insensitively, so every entry point must agree.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the full domain:
/// `alice@example.com` becomes `a***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = local.chars().next().unwrap();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
