//! Validation
//!
//! Permissive format checks for checkout contact details. They gate obvious
//! typos only: neither is a full RFC 5322 or E.164 grammar.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

static PHONE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").ok());

/// A local part, `@`, and a domain containing a dot, with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|regex| regex.is_match(email))
}

/// An optional leading `+`, then at least ten digits, spaces, dashes or
/// parentheses.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.as_ref().is_some_and(|regex| regex.is_match(phone))
}
