//! Field rules shared by the form wizard and the submission gateway
//!
//! Every check is a pure predicate over primitive values. Callers decide
//! whether the input is trimmed first.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum number of characters a message body must have
pub const MIN_BODY_CHARS: usize = 10;

/// Maximum number of characters a message body may have
pub const MAX_BODY_CHARS: usize = 2000;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Loose `local@domain.tld` shape check. Not RFC 5322.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_SHAPE.is_match(s)
}

/// Number of characters in a body, as shown by the message counter
pub fn body_char_count(s: &str) -> usize {
    s.chars().count()
}

/// True iff the body is between 10 and 2000 characters inclusive
pub fn is_body_length_valid(s: &str) -> bool {
    (MIN_BODY_CHARS..=MAX_BODY_CHARS).contains(&body_char_count(s))
}

/// Anonymous submissions need no name; identified ones need a non-blank one
pub fn is_identity_complete(is_anonymous: bool, name: &str) -> bool {
    is_anonymous || !name.trim().is_empty()
}
