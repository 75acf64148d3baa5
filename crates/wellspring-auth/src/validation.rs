//! Credential input checks applied before any store access.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Password policy: at least `min_len` characters.
pub fn check_password(password: &str, min_len: usize) -> Result<(), String> {
    if password.chars().count() < min_len {
        return Err(format!(
            "Password must be at least {min_len} characters long"
        ));
    }
    Ok(())
}
