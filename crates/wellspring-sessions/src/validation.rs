//! Field limits for session records.

use wellspring_core::error::{WellspringError, WellspringResult};
use wellspring_core::models::session::UpdateSession;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_TAGS: usize = 10;
pub const MAX_URL_LEN: usize = 500;

fn check_bounds(
    title: Option<&str>,
    tags: Option<&[String]>,
    json_file_url: Option<&str>,
) -> WellspringResult<()> {
    if title.is_some_and(|t| t.trim().chars().count() > MAX_TITLE_LEN) {
        return Err(WellspringError::validation(
            "Title must be less than 200 characters",
        ));
    }
    if tags.is_some_and(|t| t.len() > MAX_TAGS) {
        return Err(WellspringError::validation("Maximum 10 tags allowed"));
    }
    if json_file_url.is_some_and(|u| u.chars().count() > MAX_URL_LEN) {
        return Err(WellspringError::validation(
            "JSON file URL must be less than 500 characters",
        ));
    }
    Ok(())
}

/// Checks for the save-draft path: the title is mandatory.
pub fn validate_draft(
    title: Option<&str>,
    tags: Option<&[String]>,
    json_file_url: Option<&str>,
) -> WellspringResult<()> {
    if title.is_none_or(|t| t.trim().is_empty()) {
        return Err(WellspringError::validation("Title is required"));
    }
    check_bounds(title, tags, json_file_url)
}

/// Checks for a partial edit: only upper bounds, an empty title is
/// accepted.
pub fn validate_update(input: &UpdateSession) -> WellspringResult<()> {
    check_bounds(
        input.title.as_deref(),
        input.tags.as_deref(),
        input.json_file_url.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("tag{i}")).collect()
    }

    #[test]
    fn draft_requires_title() {
        assert!(validate_draft(None, None, None).is_err());
        assert!(validate_draft(Some(""), Some(&tags(1)), Some("u")).is_err());
        assert!(validate_draft(Some("   "), None, None).is_err());
        assert!(validate_draft(Some("Yoga"), None, None).is_ok());
    }

    #[test]
    fn title_length_counts_trimmed_text() {
        let exact = "a".repeat(MAX_TITLE_LEN);
        assert!(validate_draft(Some(&format!("  {exact}  ")), None, None).is_ok());
        let long = "a".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_draft(Some(&long), None, None).is_err());
    }

    #[test]
    fn tag_and_url_limits() {
        assert!(validate_draft(Some("t"), Some(&tags(MAX_TAGS)), None).is_ok());
        assert!(validate_draft(Some("t"), Some(&tags(MAX_TAGS + 1)), None).is_err());
        let url = "u".repeat(MAX_URL_LEN + 1);
        assert!(validate_draft(Some("t"), None, Some(&url)).is_err());
    }

    #[test]
    fn update_allows_empty_title_but_keeps_bounds() {
        let empty_title = UpdateSession {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_update(&empty_title).is_ok());

        let too_many = UpdateSession {
            tags: Some(tags(MAX_TAGS + 1)),
            ..Default::default()
        };
        assert!(validate_update(&too_many).is_err());
    }
}
