//! Local input checks applied before any request leaves the bridge.

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ListmonkError, Result};

pub const NAME_MAX_LEN: usize = 200;
pub const SUBJECT_MAX_LEN: usize = 500;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const PER_PAGE_MAX: u32 = 1000;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$")
        .expect("email pattern compiles")
});

/// Check an email address and return it trimmed.
pub fn email(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ListmonkError::validation(format!("{field} must not be empty")));
    }
    if value.len() > 254 || !EMAIL_RE.is_match(value) {
        return Err(ListmonkError::validation(format!(
            "{field} is not a valid email address: '{value}'"
        )));
    }
    Ok(value.to_string())
}

/// Check a string's trimmed length in characters and return it trimmed.
pub fn text(field: &str, value: &str, min: usize, max: Option<usize>) -> Result<String> {
    let value = value.trim();
    let len = value.chars().count();
    if len < min {
        return Err(if min <= 1 {
            ListmonkError::validation(format!("{field} must not be empty"))
        } else {
            ListmonkError::validation(format!("{field} must be at least {min} characters"))
        });
    }
    if let Some(max) = max {
        if len > max {
            return Err(ListmonkError::validation(format!(
                "{field} must be at most {max} characters, got {len}"
            )));
        }
    }
    Ok(value.to_string())
}

pub fn positive_id(field: &str, id: i64) -> Result<i64> {
    if id <= 0 {
        return Err(ListmonkError::validation(format!(
            "{field} must be a positive integer, got {id}"
        )));
    }
    Ok(id)
}

pub fn positive_ids(field: &str, ids: &[i64]) -> Result<()> {
    if let Some(bad) = ids.iter().find(|id| **id <= 0) {
        return Err(ListmonkError::validation(format!(
            "all {field} must be positive integers, got {bad}"
        )));
    }
    Ok(())
}

pub fn non_empty_ids(field: &str, ids: &[i64]) -> Result<()> {
    if ids.is_empty() {
        return Err(ListmonkError::validation(format!(
            "{field} must contain at least one id"
        )));
    }
    positive_ids(field, ids)
}

/// Trim tags and drop the empty ones.
pub fn tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parse an RFC 3339 timestamp, returning it normalized.
pub fn timestamp(field: &str, value: &str) -> Result<String> {
    DateTime::<FixedOffset>::parse_from_rfc3339(value.trim())
        .map(|ts| ts.to_rfc3339())
        .map_err(|e| {
            ListmonkError::validation(format!(
                "{field} must be an RFC 3339 timestamp such as 2025-01-31T09:00:00Z: {e}"
            ))
        })
}

pub fn page(page: u32, per_page: u32) -> Result<()> {
    if page == 0 {
        return Err(ListmonkError::validation("page must be at least 1"));
    }
    if per_page == 0 || per_page > PER_PAGE_MAX {
        return Err(ListmonkError::validation(format!(
            "per_page must be between 1 and {PER_PAGE_MAX}, got {per_page}"
        )));
    }
    Ok(())
}
