//! Input validators used by dashboard forms.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::outcome::Outcome;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid date")]
pub struct InvalidDate;

/// Tests whether `domain` looks like a valid domain name: at least two
/// dot-separated labels, an optional trailing dot, and at most 253 characters
/// without it.
pub fn validate_domain(domain: &str) -> bool {
    let name = domain.strip_suffix('.').unwrap_or(domain);
    if name.is_empty() || name.len() > MAX_DOMAIN_LEN {
        return false;
    }

    let mut labels = 0usize;
    for label in name.split('.') {
        if !is_valid_label(label) {
            return false;
        }
        labels += 1;
    }
    labels >= 2
}

// `_` is only accepted as the first character of a label.
fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LEN
        && label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        && !label.starts_with('-')
        && !label.ends_with('-')
        && !label[1..].contains('_')
}

/// Parses an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub fn validate_date(date: &str) -> Outcome<DateTime<Utc>, InvalidDate> {
    let date = date.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return Outcome::Ok(parsed.with_timezone(&Utc));
    }

    match NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
    {
        Some(midnight) => Outcome::Ok(midnight.and_utc()),
        None => Outcome::Err(InvalidDate),
    }
}
