//! Pure validation predicates over raw field values.
//!
//! These are the canonical field rules for the identity subsystem. They are
//! stateless and perform no I/O, so any surface (HTTP handlers, future form
//! layers, seed tooling) can apply exactly the same checks. The newtypes in
//! [`crate::types`] are thin wrappers over these predicates.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum accepted display-name length (after trimming).
pub const MAX_NAME_LENGTH: usize = 100;

/// Returns true if the value is absent or contains only whitespace.
#[must_use]
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}

/// Structural email check.
///
/// Accepts `local@domain.tld` where the input has exactly one `@`, no
/// consecutive dots, and a domain ending in an alphabetic TLD of at least two
/// characters. Display forms (`Name <a@b.c>`) and comment forms
/// (`a@b.c (work)`) are rejected outright.
#[must_use]
pub fn email_format(email: &str) -> bool {
    if email.is_empty() || email.contains("..") {
        return false;
    }

    // Reject display-name, comment, and whitespace-containing forms.
    if email
        .chars()
        .any(|c| matches!(c, '<' | '>' | '(' | ')' | ',') || c.is_whitespace())
    {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    // Domain must be dot-separated labels with an alphabetic TLD of >= 2 chars.
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }

    labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

/// E.164 phone check: optional leading `+`, a non-zero leading digit, then
/// 1 to 14 more digits (2-15 digits total).
#[must_use]
pub fn phone_e164(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    if !digits.starts_with(['1', '2', '3', '4', '5', '6', '7', '8', '9']) {
        return false;
    }

    (2..=15).contains(&digits.len())
}

/// Returns true if the password meets the minimum length.
///
/// Length is checked before hashing, never after.
#[must_use]
pub fn password_min_length(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LENGTH
}

/// Returns true if the name is 1-100 characters after trimming.
#[must_use]
pub fn name_length(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_NAME_LENGTH
}

/// Returns true if the date of birth is exactly `YYYY-MM-DD` with no
/// surrounding whitespace.
#[must_use]
pub fn dob_format(dob: &str) -> bool {
    static DOB_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DOB_REGEX.get_or_init(|| {
        #[allow(clippy::expect_used)]
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("dob regex is valid")
    });

    regex.is_match(dob)
}

/// Returns true if the date components denote a real calendar day.
///
/// The three numeric components are round-tripped through calendar
/// construction, which rejects days like `2021-02-30` and `2021-02-29`
/// while accepting the leap day `2020-02-29`.
#[must_use]
pub fn dob_calendar_valid(dob: &str) -> bool {
    parse_calendar_date(dob).is_some()
}

/// Returns true if the date is strictly earlier than `today`.
///
/// Today itself is rejected: the comparison is `date < today`, matching the
/// long-standing behavior of this subsystem.
#[must_use]
pub fn dob_not_future(dob: &str, today: NaiveDate) -> bool {
    parse_calendar_date(dob).is_some_and(|date| date < today)
}

/// Parse `YYYY-MM-DD` into a calendar date, or `None` if any component is
/// malformed or the combination is not a real day.
#[must_use]
pub fn parse_calendar_date(dob: &str) -> Option<NaiveDate> {
    let mut parts = dob.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   ")));
        assert!(is_blank(Some("\t\n")));
        assert!(!is_blank(Some("x")));
        assert!(!is_blank(Some("  x  ")));
    }

    #[test]
    fn test_email_format_valid() {
        assert!(email_format("user@example.com"));
        assert!(email_format("user.name+tag@example.co.uk"));
        assert!(email_format("a@b.co"));
    }

    #[test]
    fn test_email_format_structure() {
        assert!(!email_format(""));
        assert!(!email_format("no-at-symbol"));
        assert!(!email_format("two@@example.com"));
        assert!(!email_format("a@b@c.com"));
        assert!(!email_format("@example.com"));
        assert!(!email_format("user@"));
    }

    #[test]
    fn test_email_format_dots() {
        assert!(!email_format("user..name@example.com"));
        assert!(!email_format("user@example..com"));
        assert!(!email_format("user@.example.com"));
        assert!(!email_format("user@example.com."));
    }

    #[test]
    fn test_email_format_tld() {
        assert!(!email_format("user@example"));
        assert!(!email_format("user@example.c"));
        assert!(!email_format("user@example.c0m"));
        assert!(email_format("user@example.museum"));
    }

    #[test]
    fn test_email_format_display_and_comment_forms() {
        assert!(!email_format("Jo <jo@example.com>"));
        assert!(!email_format("jo@example.com (work)"));
        assert!(!email_format("jo smith@example.com"));
    }

    #[test]
    fn test_phone_e164() {
        assert!(phone_e164("+6591234567"));
        assert!(phone_e164("6591234567"));
        assert!(phone_e164("12"));
        assert!(phone_e164("+123456789012345")); // 15 digits
        assert!(!phone_e164("+1234567890123456")); // 16 digits
        assert!(!phone_e164("1")); // 1 digit
        assert!(!phone_e164("+0123456789")); // leading zero
        assert!(!phone_e164("+65 9123 4567")); // spaces
        assert!(!phone_e164("65-9123-4567"));
        assert!(!phone_e164("+"));
        assert!(!phone_e164(""));
    }

    #[test]
    fn test_password_min_length_boundary() {
        assert!(!password_min_length("12345"));
        assert!(password_min_length("123456"));
        assert!(password_min_length("a much longer password"));
        assert!(!password_min_length(""));
    }

    #[test]
    fn test_name_length() {
        assert!(name_length("Jo"));
        assert!(name_length(&"a".repeat(100)));
        assert!(!name_length(&"a".repeat(101)));
        assert!(!name_length("   "));
        assert!(!name_length(""));
    }

    #[test]
    fn test_dob_format() {
        assert!(dob_format("1999-05-02"));
        assert!(!dob_format("1999-5-2"));
        assert!(!dob_format(" 1999-05-02"));
        assert!(!dob_format("1999-05-02 "));
        assert!(!dob_format("1999/05/02"));
        assert!(!dob_format("02-05-1999"));
        assert!(!dob_format(""));
    }

    #[test]
    fn test_dob_calendar_valid() {
        assert!(!dob_calendar_valid("2021-02-30"));
        assert!(!dob_calendar_valid("2023-04-31"));
        assert!(dob_calendar_valid("2020-02-29")); // leap day
        assert!(!dob_calendar_valid("2021-02-29")); // not a leap year
        assert!(dob_calendar_valid("1999-05-02"));
        assert!(!dob_calendar_valid("1999-13-01"));
        assert!(!dob_calendar_valid("1999-00-01"));
    }

    #[test]
    fn test_dob_not_future_strict() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert!(!dob_not_future("2026-08-30", today)); // today rejected
        assert!(dob_not_future("2026-08-29", today)); // yesterday accepted
        assert!(!dob_not_future("2026-08-31", today)); // tomorrow rejected
        assert!(dob_not_future("1999-05-02", today));
    }
}
