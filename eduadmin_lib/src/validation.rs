use chrono::NaiveDate;
use eduadmin_api::types::{DayOfWeek, GradeItem, StudentStatus};

use crate::error::AdminError;

pub const MAX_SEARCH_LENGTH: usize = 100;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_CAPACITY: i64 = 1000;
pub const MAX_CREDITS: f64 = 20.0;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, AdminError> {
    if input.len() > max_len {
        return Err(AdminError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(AdminError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a search/name string: enforce length, strip control chars, trim.
pub fn validate_search(input: &str) -> Result<String, AdminError> {
    sanitize_text(input, MAX_SEARCH_LENGTH)
}

/// Validate page number (must be >= 1).
pub fn validate_page(page: i64) -> Result<i64, AdminError> {
    if page < 1 {
        return Err(AdminError::InvalidInput("page must be >= 1".to_string()));
    }
    Ok(page)
}

/// Validate page size (must be 1..=100).
pub fn validate_page_size(page_size: i64) -> Result<i64, AdminError> {
    if !(1..=100).contains(&page_size) {
        return Err(AdminError::InvalidInput(
            "page_size must be between 1 and 100".to_string(),
        ));
    }
    Ok(page_size)
}

/// Validate a semester identifier: two consecutive academic years and a
/// term number, e.g. `2025-2026-1`.
pub fn validate_semester(input: &str) -> Result<String, AdminError> {
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.split('-').collect();
    let invalid = || {
        AdminError::InvalidInput(format!(
            "invalid semester '{}'. Expected format: YYYY-YYYY-T with consecutive years and term 1-3 (e.g., 2025-2026-1)",
            trimmed
        ))
    };
    if parts.len() != 3 {
        return Err(invalid());
    }
    let first: i64 = parts[0].parse().map_err(|_| invalid())?;
    let second: i64 = parts[1].parse().map_err(|_| invalid())?;
    let term: i64 = parts[2].parse().map_err(|_| invalid())?;
    if parts[0].len() != 4 || parts[1].len() != 4 || second != first + 1 || !(1..=3).contains(&term)
    {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}

/// Validate an account password: at least 8 characters with an uppercase
/// letter, a lowercase letter, and a digit.
pub fn validate_password(input: &str) -> Result<String, AdminError> {
    if input.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AdminError::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    let has_upper = input.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = input.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = input.chars().any(|c| c.is_ascii_digit());
    if !(has_upper && has_lower && has_digit) {
        return Err(AdminError::InvalidInput(
            "password must contain an uppercase letter, a lowercase letter, and a digit"
                .to_string(),
        ));
    }
    Ok(input.to_string())
}

/// Validate a student account status: case-insensitive.
pub fn validate_status(input: &str) -> Result<StudentStatus, AdminError> {
    match input.trim().to_lowercase().as_str() {
        "active" => Ok(StudentStatus::Active),
        "locked" => Ok(StudentStatus::Locked),
        _ => Err(AdminError::InvalidInput(format!(
            "unknown status '{}'. Valid values: active, locked",
            input
        ))),
    }
}

/// Validate a day of week: case-insensitive, accepts full names too.
pub fn validate_day(input: &str) -> Result<DayOfWeek, AdminError> {
    match input.trim().to_lowercase().as_str() {
        "mon" | "monday" => Ok(DayOfWeek::Mon),
        "tue" | "tuesday" => Ok(DayOfWeek::Tue),
        "wed" | "wednesday" => Ok(DayOfWeek::Wed),
        "thu" | "thursday" => Ok(DayOfWeek::Thu),
        "fri" | "friday" => Ok(DayOfWeek::Fri),
        "sat" | "saturday" => Ok(DayOfWeek::Sat),
        "sun" | "sunday" => Ok(DayOfWeek::Sun),
        _ => Err(AdminError::InvalidInput(format!(
            "unknown day '{}'. Valid values: Mon, Tue, Wed, Thu, Fri, Sat, Sun",
            input
        ))),
    }
}

/// Validate a course credit value: 0..=20 in half-credit steps.
pub fn validate_credits(credits: f64) -> Result<f64, AdminError> {
    if !credits.is_finite() || !(0.0..=MAX_CREDITS).contains(&credits) {
        return Err(AdminError::InvalidInput(format!(
            "credits must be between 0 and {}, got {}",
            MAX_CREDITS, credits
        )));
    }
    let doubled = credits * 2.0;
    if (doubled - doubled.round()).abs() > 1e-9 {
        return Err(AdminError::InvalidInput(format!(
            "credits must be a multiple of 0.5, got {}",
            credits
        )));
    }
    Ok(credits)
}

/// Validate a classroom capacity (must be 1..=1000).
pub fn validate_capacity(capacity: i64) -> Result<i64, AdminError> {
    if !(1..=MAX_CAPACITY).contains(&capacity) {
        return Err(AdminError::InvalidInput(format!(
            "capacity must be between 1 and {}, got {}",
            MAX_CAPACITY, capacity
        )));
    }
    Ok(capacity)
}

/// Validate a cohort enrollment year.
pub fn validate_enrollment_year(year: i64) -> Result<i64, AdminError> {
    if !(2000..=2100).contains(&year) {
        return Err(AdminError::InvalidInput(format!(
            "enrollment year must be between 2000 and 2100, got {}",
            year
        )));
    }
    Ok(year)
}

/// Validate an email address: one `@` with a dotted domain after it.
pub fn validate_email(input: &str) -> Result<String, AdminError> {
    let trimmed = input.trim();
    let invalid = || {
        AdminError::InvalidInput(format!(
            "invalid email address '{}' (e.g., zhang.wei@example.edu)",
            trimmed
        ))
    };
    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}

/// Validate a course's grade composition: every weight in (0, 1] and the
/// weights summing to 1.
pub fn validate_grade_items(items: &[GradeItem]) -> Result<(), AdminError> {
    if items.is_empty() {
        return Err(AdminError::InvalidInput(
            "a course needs at least one grade item".to_string(),
        ));
    }
    for item in items {
        if item.item_name.trim().is_empty() {
            return Err(AdminError::InvalidInput(
                "grade item names must not be empty".to_string(),
            ));
        }
        if !item.weight.is_finite() || item.weight <= 0.0 || item.weight > 1.0 {
            return Err(AdminError::InvalidInput(format!(
                "grade item weight must be in (0, 1], got {} for '{}'",
                item.weight, item.item_name
            )));
        }
    }
    let total: f64 = items.iter().map(|item| item.weight).sum();
    if (total - 1.0).abs() > 1e-6 {
        return Err(AdminError::InvalidInput(format!(
            "grade item weights must sum to 1, got {}",
            total
        )));
    }
    Ok(())
}

/// Validate a YYYY-MM-DD date string.
pub fn validate_date(input: &str) -> Result<NaiveDate, AdminError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        AdminError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2025-06-01)",
            trimmed
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Search/name sanitization --

    #[test]
    fn search_normal_text() {
        assert_eq!(validate_search("王伟").unwrap(), "王伟");
    }

    #[test]
    fn search_control_chars_stripped() {
        assert_eq!(validate_search("Zha\x00ng\x01").unwrap(), "Zhang");
    }

    #[test]
    fn search_max_length_exceeded() {
        let long = "x".repeat(MAX_SEARCH_LENGTH + 1);
        assert!(validate_search(&long).is_err());
    }

    #[test]
    fn search_empty_after_trim() {
        assert!(validate_search("   ").is_err());
    }

    #[test]
    fn search_whitespace_trimmed() {
        assert_eq!(validate_search("  软件2301  ").unwrap(), "软件2301");
    }

    // -- Page bounds --

    #[test]
    fn page_valid() {
        assert_eq!(validate_page(1).unwrap(), 1);
        assert_eq!(validate_page(100).unwrap(), 100);
    }

    #[test]
    fn page_zero_rejected() {
        assert!(validate_page(0).is_err());
    }

    #[test]
    fn page_negative_rejected() {
        assert!(validate_page(-1).is_err());
    }

    #[test]
    fn page_size_valid() {
        assert_eq!(validate_page_size(1).unwrap(), 1);
        assert_eq!(validate_page_size(100).unwrap(), 100);
    }

    #[test]
    fn page_size_zero_rejected() {
        assert!(validate_page_size(0).is_err());
    }

    #[test]
    fn page_size_over_100_rejected() {
        assert!(validate_page_size(101).is_err());
    }

    // -- Semester validation --

    #[test]
    fn semester_valid() {
        assert_eq!(validate_semester("2025-2026-1").unwrap(), "2025-2026-1");
        assert_eq!(validate_semester("2024-2025-3").unwrap(), "2024-2025-3");
    }

    #[test]
    fn semester_trimmed() {
        assert_eq!(validate_semester("  2025-2026-2  ").unwrap(), "2025-2026-2");
    }

    #[test]
    fn semester_years_must_be_consecutive() {
        assert!(validate_semester("2025-2027-1").is_err());
        assert!(validate_semester("2026-2025-1").is_err());
    }

    #[test]
    fn semester_term_out_of_range() {
        assert!(validate_semester("2025-2026-0").is_err());
        assert!(validate_semester("2025-2026-4").is_err());
    }

    #[test]
    fn semester_malformed() {
        assert!(validate_semester("2025-2026").is_err());
        assert!(validate_semester("25-26-1").is_err());
        assert!(validate_semester("spring").is_err());
        assert!(validate_semester("").is_err());
    }

    // -- Password validation --

    #[test]
    fn password_valid() {
        assert_eq!(validate_password("Passw0rd").unwrap(), "Passw0rd");
    }

    #[test]
    fn password_too_short() {
        assert!(validate_password("Ab1").is_err());
    }

    #[test]
    fn password_missing_classes() {
        assert!(validate_password("alllowercase1").is_err());
        assert!(validate_password("ALLUPPERCASE1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
    }

    // -- Status validation --

    #[test]
    fn status_valid() {
        assert!(matches!(
            validate_status("active").unwrap(),
            StudentStatus::Active
        ));
        assert!(matches!(
            validate_status("locked").unwrap(),
            StudentStatus::Locked
        ));
    }

    #[test]
    fn status_mixed_case() {
        assert!(matches!(
            validate_status("Active").unwrap(),
            StudentStatus::Active
        ));
    }

    #[test]
    fn status_invalid() {
        assert!(validate_status("suspended").is_err());
    }

    // -- Day validation --

    #[test]
    fn day_abbreviated() {
        assert!(matches!(validate_day("Mon").unwrap(), DayOfWeek::Mon));
        assert!(matches!(validate_day("sun").unwrap(), DayOfWeek::Sun));
    }

    #[test]
    fn day_full_name() {
        assert!(matches!(validate_day("wednesday").unwrap(), DayOfWeek::Wed));
    }

    #[test]
    fn day_invalid() {
        assert!(validate_day("someday").is_err());
    }

    // -- Credits validation --

    #[test]
    fn credits_valid() {
        assert_eq!(validate_credits(4.0).unwrap(), 4.0);
        assert_eq!(validate_credits(2.5).unwrap(), 2.5);
        assert_eq!(validate_credits(0.0).unwrap(), 0.0);
        assert_eq!(validate_credits(20.0).unwrap(), 20.0);
    }

    #[test]
    fn credits_out_of_range() {
        assert!(validate_credits(-1.0).is_err());
        assert!(validate_credits(20.5).is_err());
        assert!(validate_credits(f64::NAN).is_err());
    }

    #[test]
    fn credits_quarter_step_rejected() {
        assert!(validate_credits(3.25).is_err());
    }

    // -- Capacity validation --

    #[test]
    fn capacity_valid() {
        assert_eq!(validate_capacity(1).unwrap(), 1);
        assert_eq!(validate_capacity(60).unwrap(), 60);
        assert_eq!(validate_capacity(1000).unwrap(), 1000);
    }

    #[test]
    fn capacity_out_of_range() {
        assert!(validate_capacity(0).is_err());
        assert!(validate_capacity(1001).is_err());
    }

    // -- Enrollment year --

    #[test]
    fn enrollment_year_valid() {
        assert_eq!(validate_enrollment_year(2023).unwrap(), 2023);
    }

    #[test]
    fn enrollment_year_out_of_range() {
        assert!(validate_enrollment_year(1999).is_err());
        assert!(validate_enrollment_year(2101).is_err());
    }

    // -- Email validation --

    #[test]
    fn email_valid() {
        assert_eq!(
            validate_email("zhang.wei@example.edu").unwrap(),
            "zhang.wei@example.edu"
        );
    }

    #[test]
    fn email_invalid() {
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.edu").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("a@b@c.edu").is_err());
    }

    // -- Grade item validation --

    fn item(name: &str, weight: f64) -> GradeItem {
        GradeItem {
            item_name: name.to_string(),
            weight,
        }
    }

    #[test]
    fn grade_items_valid() {
        let items = vec![item("平时成绩", 0.3), item("期末考试", 0.7)];
        assert!(validate_grade_items(&items).is_ok());
    }

    #[test]
    fn grade_items_empty_rejected() {
        assert!(validate_grade_items(&[]).is_err());
    }

    #[test]
    fn grade_items_bad_weight_rejected() {
        assert!(validate_grade_items(&[item("期末考试", 0.0)]).is_err());
        assert!(validate_grade_items(&[item("期末考试", 1.5)]).is_err());
    }

    #[test]
    fn grade_items_must_sum_to_one() {
        let items = vec![item("平时成绩", 0.3), item("期末考试", 0.6)];
        assert!(validate_grade_items(&items).is_err());
    }

    #[test]
    fn grade_items_unnamed_rejected() {
        assert!(validate_grade_items(&[item("  ", 1.0)]).is_err());
    }

    // -- Date validation --

    #[test]
    fn date_valid() {
        let d = validate_date("2025-06-01").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn date_with_whitespace() {
        let d = validate_date("  2025-01-15  ").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn date_invalid_format() {
        assert!(validate_date("06/01/2025").is_err());
        assert!(validate_date("not-a-date").is_err());
    }

    #[test]
    fn date_invalid_values() {
        assert!(validate_date("2025-13-01").is_err());
        assert!(validate_date("2025-02-30").is_err());
    }

    #[test]
    fn date_empty() {
        assert!(validate_date("").is_err());
        assert!(validate_date("   ").is_err());
    }
}
