//! Primitive input validators.
//!
//! Pure checks and normalizers over single values. Rules that coerce
//! (ratings, years, ids, pagination, flags) take the raw
//! `serde_json::Value` so numeric strings behave exactly like numbers;
//! string rules take `&str` once the field helpers have rejected
//! non-string values. Nothing here panics on malformed input.

use chrono::{Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use url::Url;

use librario_common::defaults::{Entidad, LimitOverflow, DEFAULT_PAGE};
use librario_common::types::{EstadoResena, Pagination, Rol};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
    static ref EXTERNAL_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// Validate an email address. Returns the trimmed form.
pub fn validate_email(email: &str) -> Result<String, &'static str> {
    let trimmed = email.trim();
    if EMAIL_REGEX.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err("email must be a valid email address")
    }
}

/// Validate password strength. Every violated rule is reported, not
/// just the first.
pub fn validate_password(password: &str) -> Result<(), Vec<&'static str>> {
    let mut violations = Vec::new();
    if password.chars().count() < 8 {
        violations.push("password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        violations.push("password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        violations.push("password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("password must contain at least one number");
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Validate an ISBN. Separators are stripped; the normalized form must
/// be exactly 10 or 13 digits and is returned.
pub fn validate_isbn(isbn: &str) -> Result<String, &'static str> {
    let normalized: String = isbn.chars().filter(|c| *c != '-' && *c != ' ').collect();
    let digits = normalized.chars().all(|c| c.is_ascii_digit());
    if digits && (normalized.len() == 10 || normalized.len() == 13) {
        Ok(normalized)
    } else {
        Err("isbn must be 10 or 13 digits")
    }
}

/// Validate a star rating: an integer from 1 to 5. Numeric strings
/// coerce; fractional values do not.
pub fn validate_rating(value: &Value) -> Option<u8> {
    let rating = coerce_integer(value)?;
    u8::try_from(rating).ok().filter(|r| (1..=5).contains(r))
}

/// Whether the string parses as a well-formed URL. Any scheme is
/// accepted.
pub fn validate_url(url: &str) -> bool {
    Url::parse(url.trim()).is_ok()
}

/// Validate a username: 3-20 characters from `[A-Za-z0-9_-]` after
/// trimming. Returns the trimmed form.
pub fn validate_username(username: &str) -> Result<String, &'static str> {
    let trimmed = username.trim();
    let length = trimmed.chars().count();
    if !(3..=20).contains(&length) {
        return Err("username must be 3-20 characters");
    }
    if !USERNAME_REGEX.is_match(trimmed) {
        return Err("username can only contain letters, numbers, underscores, and hyphens");
    }
    Ok(trimmed.to_string())
}

/// Validate a publication year: an integer from 1000 up to next year.
pub fn validate_year(value: &Value) -> Option<i32> {
    let year = i32::try_from(coerce_integer(value)?).ok()?;
    let max = Utc::now().year() + 1;
    (1000..=max).contains(&year).then_some(year)
}

/// Validate an external catalogue id: 1-100 characters from
/// `[A-Za-z0-9_-]`.
pub fn validate_external_id(id: &str) -> Result<(), &'static str> {
    let length = id.chars().count();
    if !(1..=100).contains(&length) {
        return Err("external id must be 1-100 characters");
    }
    if !EXTERNAL_ID_REGEX.is_match(id) {
        return Err("external id can only contain letters, numbers, underscores, and hyphens");
    }
    Ok(())
}

/// Parse a positive numeric id. Numeric strings behave identically to
/// numbers; anything else is `None`.
pub fn parse_numeric_id(value: &Value) -> Option<i64> {
    coerce_integer(value).filter(|id| *id > 0)
}

/// Resolve pagination from raw query values. Never fails: anything
/// unusable falls back to the entity's defaults.
pub fn validate_pagination(
    page: Option<&Value>,
    limit: Option<&Value>,
    entidad: Entidad,
) -> Pagination {
    let defaults = entidad.page_defaults();

    let page = page
        .and_then(coerce_integer)
        .and_then(|p| u32::try_from(p).ok())
        .filter(|p| *p >= 1)
        .unwrap_or(DEFAULT_PAGE);

    let requested = limit
        .and_then(coerce_integer)
        .and_then(|l| u32::try_from(l).ok())
        .filter(|l| *l >= 1);
    let limit = match requested {
        Some(limit) if limit > defaults.max_limit => match defaults.overflow {
            LimitOverflow::UseDefault => defaults.limit,
            LimitOverflow::Clamp => defaults.max_limit,
        },
        Some(limit) => limit,
        None => defaults.limit,
    };

    Pagination { page, limit }
}

/// Whether the trimmed text length falls inside `min..=max`.
pub fn validate_text_length(text: &str, min: usize, max: usize) -> bool {
    let length = text.trim().chars().count();
    (min..=max).contains(&length)
}

/// Case-sensitive role lookup.
pub fn validate_user_role(role: &str) -> Option<Rol> {
    Rol::parse(role)
}

/// Case-sensitive review-state lookup.
pub fn validate_resena_estado(estado: &str) -> Option<EstadoResena> {
    EstadoResena::parse(estado)
}

/// Boolean coercion for query flags: `true` as a boolean or the string
/// `"true"`.
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => text == "true",
        _ => false,
    }
}

/// Integers may arrive as JSON numbers or as decimal strings (query
/// parameters). Fractional values never coerce.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_email() {
        assert_eq!(
            validate_email(" user@example.com "),
            Ok("user@example.com".to_string())
        );
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@example").is_err());
        assert!(validate_email("us er@example.com").is_err());
    }

    #[test]
    fn test_validate_password_reports_every_violation() {
        assert!(validate_password("Password123").is_ok());
        let violations = validate_password("abc").unwrap_err();
        assert_eq!(
            violations,
            vec![
                "password must be at least 8 characters",
                "password must contain at least one uppercase letter",
                "password must contain at least one number",
            ]
        );
        assert_eq!(validate_password("NOLOWER123").unwrap_err().len(), 1);
    }

    #[test]
    fn test_validate_isbn_strips_separators() {
        assert_eq!(
            validate_isbn("978-0-596-52068-7"),
            Ok("9780596520687".to_string())
        );
        assert_eq!(validate_isbn("0 596 52068 9"), Ok("0596520689".to_string()));
        assert!(validate_isbn("978059652068").is_err()); // 12 digits
        assert!(validate_isbn("059652068X").is_err());
        assert!(validate_isbn("").is_err());
    }

    #[test]
    fn test_validate_rating_rejects_fractions() {
        assert_eq!(validate_rating(&json!(4)), Some(4));
        assert_eq!(validate_rating(&json!("4")), Some(4));
        assert_eq!(validate_rating(&json!(3.5)), None);
        assert_eq!(validate_rating(&json!("3.5")), None);
        assert_eq!(validate_rating(&json!(0)), None);
        assert_eq!(validate_rating(&json!(6)), None);
        assert_eq!(validate_rating(&Value::Null), None);
    }

    #[test]
    fn test_validate_url_accepts_any_scheme() {
        assert!(validate_url("https://example.com/cover.jpg"));
        assert!(validate_url("ftp://files.example.com/a"));
        assert!(!validate_url("not a url"));
        assert!(!validate_url(""));
    }

    #[test]
    fn test_validate_username() {
        assert_eq!(validate_username(" ana_23 "), Ok("ana_23".to_string()));
        assert!(validate_username("ab").is_err());
        assert!(validate_username("a".repeat(21).as_str()).is_err());
        assert!(validate_username("user name").is_err());
        assert!(validate_username("user@name").is_err());
    }

    #[test]
    fn test_validate_year_bounds() {
        let next_year = Utc::now().year() + 1;
        assert_eq!(validate_year(&json!(1984)), Some(1984));
        assert_eq!(validate_year(&json!("1984")), Some(1984));
        assert_eq!(validate_year(&json!(next_year)), Some(next_year));
        assert_eq!(validate_year(&json!(next_year + 1)), None);
        assert_eq!(validate_year(&json!(999)), None);
    }

    #[test]
    fn test_validate_external_id() {
        assert!(validate_external_id("OL26320A").is_ok());
        assert!(validate_external_id("a").is_ok());
        assert!(validate_external_id("").is_err());
        assert!(validate_external_id("x".repeat(101).as_str()).is_err());
        assert!(validate_external_id("has space").is_err());
    }

    #[test]
    fn test_parse_numeric_id() {
        assert_eq!(parse_numeric_id(&json!(12)), Some(12));
        assert_eq!(parse_numeric_id(&json!("12")), Some(12));
        assert_eq!(parse_numeric_id(&json!(0)), None);
        assert_eq!(parse_numeric_id(&json!(-3)), None);
        assert_eq!(parse_numeric_id(&json!(2.5)), None);
        assert_eq!(parse_numeric_id(&json!("abc")), None);
        assert_eq!(parse_numeric_id(&Value::Null), None);
    }

    #[test]
    fn test_validate_pagination_falls_back_on_garbage() {
        let pagination =
            validate_pagination(Some(&json!("x")), Some(&json!(-5)), Entidad::Libro);
        assert_eq!(pagination, Pagination { page: 1, limit: 12 });

        let pagination = validate_pagination(Some(&json!("3")), Some(&json!("24")), Entidad::Libro);
        assert_eq!(pagination, Pagination { page: 3, limit: 24 });

        let pagination = validate_pagination(None, None, Entidad::Usuario);
        assert_eq!(pagination, Pagination { page: 1, limit: 12 });
    }

    #[test]
    fn test_validate_pagination_oversized_limit() {
        // most entities fall back to the default
        let pagination = validate_pagination(None, Some(&json!(200)), Entidad::Autor);
        assert_eq!(pagination.limit, 12);

        // notifications clamp instead
        let pagination = validate_pagination(None, Some(&json!(200)), Entidad::Notificacion);
        assert_eq!(pagination.limit, 50);
        let pagination = validate_pagination(None, None, Entidad::Notificacion);
        assert_eq!(pagination.limit, 20);
    }

    #[test]
    fn test_validate_text_length_trims_first() {
        assert!(validate_text_length("  hola  ", 1, 4));
        assert!(!validate_text_length("   ", 1, 10));
        assert!(validate_text_length("", 0, 10));
        assert!(!validate_text_length("demasiado", 1, 5));
    }

    #[test]
    fn test_role_and_estado_lookups_are_case_sensitive() {
        assert_eq!(validate_user_role("admin"), Some(Rol::Admin));
        assert_eq!(validate_user_role("Admin"), None);
        assert_eq!(validate_resena_estado("flagged"), Some(EstadoResena::Flagged));
        assert_eq!(validate_resena_estado("FLAGGED"), None);
    }

    #[test]
    fn test_coerce_flag() {
        assert!(coerce_flag(&json!(true)));
        assert!(coerce_flag(&json!("true")));
        assert!(!coerce_flag(&json!("TRUE")));
        assert!(!coerce_flag(&json!(false)));
        assert!(!coerce_flag(&json!(1)));
        assert!(!coerce_flag(&Value::Null));
    }
}
