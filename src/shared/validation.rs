use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use validator::ValidationError;

lazy_static! {
    /// Regex for validating slug fields
    /// Lowercase word characters in hyphen-separated runs
    /// - Valid: "web-development", "rust_101", "a-b-c"
    /// - Invalid: "-web", "web-", "web--dev", "Web", "web dev"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9_]+(?:-[a-z0-9_]+)*$").unwrap();

    /// Regex for hex colours, long or short form
    /// - Valid: "#1a2B3c", "#fff"
    /// - Invalid: "1a2b3c", "#12345", "#ggg"
    pub static ref COLOR_REGEX: Regex = Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
}

/// Optional slug field: blank means "derive from the title"
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || SLUG_REGEX.is_match(value) {
        return Ok(());
    }
    let mut err = ValidationError::new("slug");
    err.message = Some("Slug may only contain lowercase letters, digits, underscores and single hyphens".into());
    Err(err)
}

/// Optional colour field: blank clears it
pub fn validate_color(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || COLOR_REGEX.is_match(value) {
        return Ok(());
    }
    let mut err = ValidationError::new("color");
    err.message = Some("Color must be a hex value such as #1a2b3c".into());
    Err(err)
}

/// Largest price a `NUMERIC(10, 2)` column holds
fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Course prices must not be negative and must fit the price column
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        let mut err = ValidationError::new("price_negative");
        err.message = Some("Price must not be negative".into());
        return Err(err);
    }
    // Stored rounded to cents
    if price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero) > max_price() {
        let mut err = ValidationError::new("price_too_large");
        err.message = Some("Price must not exceed 99999999.99".into());
        return Err(err);
    }
    Ok(())
}

/// Required text fields must contain something other than whitespace
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("This field is required".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("web-development"));
        assert!(SLUG_REGEX.is_match("rust_101"));
        assert!(SLUG_REGEX.is_match("a"));
        assert!(SLUG_REGEX.is_match("a-b-c"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-web")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("web-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("web--dev")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Web")); // uppercase
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("web dev")); // space
    }

    #[test]
    fn test_color_regex() {
        assert!(COLOR_REGEX.is_match("#1a2B3c"));
        assert!(COLOR_REGEX.is_match("#fff"));
        assert!(!COLOR_REGEX.is_match("1a2b3c"));
        assert!(!COLOR_REGEX.is_match("#12345"));
        assert!(!COLOR_REGEX.is_match("#ggg"));
    }

    #[test]
    fn test_optional_fields_accept_blank() {
        assert!(validate_slug("").is_ok());
        assert!(validate_slug("web-dev").is_ok());
        assert!(validate_slug("Web Dev").is_err());
        assert!(validate_color("  ").is_ok());
        assert!(validate_color("#abc").is_ok());
        assert!(validate_color("red").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(&Decimal::ZERO).is_ok());
        assert!(validate_price(&Decimal::from_str("49.99").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("-0.01").unwrap()).is_err());
    }

    #[test]
    fn test_validate_price_upper_bound() {
        assert!(validate_price(&Decimal::from_str("99999999.99").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("99999999.994").unwrap()).is_ok());
        assert!(validate_price(&Decimal::from_str("99999999.995").unwrap()).is_err());

        let err = validate_price(&Decimal::from_str("100000000").unwrap()).unwrap_err();
        assert_eq!(err.code, "price_too_large");
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Intro").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }
}
