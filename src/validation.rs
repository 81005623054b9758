// Validation utilities module
// Custom validation functions for domain-specific rules

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use validator::ValidationError;

static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static HOURS_RE: OnceLock<Regex> = OnceLock::new();

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone regex is valid"))
}

fn hours_re() -> &'static Regex {
    // "9:00-22:00" style ranges, 24-hour clock
    HOURS_RE.get_or_init(|| {
        Regex::new(r"^([01]?\d|2[0-3]):[0-5]\d-([01]?\d|2[0-3]):[0-5]\d$")
            .expect("hours regex is valid")
    })
}

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Validates a phone number in E.164-ish form: optional leading +, 7-15 digits
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone_re().is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone"))
    }
}

/// Validates an opening-hours map: lowercase weekday keys, "open-close" values
/// like "9:00-22:00"
pub fn validate_opening_hours(hours: &HashMap<String, String>) -> Result<(), ValidationError> {
    for (day, range) in hours {
        if !WEEKDAYS.contains(&day.as_str()) {
            return Err(ValidationError::new("invalid_opening_hours_day"));
        }
        if !hours_re().is_match(range) {
            return Err(ValidationError::new("invalid_opening_hours_range"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_international_phone_numbers() {
        assert!(validate_phone("+14155550123").is_ok());
        assert!(validate_phone("0612345678").is_ok());
    }

    #[test]
    fn rejects_malformed_phone_numbers() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("555-0123").is_err());
        assert!(validate_phone("+1 415 555 0123").is_err());
        assert!(validate_phone("notaphone").is_err());
    }

    #[test]
    fn accepts_well_formed_opening_hours() {
        let mut hours = HashMap::new();
        hours.insert("monday".to_string(), "9:00-22:00".to_string());
        hours.insert("friday".to_string(), "09:00-23:30".to_string());
        hours.insert("sunday".to_string(), "10:00-21:00".to_string());
        assert!(validate_opening_hours(&hours).is_ok());
    }

    #[test]
    fn rejects_unknown_day_keys() {
        let mut hours = HashMap::new();
        hours.insert("funday".to_string(), "9:00-22:00".to_string());
        assert!(validate_opening_hours(&hours).is_err());
    }

    #[test]
    fn rejects_malformed_time_ranges() {
        for bad in ["9-22", "9:00", "25:00-26:00", "9:75-22:00", ""] {
            let mut hours = HashMap::new();
            hours.insert("monday".to_string(), bad.to_string());
            assert!(
                validate_opening_hours(&hours).is_err(),
                "range {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn empty_opening_hours_are_allowed() {
        assert!(validate_opening_hours(&HashMap::new()).is_ok());
    }
}
