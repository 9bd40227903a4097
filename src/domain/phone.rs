//! Indian mobile number normalization and validation.
//!
//! All functions are pure: they strip formatting, an optional `91` country
//! code, and derive the display (`XXXXX XXXXX`) and submission
//! (`+91XXXXXXXXXX`) forms from the cleaned digits.

use serde::Serialize;
use utoipa::ToSchema;

/// Number of digits in a national Indian mobile number.
pub const MOBILE_DIGITS: usize = 10;

/// Country calling code prepended in the submission form.
pub const COUNTRY_CODE: &str = "91";

/// Reasons a phone number is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PhoneError {
    /// Input was empty or whitespace.
    #[error("phone number is required")]
    Required,
    /// Fewer than 10 digits after cleaning.
    #[error("phone number is too short; expected 10 digits")]
    TooShort,
    /// More than 10 digits after cleaning.
    #[error("phone number is too long; expected 10 digits")]
    TooLong,
    /// First digit is not 6, 7, 8 or 9.
    #[error("phone number has an invalid prefix; must start with 6, 7, 8 or 9")]
    InvalidPrefix,
}

/// Strips non-digits, then drops a leading `91` when exactly 10 digits
/// would remain.
#[must_use]
pub fn clean_phone_number(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    match digits.strip_prefix(COUNTRY_CODE) {
        Some(national) if national.len() == MOBILE_DIGITS => national.to_string(),
        _ => digits,
    }
}

/// Formats as `XXXXX XXXXX`. Numbers that are not 10 digits are returned
/// in cleaned form.
#[must_use]
pub fn format_for_display(input: &str) -> String {
    let cleaned = clean_phone_number(input);
    if cleaned.len() != MOBILE_DIGITS {
        return cleaned;
    }
    let (head, tail) = cleaned.split_at(MOBILE_DIGITS / 2);
    format!("{head} {tail}")
}

/// Formats as `+91XXXXXXXXXX`. Numbers that are not 10 digits are
/// returned in cleaned form.
#[must_use]
pub fn format_for_submission(input: &str) -> String {
    let cleaned = clean_phone_number(input);
    if cleaned.len() != MOBILE_DIGITS {
        return cleaned;
    }
    format!("+{COUNTRY_CODE}{cleaned}")
}

/// Returns `true` for exactly 10 digits starting with 6, 7, 8 or 9.
#[must_use]
pub fn is_valid_indian_number(input: &str) -> bool {
    validate_phone_number(input).is_ok()
}

/// Validates the input and returns the cleaned 10-digit number.
///
/// # Errors
///
/// Returns the first [`PhoneError`] that applies, checked in the order
/// required, too short, too long, invalid prefix.
pub fn validate_phone_number(input: &str) -> Result<String, PhoneError> {
    if input.trim().is_empty() {
        return Err(PhoneError::Required);
    }
    let cleaned = clean_phone_number(input);
    if cleaned.len() < MOBILE_DIGITS {
        return Err(PhoneError::TooShort);
    }
    if cleaned.len() > MOBILE_DIGITS {
        return Err(PhoneError::TooLong);
    }
    if !cleaned.starts_with(['6', '7', '8', '9']) {
        return Err(PhoneError::InvalidPrefix);
    }
    Ok(cleaned)
}

/// Every derived representation of one raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumber {
    /// Input as given.
    pub raw: String,
    /// Digits only, country code removed.
    pub cleaned: String,
    /// `XXXXX XXXXX`.
    pub display: String,
    /// `+91XXXXXXXXXX`.
    pub international: String,
    /// Whether the cleaned number is a valid Indian mobile number.
    pub is_valid: bool,
    /// Validation failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PhoneNumber {
    /// Derives all forms from `raw`. Never fails; see [`Self::is_valid`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let verdict = validate_phone_number(raw);
        Self {
            raw: raw.to_string(),
            cleaned: clean_phone_number(raw),
            display: format_for_display(raw),
            international: format_for_submission(raw),
            is_valid: verdict.is_ok(),
            error: verdict.err().map(|e| e.to_string()),
        }
    }
}
