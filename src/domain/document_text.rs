//! Field extraction from theater application documents.
//!
//! Owners upload a PDF with their application; the text layer of that PDF
//! is stored alongside the application. This module pulls the labelled
//! fields out of that plaintext with regular expressions. Labels are matched
//! case-insensitively and may be followed by `:`, `-` or `=`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use super::phone::validate_phone_number;

// Patterns are compile-time constants; `None` only if one is malformed,
// in which case that field is never extracted.
type Pattern = LazyLock<Option<Regex>>;

fn labelled(labels: &str) -> Option<Regex> {
    Regex::new(&format!(
        r"(?im)^[ \t]*(?:{labels})[ \t]*[:\-=][ \t]*(.+?)[ \t]*$"
    ))
    .ok()
}

static THEATER_NAME: Pattern = LazyLock::new(|| {
    labelled(r"theat(?:er|re)[ \t]*name|cinema[ \t]*name|name[ \t]*of[ \t]*(?:the[ \t]*)?theat(?:er|re)")
});
static OWNER_NAME: Pattern = LazyLock::new(|| labelled(r"owner[ \t]*name|proprietor|owner"));
static EMAIL_LABELLED: Pattern = LazyLock::new(|| labelled(r"e-?mail(?:[ \t]*id)?"));
static PHONE_LABELLED: Pattern = LazyLock::new(|| {
    labelled(r"phone(?:[ \t]*number)?|mobile(?:[ \t]*number)?|contact(?:[ \t]*number)?")
});
static ADDRESS: Pattern = LazyLock::new(|| labelled(r"address|location"));
static CITY: Pattern = LazyLock::new(|| labelled(r"city|town"));
static STATE: Pattern = LazyLock::new(|| labelled(r"state"));
static PINCODE_LABELLED: Pattern =
    LazyLock::new(|| labelled(r"pin[ \t]*code|pincode|postal[ \t]*code|zip"));
static SCREENS: Pattern = LazyLock::new(|| {
    labelled(r"(?:number[ \t]*of[ \t]*|no\.?[ \t]*of[ \t]*|total[ \t]*)?screens")
});
static SEATS: Pattern = LazyLock::new(|| {
    labelled(
        r"(?:number[ \t]*of[ \t]*|no\.?[ \t]*of[ \t]*|total[ \t]*)?(?:seats|seating[ \t]*capacity|capacity)",
    )
});
static LICENSE: Pattern = LazyLock::new(|| labelled(r"licen[cs]e(?:[ \t]*(?:number|no\.?))?"));

static ANY_EMAIL: Pattern =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").ok());
static ANY_PINCODE: Pattern = LazyLock::new(|| Regex::new(r"\b[1-9][0-9]{5}\b").ok());
static FIRST_NUMBER: Pattern = LazyLock::new(|| Regex::new(r"[0-9][0-9,]*").ok());

/// Fields recognised in an application document. Absent labels stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFields {
    /// Theater name.
    pub theater_name: Option<String>,
    /// Owner name.
    pub owner_name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone, cleaned to 10 digits when valid.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State.
    pub state: Option<String>,
    /// 6-digit pincode.
    pub pincode: Option<String>,
    /// Number of screens.
    pub screens: Option<u32>,
    /// Total seats.
    pub total_seats: Option<u32>,
    /// Cinema license number.
    pub license_number: Option<String>,
}

impl DocumentFields {
    /// Number of fields that were recognised.
    #[must_use]
    pub fn found(&self) -> usize {
        [
            self.theater_name.is_some(),
            self.owner_name.is_some(),
            self.email.is_some(),
            self.phone.is_some(),
            self.address.is_some(),
            self.city.is_some(),
            self.state.is_some(),
            self.pincode.is_some(),
            self.screens.is_some(),
            self.total_seats.is_some(),
            self.license_number.is_some(),
        ]
        .iter()
        .filter(|found| **found)
        .count()
    }
}

fn capture(re: &Option<Regex>, text: &str) -> Option<String> {
    re.as_ref()?
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn find(re: &Option<Regex>, text: &str) -> Option<String> {
    re.as_ref()?.find(text).map(|m| m.as_str().to_string())
}

fn capture_number(re: &Option<Regex>, text: &str) -> Option<u32> {
    let value = capture(re, text)?;
    let digits = find(&FIRST_NUMBER, &value)?.replace(',', "");
    digits.parse().ok()
}

/// Extracts labelled fields from document plaintext.
///
/// Email and pincode fall back to the first match anywhere in the text when
/// no labelled line is present. Phone numbers are kept only if they pass
/// validation.
#[must_use]
pub fn extract_fields(text: &str) -> DocumentFields {
    let email = capture(&EMAIL_LABELLED, text)
        .and_then(|v| find(&ANY_EMAIL, &v))
        .or_else(|| find(&ANY_EMAIL, text));

    let pincode = capture(&PINCODE_LABELLED, text)
        .and_then(|v| find(&ANY_PINCODE, &v))
        .or_else(|| find(&ANY_PINCODE, text));

    let phone = capture(&PHONE_LABELLED, text).and_then(|v| validate_phone_number(&v).ok());

    DocumentFields {
        theater_name: capture(&THEATER_NAME, text),
        owner_name: capture(&OWNER_NAME, text),
        email,
        phone,
        address: capture(&ADDRESS, text),
        city: capture(&CITY, text),
        state: capture(&STATE, text),
        pincode,
        screens: capture_number(&SCREENS, text),
        total_seats: capture_number(&SEATS, text),
        license_number: capture(&LICENSE, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
THEATER APPLICATION FORM
Theater Name: Sri Venkateswara Cinemas
Owner Name : R. Prakash
Email: prakash@svcinemas.in
Mobile Number: +91 98765 43210
Address: 12 Gandhi Road, Near Bus Stand
City: Tirupati
State: Andhra Pradesh
Pincode: 517501
Number of Screens: 3
Total Seats: 1,200
License No.: AP/TPT/2024/118
";

    #[test]
    fn extracts_every_labelled_field() {
        let fields = extract_fields(SAMPLE);
        assert_eq!(
            fields.theater_name.as_deref(),
            Some("Sri Venkateswara Cinemas")
        );
        assert_eq!(fields.owner_name.as_deref(), Some("R. Prakash"));
        assert_eq!(fields.email.as_deref(), Some("prakash@svcinemas.in"));
        assert_eq!(fields.phone.as_deref(), Some("9876543210"));
        assert_eq!(
            fields.address.as_deref(),
            Some("12 Gandhi Road, Near Bus Stand")
        );
        assert_eq!(fields.city.as_deref(), Some("Tirupati"));
        assert_eq!(fields.state.as_deref(), Some("Andhra Pradesh"));
        assert_eq!(fields.pincode.as_deref(), Some("517501"));
        assert_eq!(fields.screens, Some(3));
        assert_eq!(fields.total_seats, Some(1200));
        assert_eq!(fields.license_number.as_deref(), Some("AP/TPT/2024/118"));
        assert_eq!(fields.found(), 11);
    }

    #[test]
    fn falls_back_to_unlabelled_email_and_pincode() {
        let text = "Reach us at box@office.com\nGandhi Nagar, Chittoor 517001";
        let fields = extract_fields(text);
        assert_eq!(fields.email.as_deref(), Some("box@office.com"));
        assert_eq!(fields.pincode.as_deref(), Some("517001"));
        assert!(fields.theater_name.is_none());
    }

    #[test]
    fn invalid_phone_is_dropped() {
        let fields = extract_fields("Phone: 12345");
        assert!(fields.phone.is_none());
    }

    #[test]
    fn empty_text_finds_nothing() {
        let fields = extract_fields("");
        assert_eq!(fields, DocumentFields::default());
        assert_eq!(fields.found(), 0);
    }
}
