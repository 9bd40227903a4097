//! Theater applications submitted by owners and reviewed by admins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApplicationId;
use super::phone::validate_phone_number;
use super::pincode::is_valid_pincode;
use crate::error::GatewayError;

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Awaiting admin review.
    Pending,
    /// Accepted; the theater is listed to users.
    Approved,
    /// Declined.
    Rejected,
}

/// A theater registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TheaterApplication {
    /// Application id; also the theater id once approved.
    pub id: ApplicationId,
    /// Theater name.
    pub theater_name: String,
    /// Owner name.
    pub owner_name: String,
    /// Owner email.
    pub owner_email: String,
    /// Owner phone, cleaned to 10 digits.
    pub owner_phone: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// 6-digit pincode.
    pub pincode: String,
    /// Number of screens.
    pub screens: u32,
    /// Seats across all screens.
    pub total_seats: u32,
    /// Content hash of the pinned application document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_hash: Option<String>,
    /// Text layer of the application document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_text: Option<String>,
    /// Review state.
    pub status: ApplicationStatus,
    /// Admin note (rejection reason or approval remark).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_note: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Input for submitting an application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    /// Theater name.
    pub theater_name: String,
    /// Owner name.
    pub owner_name: String,
    /// Owner email.
    pub owner_email: String,
    /// Owner phone in any common format.
    pub owner_phone: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// 6-digit pincode.
    pub pincode: String,
    /// Number of screens.
    pub screens: u32,
    /// Seats across all screens.
    pub total_seats: u32,
    /// Content hash of the pinned application document.
    #[serde(default)]
    pub document_hash: Option<String>,
    /// Text layer of the application document.
    #[serde(default)]
    pub document_text: Option<String>,
}

impl NewApplication {
    /// Validates the submission and builds a pending application.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for blank fields, a
    /// malformed email, zero screens, or fewer seats than screens;
    /// [`GatewayError::InvalidPincode`] for a bad pincode; and
    /// [`GatewayError::InvalidPhone`] for a bad phone number.
    pub fn into_application(self, now: DateTime<Utc>) -> Result<TheaterApplication, GatewayError> {
        for (field, value) in [
            ("theaterName", &self.theater_name),
            ("ownerName", &self.owner_name),
            ("ownerEmail", &self.owner_email),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
        ] {
            if value.trim().is_empty() {
                return Err(GatewayError::InvalidRequest(format!("{field} is required")));
            }
        }
        let email = self.owner_email.trim();
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(GatewayError::InvalidRequest(format!(
                "invalid ownerEmail: {email}"
            )));
        }
        let pincode = self.pincode.trim();
        if !is_valid_pincode(pincode) {
            return Err(GatewayError::InvalidPincode(pincode.to_string()));
        }
        let owner_phone = validate_phone_number(&self.owner_phone)?;
        if self.screens == 0 {
            return Err(GatewayError::InvalidRequest(
                "screens must be at least 1".to_string(),
            ));
        }
        if self.total_seats < self.screens {
            return Err(GatewayError::InvalidRequest(format!(
                "{} seats cannot fill {} screens",
                self.total_seats, self.screens
            )));
        }

        Ok(TheaterApplication {
            id: ApplicationId::generate(),
            theater_name: self.theater_name.trim().to_string(),
            owner_name: self.owner_name.trim().to_string(),
            owner_email: email.to_string(),
            owner_phone,
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            pincode: pincode.to_string(),
            screens: self.screens,
            total_seats: self.total_seats,
            document_hash: self.document_hash.filter(|h| !h.trim().is_empty()),
            document_text: self.document_text.filter(|t| !t.trim().is_empty()),
            status: ApplicationStatus::Pending,
            review_note: None,
            created_at: now,
            updated_at: now,
        })
    }
}
