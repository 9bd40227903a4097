//! DTOs for the stateless utility endpoints (phone, documents, pincodes).

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Request body for `POST /api/phone/validate`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PhoneRequest {
    /// Phone number in any common format.
    #[serde(default)]
    pub phone: String,
}

/// Request body for `POST /api/documents/extract`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DocumentRequest {
    /// Text layer of the document.
    #[serde(default)]
    pub text: String,
}

/// Query parameters for `GET /api/pincodes/nearby`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PincodePairParams {
    /// First pincode.
    #[serde(default)]
    pub from: String,
    /// Second pincode.
    #[serde(default)]
    pub to: String,
}

/// Response of `GET /api/pincodes/nearby`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PincodeProximity {
    /// First pincode.
    pub from: String,
    /// Second pincode.
    pub to: String,
    /// Whether the two are considered nearby.
    pub nearby: bool,
    /// Approximate distance in kilometres.
    pub distance_km: Option<u32>,
}

/// Response of `GET /api/pincodes/city/{cityName}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityPincode {
    /// City as queried.
    pub city: String,
    /// Representative pincode, if the city is known.
    pub pincode: Option<String>,
}
