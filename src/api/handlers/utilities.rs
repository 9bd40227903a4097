//! Stateless utility endpoints: phone formatting, document field
//! extraction, pincode proximity and city lookup.

use axum::extract::Path;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    ApiResponse, CityPincode, DocumentRequest, PhoneRequest, PincodePairParams, PincodeProximity,
};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::app_state::AppState;
use crate::domain::document_text::{DocumentFields, extract_fields};
use crate::domain::phone::PhoneNumber;
use crate::domain::pincode::{
    approximate_distance_km, is_pincode_nearby, is_valid_pincode, pincode_for_city,
};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /api/phone/validate` — Every form of a phone number.
#[utoipa::path(
    post,
    path = "/api/phone/validate",
    tag = "Utilities",
    summary = "Validate and format a phone number",
    description = "Returns the cleaned, display and international forms together with the validity verdict. Invalid numbers are not an error; see `isValid`.",
    request_body = PhoneRequest,
    responses(
        (status = 200, description = "Phone forms, wrapped in the success envelope", body = PhoneNumber),
        (status = 400, description = "Malformed body", body = ErrorResponse),
    )
)]
pub async fn validate_phone(ApiJson(req): ApiJson<PhoneRequest>) -> impl IntoResponse {
    Json(ApiResponse::ok(PhoneNumber::parse(&req.phone)))
}

/// `POST /api/documents/extract` — Labelled fields from document text.
#[utoipa::path(
    post,
    path = "/api/documents/extract",
    tag = "Utilities",
    summary = "Extract application fields from document text",
    request_body = DocumentRequest,
    responses(
        (status = 200, description = "Recognised fields, wrapped in the success envelope", body = DocumentFields),
        (status = 400, description = "Malformed body", body = ErrorResponse),
    )
)]
pub async fn extract_document(ApiJson(req): ApiJson<DocumentRequest>) -> impl IntoResponse {
    let fields = extract_fields(&req.text);
    tracing::debug!(found = fields.found(), "document fields extracted");
    Json(ApiResponse::ok(fields))
}

/// `GET /api/pincodes/nearby?from=&to=` — Proximity of two pincodes.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidPincode`] unless both are 6 digits.
#[utoipa::path(
    get,
    path = "/api/pincodes/nearby",
    tag = "Utilities",
    summary = "Compare two pincodes",
    params(PincodePairParams),
    responses(
        (status = 200, description = "Proximity verdict, wrapped in the success envelope", body = PincodeProximity),
        (status = 400, description = "Invalid pincode", body = ErrorResponse),
    )
)]
pub async fn pincode_proximity(
    ApiQuery(params): ApiQuery<PincodePairParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let from = params.from.trim();
    let to = params.to.trim();
    if let Some(bad) = [from, to].into_iter().find(|p| !is_valid_pincode(p)) {
        return Err(GatewayError::InvalidPincode(bad.to_string()));
    }
    Ok(Json(ApiResponse::ok(PincodeProximity {
        from: from.to_string(),
        to: to.to_string(),
        nearby: is_pincode_nearby(from, to),
        distance_km: approximate_distance_km(from, to),
    })))
}

/// `GET /api/pincodes/city/{cityName}` — Representative pincode of a city.
#[utoipa::path(
    get,
    path = "/api/pincodes/city/{city_name}",
    tag = "Utilities",
    summary = "Resolve a city to a pincode",
    params(("city_name" = String, Path, description = "City name")),
    responses(
        (status = 200, description = "Pincode, or null for unknown cities, wrapped in the success envelope", body = CityPincode),
    )
)]
pub async fn city_pincode(Path(city_name): Path<String>) -> impl IntoResponse {
    let pincode = pincode_for_city(&city_name).map(str::to_string);
    Json(ApiResponse::ok(CityPincode {
        city: city_name,
        pincode,
    }))
}

/// Utility routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/phone/validate", post(validate_phone))
        .route("/documents/extract", post(extract_document))
        .route("/pincodes/nearby", get(pincode_proximity))
        .route("/pincodes/city/{city_name}", get(city_pincode))
}
