//! Request extractors that fail with the gateway's error envelope.
//!
//! Axum's stock `Json`/`Query` rejections answer with plain text and a 422;
//! these wrappers turn them into [`GatewayError::InvalidRequest`] so clients
//! always get `{ "success": false, ... }` with a 400.
//!
//! [`Credentials`] and [`Session`] read the bearer token and dashboard
//! header; only [`Session`] verifies the token.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::app_state::AppState;
use crate::auth::{Dashboard, Identity};
use crate::error::GatewayError;

/// Header selecting the dashboard namespace of a session.
pub const DASHBOARD_HEADER: &str = "x-dashboard";

/// JSON body extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query-string extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Bearer token and dashboard namespace of a request, not yet verified.
///
/// Reads `Authorization: Bearer <token>` and the optional `X-Dashboard`
/// header (`user`, `owner` or `admin`; defaults to `user`).
#[derive(Debug, Clone)]
pub struct Credentials {
    /// The bearer token as presented.
    pub token: String,
    /// Dashboard namespace.
    pub dashboard: Dashboard,
}

impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let dashboard = match parts.headers.get(DASHBOARD_HEADER) {
            Some(value) => value
                .to_str()
                .map_err(|_| {
                    GatewayError::InvalidRequest("invalid X-Dashboard header".to_string())
                })?
                .parse::<Dashboard>()
                .map_err(GatewayError::InvalidRequest)?,
            None => Dashboard::User,
        };
        Ok(Self { token, dashboard })
    }
}

/// A verified caller whose session is recorded in its dashboard namespace.
#[derive(Debug, Clone)]
pub struct Session {
    /// Verified identity.
    pub identity: Identity,
    /// Dashboard namespace of the session.
    pub dashboard: Dashboard,
}

impl FromRequestParts<AppState> for Session {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Credentials { token, dashboard } =
            Credentials::from_request_parts(parts, state).await?;
        let identity = state.auth_service.authenticate(dashboard, &token).await?;
        Ok(Self {
            identity,
            dashboard,
        })
    }
}

fn bearer_token(parts: &Parts) -> Result<String, GatewayError> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| GatewayError::Unauthorized("missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| GatewayError::Unauthorized("invalid Authorization header".to_string()))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| GatewayError::Unauthorized("expected a Bearer token".to_string()))?;
    Ok(token.trim().to_string())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use axum::http::Request as HttpRequest;

    use super::*;

    fn parts(auth: Option<&str>) -> Parts {
        let mut builder = HttpRequest::builder().uri("/api/auth/me");
        if let Some(value) = auth {
            builder = builder.header("authorization", value);
        }
        let Ok(request) = builder.body(()) else {
            panic!("request should build");
        };
        request.into_parts().0
    }

    #[test]
    fn bearer_token_is_required() {
        assert!(matches!(
            bearer_token(&parts(None)),
            Err(GatewayError::Unauthorized(_))
        ));
        assert!(matches!(
            bearer_token(&parts(Some("Basic abc"))),
            Err(GatewayError::Unauthorized(_))
        ));
        assert!(matches!(
            bearer_token(&parts(Some("Bearer abc"))).as_deref(),
            Ok("abc")
        ));
    }
}
