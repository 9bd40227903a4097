//! REST API layer: route handlers, DTOs, extractors, and router composition.
//!
//! Resource endpoints are mounted under `/api`; `/health` sits at the root.
//! With the `swagger-ui` feature the OpenAPI document is served at
//! `/api-docs/openapi.json` and browsable at `/swagger-ui`.

pub mod dto;
pub mod extract;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "BookMyBlock Gateway",
        description = "Events, theater catalogue, theater applications and seat layouts for the BookMyBlock dashboards."
    ),
    paths(
        handlers::events::create_event,
        handlers::events::list_events,
        handlers::events::user_events,
        handlers::events::theater_events,
        handlers::events::event_stats,
        handlers::events::get_event,
        handlers::events::update_event,
        handlers::events::cancel_event,
        handlers::events::delete_event,
        handlers::theaters::list_theaters,
        handlers::theaters::theaters_near,
        handlers::theaters::theaters_in_city,
        handlers::theaters::search_theaters,
        handlers::theaters::events_near,
        handlers::applications::submit_application,
        handlers::applications::list_applications,
        handlers::applications::approved_applications,
        handlers::applications::get_application,
        handlers::applications::approve_application,
        handlers::applications::reject_application,
        handlers::layouts::generate_layout,
        handlers::layouts::get_layout,
        handlers::layouts::save_layout,
        handlers::layouts::get_seat,
        handlers::utilities::validate_phone,
        handlers::utilities::extract_document,
        handlers::utilities::pincode_proximity,
        handlers::utilities::city_pincode,
        handlers::auth::me,
        handlers::auth::logout,
        handlers::system::health_handler,
    ),
    tags(
        (name = "Events", description = "Screening events"),
        (name = "Theaters", description = "Aggregated theater catalogue"),
        (name = "Theater Applications", description = "Owner registration and admin review"),
        (name = "Layouts", description = "Seat maps and pricing"),
        (name = "Utilities", description = "Phone, document and pincode helpers"),
        (name = "Auth", description = "Dashboard sessions"),
        (name = "System", description = "Health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::GatewayConfig;

    fn app() -> Router {
        let Ok(state) = AppState::from_config(&GatewayConfig::default()) else {
            panic!("state should build");
        };
        build_router().with_state(state)
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        let Ok(request) = request else {
            panic!("request should build");
        };
        let Ok(response) = app.clone().oneshot(request).await else {
            panic!("router is infallible");
        };
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body should read");
        };
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn tomorrow() -> String {
        (chrono::Utc::now().date_naive() + chrono::Days::new(1)).to_string()
    }

    #[tokio::test]
    async fn approved_theater_appears_near_its_pincode() {
        let app = app();
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/theater-applications",
            Some(json!({
                "theaterName": "Galaxy",
                "ownerName": "Lakshmi",
                "ownerEmail": "lakshmi@example.com",
                "ownerPhone": "+91 98765 43210",
                "address": "Tilak Road",
                "city": "Tirupati",
                "state": "Andhra Pradesh",
                "pincode": "517501",
                "screens": 2,
                "totalSeats": 200
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let Some(id) = body["data"]["id"].as_str().map(str::to_string) else {
            panic!("application id missing: {body}");
        };

        let (status, _) = call(&app, Method::GET, "/api/theaters/near/517502", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(
            &app,
            Method::PATCH,
            &format!("/api/theater-applications/{id}/approve"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/events",
            Some(json!({
                "theaterId": id,
                "movieTitle": "Kalki",
                "startDate": tomorrow(),
                "endDate": tomorrow(),
                "showTimes": ["18:00"],
                "ticketPrice": 250
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = call(&app, Method::GET, "/api/theaters/near/517502", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], "Galaxy");
        assert_eq!(body["data"][0]["distanceKm"], 0);
        assert_eq!(body["data"][0]["ownerPhone"], "98765 43210");
        assert_eq!(body["data"][0]["events"][0]["movieTitle"], "Kalki");
    }

    #[tokio::test]
    async fn errors_use_the_failure_envelope() {
        let app = app();
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/events",
            Some(json!({ "theaterId": "t1", "ticketPrice": "cheap" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], 1001);

        let (status, body) = call(
            &app,
            Method::PATCH,
            "/api/events/42/cancel",
            Some(json!({ "reason": "rain" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);

        let (status, _) = call(&app, Method::GET, "/api/theaters/near/51750", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&app, Method::GET, "/api/auth/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn openapi_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/events",
            "/api/events/{event_id}/cancel",
            "/api/theaters/near/{pincode}",
            "/api/theater-applications/{id}/approve",
            "/api/layouts/{theater_id}/screens/{screen_id}/seats/{row}/{number}",
            "/api/pincodes/nearby",
            "/api/auth/me",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
