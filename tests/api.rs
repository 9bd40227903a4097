//! End-to-end tests: the gateway on an ephemeral port, driven over HTTP.
//!
//! The server's owner-service URL points back at itself, so theater
//! aggregation goes through the real HTTP client path.

#![allow(clippy::panic, clippy::indexing_slicing)]

use std::time::Duration;

use axum::Router;
use bookmyblock_gateway::api;
use bookmyblock_gateway::app_state::AppState;
use bookmyblock_gateway::config::GatewayConfig;
use chrono::{Days, Utc};
use serde_json::{Value, json};

async fn spawn_gateway() -> String {
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    let base = format!("http://{addr}");
    let config = GatewayConfig {
        listen_addr: addr,
        owner_service_url: Some(base.clone()),
        owner_service_timeout_secs: 5,
        ..GatewayConfig::default()
    };
    let Ok(state) = AppState::from_config(&config) else {
        panic!("state should build");
    };
    let app: Router = api::build_router().with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    base
}

fn client() -> reqwest::Client {
    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
    else {
        panic!("client should build");
    };
    client
}

async fn json_of(response: reqwest::Response) -> (u16, Value) {
    let status = response.status().as_u16();
    let Ok(body) = response.json::<Value>().await else {
        panic!("response should be JSON");
    };
    (status, body)
}

async fn post(client: &reqwest::Client, url: String, body: Value) -> (u16, Value) {
    let Ok(response) = client.post(url).json(&body).send().await else {
        panic!("request failed");
    };
    json_of(response).await
}

async fn get(client: &reqwest::Client, url: String) -> (u16, Value) {
    let Ok(response) = client.get(url).send().await else {
        panic!("request failed");
    };
    json_of(response).await
}

fn days_from_now(days: u64) -> String {
    (Utc::now().date_naive() + Days::new(days)).to_string()
}

fn event_body(theater_id: &str, title: &str, price: u32) -> Value {
    json!({
        "theaterId": theater_id,
        "movieTitle": title,
        "startDate": days_from_now(1),
        "endDate": days_from_now(3),
        "showTimes": ["10:00", "18:30"],
        "ticketPrice": price,
    })
}

#[tokio::test]
async fn event_lifecycle() {
    let base = spawn_gateway().await;
    let http = client();

    let (status, created) = post(
        &http,
        format!("{base}/api/events"),
        event_body("t1", "Kalki", 250),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["status"], "upcoming");
    assert_eq!(created["data"]["availableSeats"], 100);
    let id = created["data"]["id"].clone();

    for price in [49, 1001] {
        let (status, body) = post(
            &http,
            format!("{base}/api/events"),
            event_body("t1", "Cheap", price),
        )
        .await;
        assert_eq!(status, 400, "price {price}");
        assert_eq!(body["success"], false);
    }

    let Ok(response) = http
        .put(format!("{base}/api/events/{id}"))
        .json(&json!({ "availableSeats": 60 }))
        .send()
        .await
    else {
        panic!("update failed");
    };
    let (status, updated) = json_of(response).await;
    assert_eq!(status, 200);
    assert_eq!(updated["data"]["availableSeats"], 60);

    let (_, stats) = get(&http, format!("{base}/api/events/stats?theater_id=t1")).await;
    assert_eq!(stats["data"]["totalEvents"], 1);
    assert_eq!(stats["data"]["totalTicketsSold"], 40);
    assert_eq!(stats["data"]["totalRevenue"], 10_000);

    let Ok(response) = http
        .patch(format!("{base}/api/events/{id}/cancel"))
        .json(&json!({ "reason": "print delayed" }))
        .send()
        .await
    else {
        panic!("cancel failed");
    };
    let (status, cancelled) = json_of(response).await;
    assert_eq!(status, 200);
    assert_eq!(cancelled["data"]["status"], "cancelled");
    assert_eq!(cancelled["data"]["cancellationReason"], "print delayed");

    let (_, user_view) = get(&http, format!("{base}/api/events/user")).await;
    assert_eq!(user_view["data"].as_array().map(Vec::len), Some(0));

    let Ok(response) = http
        .patch(format!("{base}/api/events/9999/cancel"))
        .json(&json!({ "reason": "x" }))
        .send()
        .await
    else {
        panic!("cancel failed");
    };
    assert_eq!(response.status().as_u16(), 404);

    let Ok(response) = http.delete(format!("{base}/api/events/{id}")).send().await else {
        panic!("delete failed");
    };
    assert_eq!(response.status().as_u16(), 200);
    let (status, _) = get(&http, format!("{base}/api/events/{id}")).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn catalogue_aggregates_over_http() {
    let base = spawn_gateway().await;
    let http = client();

    let (status, application) = post(
        &http,
        format!("{base}/api/theater-applications"),
        json!({
            "theaterName": "Sri Venkateswara Cinemas",
            "ownerName": "Prakash",
            "ownerEmail": "prakash@example.com",
            "ownerPhone": "98765 43210",
            "address": "Gandhi Road",
            "city": "Tirupati",
            "state": "Andhra Pradesh",
            "pincode": "517501",
            "screens": 3,
            "totalSeats": 450
        }),
    )
    .await;
    assert_eq!(status, 201);
    let Some(theater_id) = application["data"]["id"].as_str().map(str::to_string) else {
        panic!("application id missing");
    };

    let Ok(response) = http
        .patch(format!("{base}/api/theater-applications/{theater_id}/approve"))
        .send()
        .await
    else {
        panic!("approve failed");
    };
    assert_eq!(response.status().as_u16(), 200);

    let Ok(response) = http
        .patch(format!("{base}/api/theater-applications/{theater_id}/reject"))
        .json(&json!({ "reason": "too late" }))
        .send()
        .await
    else {
        panic!("reject failed");
    };
    assert_eq!(response.status().as_u16(), 409);

    let (status, _) = post(
        &http,
        format!("{base}/api/events"),
        event_body(&theater_id, "Kalki", 300),
    )
    .await;
    assert_eq!(status, 201);
    let (status, _) = post(
        &http,
        format!("{base}/api/events"),
        event_body("blockchain_0xabc", "Chain Premiere", 150),
    )
    .await;
    assert_eq!(status, 201);

    let (status, theaters) = get(&http, format!("{base}/api/theaters")).await;
    assert_eq!(status, 200);
    let names: Vec<&str> = theaters["data"]
        .as_array()
        .map(|list| list.iter().filter_map(|t| t["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["Sri Venkateswara Cinemas", "BookMyBlock Chain Cinemas"]);

    let (status, near) = get(&http, format!("{base}/api/theaters/near/110001")).await;
    assert_eq!(status, 200);
    assert_eq!(near["data"].as_array().map(Vec::len), Some(0));

    let (status, _) = get(&http, format!("{base}/api/theaters/near/11000")).await;
    assert_eq!(status, 400);

    let (_, events) = get(&http, format!("{base}/api/events/near/517520")).await;
    let titles: Vec<&str> = events["data"]
        .as_array()
        .map(|list| list.iter().filter_map(|e| e["movieTitle"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(titles, vec!["Kalki", "Chain Premiere"]);

    let (_, search) = get(&http, format!("{base}/api/theaters/search?q=kalki")).await;
    assert_eq!(search["data"][0]["id"], theater_id.as_str());

    let (_, city) = get(&http, format!("{base}/api/theaters/city/Tirupati")).await;
    assert_eq!(city["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn layouts_and_utilities() {
    let base = spawn_gateway().await;
    let http = client();

    let (status, preview) = post(
        &http,
        format!("{base}/api/layouts/generate"),
        json!({ "theaterId": "t1", "theaterName": "Galaxy", "screens": 2, "totalSeats": 300 }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(preview["data"]["screens"].as_array().map(Vec::len), Some(2));

    let (status, _) = post(
        &http,
        format!("{base}/api/layouts/generate"),
        json!({ "theaterId": "t1", "screens": 0, "totalSeats": 300 }),
    )
    .await;
    assert_eq!(status, 400);

    let (status, body) = post(
        &http,
        format!("{base}/api/layouts/generate"),
        json!({ "theaterId": "t1", "screens": 1, "totalSeats": 20_001 }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], 1004);

    let Ok(response) = http
        .put(format!("{base}/api/layouts/t1"))
        .json(&preview["data"])
        .send()
        .await
    else {
        panic!("save failed");
    };
    assert_eq!(response.status().as_u16(), 200);

    let seat_url = format!("{base}/api/layouts/t1/screens/screen-2/seats/A/1");
    let (status, seat) = get(&http, seat_url).await;
    assert_eq!(status, 200);
    assert_eq!(seat["data"]["price"], 350);
    assert_eq!(seat["data"]["seat"]["id"], "t1-screen-2-A1");

    let (status, phone) = post(
        &http,
        format!("{base}/api/phone/validate"),
        json!({ "phone": "+91 98765-43210" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(phone["data"]["display"], "98765 43210");
    assert_eq!(phone["data"]["international"], "+919876543210");
    assert_eq!(phone["data"]["isValid"], true);

    let (_, nearby) = get(&http, format!("{base}/api/pincodes/nearby?from=517501&to=517502")).await;
    assert_eq!(nearby["data"]["nearby"], true);
    let (_, far) = get(&http, format!("{base}/api/pincodes/nearby?from=110001&to=700001")).await;
    assert_eq!(far["data"]["nearby"], false);
}

#[tokio::test]
async fn dashboard_sessions() {
    let base = spawn_gateway().await;
    let http = client();

    let Ok(response) = http
        .get(format!("{base}/api/auth/me"))
        .bearer_auth("dev-token")
        .header("X-Dashboard", "owner")
        .send()
        .await
    else {
        panic!("me failed");
    };
    let (status, me) = json_of(response).await;
    assert_eq!(status, 200);
    assert_eq!(me["data"]["dashboard"], "owner");

    let Ok(response) = http
        .post(format!("{base}/api/auth/logout"))
        .bearer_auth("dev-token")
        .header("X-Dashboard", "admin")
        .send()
        .await
    else {
        panic!("logout failed");
    };
    let (_, admin) = json_of(response).await;
    assert_eq!(admin["data"]["hadSession"], false);

    let Ok(response) = http
        .post(format!("{base}/api/auth/logout"))
        .bearer_auth("dev-token")
        .header("X-Dashboard", "owner")
        .send()
        .await
    else {
        panic!("logout failed");
    };
    let (_, owner) = json_of(response).await;
    assert_eq!(owner["data"]["hadSession"], true);
}
