//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;

use parceltrace_api::routes;
use parceltrace_api::state::AppState;
use parceltrace_core::clock::Clock;
use parceltrace_core::rng::{SystemTokenRng, TokenRng};
use parceltrace_test_support::{
    InMemoryCourierRepository, RecordingReceiptNotifier, SteppingClock,
};

/// A test app plus handles to the doubles behind it.
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<InMemoryCourierRepository>,
    pub notifier: Arc<RecordingReceiptNotifier>,
}

/// Build the full app router against the in-memory repository, with a
/// stepping clock so successive writes get strictly increasing timestamps.
/// Uses the same route structure as `main.rs`.
pub fn build_test_app() -> TestApp {
    let repository = Arc::new(InMemoryCourierRepository::new());
    let notifier = Arc::new(RecordingReceiptNotifier::new());
    let clock: Arc<dyn Clock> = Arc::new(SteppingClock::new(
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        Duration::minutes(5),
    ));
    let rng: Arc<Mutex<dyn TokenRng>> = Arc::new(Mutex::new(SystemTokenRng));

    let repository_dyn: Arc<dyn parceltrace_courier::repository::CourierRepository> =
        Arc::clone(&repository) as Arc<_>;
    let notifier_dyn: Arc<dyn parceltrace_notify::ReceiptNotifier> =
        Arc::clone(&notifier) as Arc<_>;

    let app_state = AppState::new(
        repository_dyn,
        clock,
        rng,
        notifier_dyn,
    );

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/couriers", routes::couriers::router())
        .nest("/api/v1/tracking", routes::tracking::router())
        .with_state(app_state);

    TestApp {
        router,
        repository,
        notifier,
    }
}

/// Valid creation payload for an international shipment.
pub fn sample_create_payload() -> serde_json::Value {
    serde_json::json!({
        "current_location_country": "Nigeria",
        "current_location_city": "Lagos",
        "receiver": {
            "name": "Amina Diallo",
            "contact_number": "+33612345678",
            "email": "amina.diallo@example.com",
            "address": "8 Avenue Victor Hugo, Paris",
            "country": "France",
            "city": "Paris"
        },
        "sender": {
            "name": "Tunde Okafor",
            "contact_number": "+2348012345678",
            "email": "tunde.okafor@example.com",
            "address": "12 Marina Road, Lagos",
            "country": "Nigeria",
            "city": "Lagos"
        },
        "package": {
            "item_description": "Books and documents",
            "number_of_items": 2,
            "parcel_colour": "Brown",
            "weight": 3.5,
            "rate": 45.0,
            "category": "International",
            "destination_country": "France",
            "destination_city": "Paris"
        },
        "date_sent": "2026-02-27"
    })
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Send a PATCH request with a JSON body and return the response.
pub async fn patch_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PATCH", uri, Some(body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

/// Send a bodyless POST request and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, None).await
}
