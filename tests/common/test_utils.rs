#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use house_price_rs::{
    artifacts,
    config::{ArtifactsConfig, CorsConfig},
    house::HousePricePredictor,
    server::{self, AppState},
};
use serde_json::{Value, json};
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

pub const ENCODERS_JSON: &str = r#"{
    "mainroad": ["no", "yes"],
    "guestroom": ["no", "yes"],
    "basement": ["no", "yes"],
    "hotwaterheating": ["no", "yes"],
    "airconditioning": ["no", "yes"],
    "furnishingstatus": ["furnished", "semi-furnished", "unfurnished"],
    "city": ["Austin", "Boston", "Chicago", "Seattle"]
}"#;

/// Zero mean and unit scale, so the model sees the raw encoded features.
pub const IDENTITY_SCALER_JSON: &str = r#"{
    "mean": [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    "scale": [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
}"#;

/// area, bedrooms, bathrooms, stories, mainroad, guestroom, basement,
/// hotwaterheating, airconditioning, parking, furnishingstatus, city, age, renovated
pub const LINEAR_MODEL_JSON: &str = r#"{
    "kind": "linear",
    "coefficients": [
        100, 10000, 15000, 5000, 20000, 12000, 9000,
        7000, 25000, 8000, -10000, 30000, -1000, 5000
    ],
    "intercept": 50000
}"#;

/// Price of `sample_request()` under `LINEAR_MODEL_JSON`.
pub const SAMPLE_PRICE: f64 = 1_017_000.0;

pub const FOREST_MODEL_JSON: &str = r#"{
    "kind": "tree_ensemble",
    "aggregation": "mean",
    "n_features": 14,
    "trees": [
        {"nodes": [
            {"feature": 0, "threshold": 6000, "left": 1, "right": 2},
            {"value": 300000},
            {"value": 500000}
        ]},
        {"nodes": [
            {"feature": 11, "threshold": 1.5, "left": 1, "right": 2},
            {"value": 400000},
            {"value": 700000}
        ]}
    ]
}"#;

pub fn sample_request() -> Value {
    json!({
        "area": 7420,
        "bedrooms": 4,
        "bathrooms": 2,
        "stories": 3,
        "mainroad": "yes",
        "guestroom": "no",
        "basement": "no",
        "hotwaterheating": "no",
        "airconditioning": "yes",
        "parking": 2,
        "furnishingstatus": "furnished",
        "city": "Seattle",
        "year_built": 2014
    })
}

pub fn write_artifacts(dir: &Path, model: &str, scaler: &str, encoders: &str) -> ArtifactsConfig {
    let config = ArtifactsConfig {
        dir: dir.to_path_buf(),
        ..ArtifactsConfig::default()
    };
    std::fs::write(config.model_path(), model).expect("Failed to write model");
    std::fs::write(config.scaler_path(), scaler).expect("Failed to write scaler");
    std::fs::write(config.encoders_path(), encoders).expect("Failed to write encoders");
    config
}

/// Router over an already-built predictor, bypassing artifact validation.
pub fn create_app_from(predictor: HousePricePredictor) -> Router {
    server::router(AppState::new(predictor), &CorsConfig::default()).unwrap()
}

pub async fn create_app_with(model: &str, scaler: &str, encoders: &str) -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = write_artifacts(temp_dir.path(), model, scaler, encoders);
    let loaded = artifacts::load(&config).await.unwrap();
    let app = create_app_from(HousePricePredictor::from_artifacts(loaded));
    (app, temp_dir)
}

pub async fn create_test_app() -> (Router, TempDir) {
    create_app_with(LINEAR_MODEL_JSON, IDENTITY_SCALER_JSON, ENCODERS_JSON).await
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends one request and decodes the JSON response body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
