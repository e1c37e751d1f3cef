#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use productos_api::{build_app, store, AppState, ServerConfig};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build the same router `main` serves, after syncing the schema into the
/// per-test database.
pub async fn build_test_app(pool: PgPool) -> Router {
    store::sync(&pool).await.expect("sync products table");
    let config = ServerConfig {
        frontend_url: Some("http://localhost:5173".into()),
        ..ServerConfig::default()
    };
    build_app(AppState::new(pool), &config).expect("build app")
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");
    app.oneshot(request).await.expect("response")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// Create a product through the API and return its id.
pub async fn seed_product(app: &Router, name: &str, price: f64) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/productos",
        serde_json::json!({ "name": name, "price": price }),
    )
    .await;
    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("created id")
}
