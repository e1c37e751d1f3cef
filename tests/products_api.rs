//! HTTP-level integration tests for `/api/productos`.
//!
//! Each test gets a fresh database from `#[sqlx::test]`; the router syncs the
//! `products` table before the first request.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{
    body_json, build_test_app, delete, get, patch, post_json, put_json, seed_product,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// POST /api/productos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn create_product_returns_201_with_submitted_fields(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = post_json(
        app,
        "/api/productos",
        json!({ "name": "Monitor - Testing", "price": 50 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["name"], "Monitor - Testing");
    assert_eq!(data["price"], 50.0);
    assert_eq!(data["availability"], true);
    assert!(data["id"].as_i64().is_some());
    assert!(data["createdAt"].is_string());
}

#[sqlx::test(migrations = false)]
async fn create_accepts_a_long_name(pool: PgPool) {
    let app = build_test_app(pool).await;
    let name = "a".repeat(101);
    let response = post_json(app, "/api/productos", json!({ "name": name, "price": 10 })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"].as_str().unwrap().len(), 101);
}

#[sqlx::test(migrations = false)]
async fn create_with_oversized_body_returns_413(pool: PgPool) {
    let app = build_test_app(pool).await;
    let name = "a".repeat(200 * 1024);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/productos")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "name": name, "price": 10 }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[sqlx::test(migrations = false)]
async fn create_with_empty_body_lists_every_failed_rule(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = post_json(app, "/api/productos", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["errors"].as_array().unwrap().len(), 4);
}

#[sqlx::test(migrations = false)]
async fn create_with_non_numeric_price_returns_two_errors(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = post_json(
        app,
        "/api/productos",
        json!({ "name": "Monitor Curvo", "price": "Hola" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["msg"], "El campo Precio debe ser numérico");
    assert_eq!(errors[1]["msg"], "El campo Precio debe ser un valor positivo");
    assert!(json.get("data").is_none());
}

#[sqlx::test(migrations = false)]
async fn create_with_zero_price_fails_positivity_only(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = post_json(app, "/api/productos", json!({ "name": "Gratis", "price": 0 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["path"], "price");
    assert_eq!(errors[0]["location"], "body");
}

#[sqlx::test(migrations = false)]
async fn create_with_malformed_json_is_a_bad_request(pool: PgPool) {
    let app = build_test_app(pool).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/productos")
        .header("content-type", "application/json")
        .body(Body::from("{name:"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["code"], "bad_request");
}

#[sqlx::test(migrations = false)]
async fn create_without_body_fails_validation(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = common::send(app, Method::POST, "/api/productos", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"].as_array().unwrap().len(), 4);
}

// ---------------------------------------------------------------------------
// GET /api/productos
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn list_is_ordered_by_name_without_timestamps(pool: PgPool) {
    let app = build_test_app(pool).await;
    for (name, price) in [("Teclado", 40.0), ("Audífonos", 80.0), ("Mouse", 15.5)] {
        seed_product(&app, name, price).await;
    }

    let response = get(app, "/api/productos").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["Cantidad"], 3);
    let data = json["data"].as_array().unwrap();
    let names: Vec<&str> = data.iter().map(|p| p["name"].as_str().unwrap()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(data.iter().all(|p| p.get("createdAt").is_none() && p.get("updatedAt").is_none()));
    assert!(json.get("errors").is_none());
}

#[sqlx::test(migrations = false)]
async fn list_of_empty_table(pool: PgPool) {
    let app = build_test_app(pool).await;
    let json = body_json(get(app, "/api/productos").await).await;
    assert_eq!(json["Cantidad"], 0);
    assert_eq!(json["data"], json!([]));
}

// ---------------------------------------------------------------------------
// GET /api/productos/:id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn get_missing_product_returns_404(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/api/productos/2000").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Product not found");
    assert!(json.get("product").is_none());
}

#[sqlx::test(migrations = false)]
async fn get_with_invalid_id_returns_single_error(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = get(app, "/api/productos/not-valid-url").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["msg"], "ID no válido");
    assert_eq!(errors[0]["location"], "params");
}

#[sqlx::test(migrations = false)]
async fn get_existing_product(pool: PgPool) {
    let app = build_test_app(pool).await;
    let id = seed_product(&app, "Silla Gamer", 199.99).await;

    let response = get(app, &format!("/api/productos/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["product"]["id"], id);
    assert_eq!(json["product"]["name"], "Silla Gamer");
}

// ---------------------------------------------------------------------------
// PUT /api/productos/:id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn update_replaces_all_fields(pool: PgPool) {
    let app = build_test_app(pool).await;
    let id = seed_product(&app, "Monitor", 300.0).await;

    let response = put_json(
        app.clone(),
        &format!("/api/productos/{id}"),
        json!({ "name": "Monitor Curvo", "price": 350, "availability": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Monitor Curvo");
    assert_eq!(json["data"]["price"], 350.0);
    assert_eq!(json["data"]["availability"], false);

    let json = body_json(get(app, &format!("/api/productos/{id}")).await).await;
    assert_eq!(json["product"]["name"], "Monitor Curvo");
}

#[sqlx::test(migrations = false)]
async fn update_validates_body(pool: PgPool) {
    let app = build_test_app(pool).await;
    let id = seed_product(&app, "Monitor", 300.0).await;

    let response = put_json(
        app,
        &format!("/api/productos/{id}"),
        json!({ "name": "Monitor", "price": -5, "availability": "no" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let msgs: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["msg"].as_str().unwrap())
        .collect();
    assert_eq!(
        msgs,
        vec![
            "El campo Precio debe ser un valor positivo",
            "Valor para disponibilidad no válido",
        ]
    );
}

#[sqlx::test(migrations = false)]
async fn update_missing_product_returns_404(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = put_json(
        app,
        "/api/productos/2000",
        json!({ "name": "Monitor", "price": 300, "availability": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Product not found");
}

// ---------------------------------------------------------------------------
// PATCH /api/productos/:id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn toggling_twice_restores_availability(pool: PgPool) {
    let app = build_test_app(pool).await;
    let id = seed_product(&app, "Webcam", 60.0).await;
    let uri = format!("/api/productos/{id}");

    let first = body_json(patch(app.clone(), &uri).await).await;
    assert_eq!(first["product"]["availability"], false);

    let response = patch(app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_eq!(second["product"]["availability"], true);
    assert_eq!(second["product"]["name"], "Webcam");
}

#[sqlx::test(migrations = false)]
async fn toggle_missing_product_returns_404(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = patch(app, "/api/productos/2000").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
async fn toggle_with_invalid_id_returns_400(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = patch(app, "/api/productos/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// DELETE /api/productos/:id
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn delete_returns_snapshot_and_removes_row(pool: PgPool) {
    let app = build_test_app(pool).await;
    let id = seed_product(&app, "Parlante", 25.0).await;
    let uri = format!("/api/productos/{id}");

    let response = delete(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["message"], "Product deleted successfully");
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["name"], "Parlante");

    let response = get(app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
async fn delete_with_invalid_id_returns_400(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = delete(app, "/api/productos/not-valid-url").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["msg"], "ID no válido");
}

#[sqlx::test(migrations = false)]
async fn delete_missing_product_returns_404(pool: PgPool) {
    let app = build_test_app(pool).await;
    let response = delete(app, "/api/productos/2000").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Persistence failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn database_failure_returns_500_error_body(pool: PgPool) {
    let app = build_test_app(pool.clone()).await;
    sqlx::query("DROP TABLE products").execute(&pool).await.unwrap();

    let response = get(app, "/api/productos").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert_eq!(json["error"]["code"], "database_error");
    assert!(json["message"].is_string());
}
