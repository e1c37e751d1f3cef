//! Product handlers: list, get, create, update, toggle availability, delete.

use crate::error::{AppError, ErrorBody, NotFoundBody};
use crate::extractors::{ProductPath, ProductUpdate, Validated};
use crate::model::{NewProduct, ProductChanges};
use crate::response::{self, DataBody, DeletedBody, ProductBody, ProductList};
use crate::service::{ProductService, ValidationErrors};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

#[utoipa::path(
    get,
    path = "/api/productos",
    tag = "Products",
    responses(
        (status = 200, description = "Products ordered by name", body = ProductList),
        (status = 500, description = "Database failure", body = ErrorBody),
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = ProductService::list(&state.pool).await?;
    Ok(response::list(rows))
}

#[utoipa::path(
    get,
    path = "/api/productos/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ProductBody),
        (status = 400, description = "Invalid id", body = ValidationErrors),
        (status = 404, description = "Product not found", body = NotFoundBody),
        (status = 500, description = "Database failure", body = ErrorBody),
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Validated(ProductPath { id }): Validated<ProductPath>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::find(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(response::product_ok(product))
}

#[utoipa::path(
    post,
    path = "/api/productos",
    tag = "Products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product created", body = DataBody),
        (status = 400, description = "Validation errors", body = ValidationErrors),
        (status = 500, description = "Database failure", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Validated(input): Validated<NewProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::create(&state.pool, &input).await?;
    tracing::debug!(id = product.id, "product created");
    Ok(response::created(product))
}

#[utoipa::path(
    put,
    path = "/api/productos/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductChanges,
    responses(
        (status = 200, description = "Product replaced", body = DataBody),
        (status = 400, description = "Validation errors", body = ValidationErrors),
        (status = 404, description = "Product not found", body = NotFoundBody),
        (status = 500, description = "Database failure", body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Validated(ProductUpdate { id, changes }): Validated<ProductUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::debug!(id, "product updated");
    Ok(response::data_ok(product))
}

#[utoipa::path(
    patch,
    path = "/api/productos/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Availability flipped", body = ProductBody),
        (status = 400, description = "Invalid id", body = ValidationErrors),
        (status = 404, description = "Product not found", body = NotFoundBody),
        (status = 500, description = "Database failure", body = ErrorBody),
    )
)]
pub async fn toggle_availability(
    State(state): State<AppState>,
    Validated(ProductPath { id }): Validated<ProductPath>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::toggle_availability(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::debug!(id, availability = product.availability, "availability toggled");
    Ok(response::product_ok(product))
}

#[utoipa::path(
    delete,
    path = "/api/productos/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = DeletedBody),
        (status = 400, description = "Invalid id", body = ValidationErrors),
        (status = 404, description = "Product not found", body = NotFoundBody),
        (status = 500, description = "Database failure", body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Validated(ProductPath { id }): Validated<ProductPath>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::delete(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::debug!(id, "product deleted");
    Ok(response::deleted(product))
}
