//! Response envelopes for the product routes.

use crate::model::{Product, ProductSummary};
use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

pub const DELETED_MESSAGE: &str = "Product deleted successfully";

/// `GET /api/productos`: `{ Cantidad, data }`.
#[derive(Serialize, ToSchema)]
pub struct ProductList {
    #[serde(rename = "Cantidad")]
    pub cantidad: usize,
    pub data: Vec<ProductSummary>,
}

/// `{ data: product }` for create and update.
#[derive(Serialize, ToSchema)]
pub struct DataBody {
    pub data: Product,
}

/// `{ product }` for get-by-id and availability toggle.
#[derive(Serialize, ToSchema)]
pub struct ProductBody {
    pub product: Product,
}

/// `{ status, message, data }` for delete; `data` is the removed row.
#[derive(Serialize, ToSchema)]
pub struct DeletedBody {
    pub status: &'static str,
    pub message: &'static str,
    pub data: Product,
}

pub fn list(data: Vec<ProductSummary>) -> (StatusCode, Json<ProductList>) {
    (
        StatusCode::OK,
        Json(ProductList {
            cantidad: data.len(),
            data,
        }),
    )
}

pub fn created(data: Product) -> (StatusCode, Json<DataBody>) {
    (StatusCode::CREATED, Json(DataBody { data }))
}

pub fn data_ok(data: Product) -> (StatusCode, Json<DataBody>) {
    (StatusCode::OK, Json(DataBody { data }))
}

pub fn product_ok(product: Product) -> (StatusCode, Json<ProductBody>) {
    (StatusCode::OK, Json(ProductBody { product }))
}

pub fn deleted(data: Product) -> (StatusCode, Json<DeletedBody>) {
    (
        StatusCode::OK,
        Json(DeletedBody {
            status: "success",
            message: DELETED_MESSAGE,
            data,
        }),
    )
}
