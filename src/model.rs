//! The product entity and its input/output shapes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub type ProductId = i32;

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List projection: a product without its audit timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

/// Input for `POST /api/productos`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NewProduct {
    #[schema(example = "Monitor Curvo de 49 Pulgadas")]
    pub name: String,
    #[schema(example = 300)]
    pub price: f64,
}

/// Input for `PUT /api/productos/{id}`: every mutable field is replaced.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductChanges {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}
