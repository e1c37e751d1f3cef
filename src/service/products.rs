//! Product persistence against PostgreSQL.

use crate::error::AppError;
use crate::model::{NewProduct, Product, ProductChanges, ProductId, ProductSummary};
use sqlx::PgPool;

/// Column list for full product rows.
const COLUMNS: &str = "id, name, price, availability, created_at, updated_at";

pub struct ProductService;

impl ProductService {
    /// All products ordered by name, without audit timestamps.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProductSummary>, AppError> {
        let rows = sqlx::query_as::<_, ProductSummary>(
            "SELECT id, name, price, availability FROM products ORDER BY name ASC, id ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Fetch one product by primary key.
    pub async fn find(pool: &PgPool, id: ProductId) -> Result<Option<Product>, AppError> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Insert a new product; availability takes the column default.
    pub async fn create(pool: &PgPool, input: &NewProduct) -> Result<Product, AppError> {
        let query = format!(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(input.price)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// Replace every mutable field. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: ProductId,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, AppError> {
        let query = format!(
            "UPDATE products \
             SET name = $2, price = $3, availability = $4, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&changes.name)
            .bind(changes.price)
            .bind(changes.availability)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Flip `availability`. Returns `None` if the row does not exist.
    pub async fn toggle_availability(
        pool: &PgPool,
        id: ProductId,
    ) -> Result<Option<Product>, AppError> {
        let query = format!(
            "UPDATE products \
             SET availability = NOT availability, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Delete a product, returning the row as it was before removal.
    pub async fn delete(pool: &PgPool, id: ProductId) -> Result<Option<Product>, AppError> {
        let query = format!("DELETE FROM products WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }
}
