//! Product routes, nested by the caller under `/api/productos`.

use crate::handlers::products::{create, delete, list, read, toggle_availability, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route(
            "/:id",
            get(read)
                .put(update)
                .patch(toggle_availability)
                .delete(delete),
        )
        .with_state(state)
}
