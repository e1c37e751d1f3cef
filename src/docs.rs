//! OpenAPI document for the product API: JSON at [`OPENAPI_PATH`], Swagger UI at [`DOCS_PATH`].

use crate::error::{ErrorBody, ErrorDetail, NotFoundBody};
use crate::handlers::products;
use crate::model::{NewProduct, Product, ProductChanges, ProductSummary};
use crate::response::{DataBody, DeletedBody, ProductBody, ProductList};
use crate::service::{FieldError, Location, ValidationErrors};
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const DOCS_PATH: &str = "/docs";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Productos REST API",
        version = "1.0.0",
        description = "API Docs for Products"
    ),
    paths(
        products::list,
        products::read,
        products::create,
        products::update,
        products::toggle_availability,
        products::delete,
    ),
    components(schemas(
        Product,
        ProductSummary,
        NewProduct,
        ProductChanges,
        ProductList,
        DataBody,
        ProductBody,
        DeletedBody,
        ValidationErrors,
        FieldError,
        Location,
        NotFoundBody,
        ErrorBody,
        ErrorDetail,
    )),
    tags((name = "Products", description = "API operations related to products"))
)]
pub struct ApiDoc;

/// Swagger UI under `/docs/`, backed by the document at [`OPENAPI_PATH`].
pub fn docs_routes() -> Router {
    Router::new().merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
}
