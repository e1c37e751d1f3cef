//! Productos API: CRUD REST service for the product catalogue.

pub mod app;
pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use app::{build_app, API_BASE};
pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use model::{NewProduct, Product, ProductChanges, ProductSummary};
pub use service::ProductService;
pub use state::AppState;
