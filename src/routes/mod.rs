//! Router assembly.

pub mod common;
pub mod products;

pub use common::common_routes;
pub use products::product_routes;
