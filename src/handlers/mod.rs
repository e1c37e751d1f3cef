//! HTTP handlers for the product resource.

pub mod products;
pub use products::*;
