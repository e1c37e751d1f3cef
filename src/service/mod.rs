//! ProductService: product persistence. Validation: declarative request rules.

mod products;
pub mod validation;
pub use products::ProductService;
pub use validation::{gate, FieldError, Location, Rule, ValidationErrors};
