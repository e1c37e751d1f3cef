//! Request extractors.

pub mod validated;
pub use validated::{ProductPath, ProductUpdate, Validated, ValidatedInput};
