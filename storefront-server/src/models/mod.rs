//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod category;
pub mod product;
pub mod tag;
pub mod validation;

pub use category::CategoryName;
pub use product::{NewProduct, Price, ProductChanges, ProductName, Stock, TagIds};
pub use tag::TagName;
pub use validation::ValidationError;
