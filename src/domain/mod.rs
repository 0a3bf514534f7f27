//! Domain types for the product catalog.

pub mod product;

pub use product::{Product, ProductInput, ProductTotal};
