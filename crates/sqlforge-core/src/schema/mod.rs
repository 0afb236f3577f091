//! Schema context domain: named table definitions used to ground
//! generation requests.

pub mod api;
pub mod model;

pub use api::SchemaApi;
pub use model::{SchemaContext, SchemaDraft};
