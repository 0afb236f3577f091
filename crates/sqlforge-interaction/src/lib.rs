//! HTTP implementations of the sqlforge-core API traits.
//!
//! One client per remote concern, all sharing a single `ApiClient` for
//! connection reuse, base-URL handling, and error mapping.

pub mod auth_api;
pub mod client;
pub mod history_api;
pub mod query_api;
pub mod schema_api;

pub use auth_api::HttpAuthApi;
pub use client::ApiClient;
pub use history_api::HttpHistoryApi;
pub use query_api::HttpQueryApi;
pub use schema_api::HttpSchemaApi;
