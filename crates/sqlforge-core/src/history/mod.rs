//! Query history domain: read-only records fetched per user.

pub mod api;
pub mod model;

pub use api::HistoryApi;
pub use model::HistoryRecord;
