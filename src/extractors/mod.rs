//! Request extractors that report failures through [`AppError`](crate::error::AppError).

pub mod id;
pub mod json;
pub mod report;

pub use id::EntityId;
pub use json::JsonBody;
pub use report::ReportFilter;
