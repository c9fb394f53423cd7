//! Common type definitions shared across crates

pub mod language;
pub mod pagination;

pub use language::Language;
pub use pagination::{Page, PaginatedResponse, Pagination};
