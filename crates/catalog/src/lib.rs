#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{JsonBundle, parse_region_document};
pub use repository::{CatalogError, EntryRepository, InMemoryRepository};
