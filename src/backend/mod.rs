//! Book catalog collaborator: wire types, errors and the HTTP client

pub mod api;
pub mod error;
pub mod types;

pub use api::{Catalog, CatalogClient};
pub use error::FetchError;
pub use types::{BookSummary, PageQuery, SearchField};
