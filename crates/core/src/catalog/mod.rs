//! Catalog sources, the query store, and the releases query.

/// Release page filtering and ordering.
pub mod query;
/// Providers for the initial game list.
pub mod source;
/// Read-only catalog with derived views.
pub mod store;

pub use query::{ReleaseQuery, SortDirection, SortKey};
pub use source::{validate_catalog, BuiltinSource, GameSource, JsonFileSource};
pub use store::{CatalogStore, CategoryStats, FALLBACK_THUMBNAIL, HIGHLIGHT_LIMIT};
