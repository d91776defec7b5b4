//! Domain errors raised while building or querying the catalog.

use thiserror::Error;

/// Reasons a catalog or a category name is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two records share the same id.
    #[error("duplicate game id {0:?}")]
    DuplicateId(String),
    /// A rating fell outside 0.0..=5.0.
    #[error("game {id:?} has rating {rating} outside 0.0..=5.0")]
    RatingOutOfRange {
        /// Offending game.
        id: String,
        /// Rating as read from the source.
        rating: f64,
    },
    /// A category name that is not part of the closed set.
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
}
