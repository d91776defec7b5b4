#![warn(clippy::all, missing_docs)]

//! Core domain logic for the gamehub catalog browser.
//!
//! This crate hosts the game models, catalog sources, the query store
//! with its derived views, configuration handling, and the small
//! key-value persistence behind the recently played list.

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod recent;
pub mod storage;

pub use catalog::{CatalogStore, ReleaseQuery, SortDirection, SortKey};
pub use config::AppConfig;
pub use error::CatalogError;
pub use format::format_play_count;
pub use models::{Category, CategoryFilter, Game};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
