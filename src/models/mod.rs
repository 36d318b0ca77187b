//! Payload models cached by the response cache.

pub mod repository;

// Re-export commonly used types
pub use repository::{search_identifier, Owner, Repository, SearchResults, TRENDING};
