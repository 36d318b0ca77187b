//! hubcache - Expiring caches for a GitHub browsing client
//!
//! Provides a JSON response cache and an image byte cache with TTL expiration,
//! a bounded LRU memory tier, fail-soft disk storage and single-flight fetching.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod tasks;

pub use cache::{Cache, ImageCache, Lookup, ResponseCache, WriteStatus};
pub use config::Config;
pub use fetch::{Fetcher, NetworkClient};
pub use tasks::spawn_sweep_task;
