//! Fetch Module
//!
//! Loads values through a cache, falling back to a network client on a miss.

mod client;
mod fetcher;

pub use client::NetworkClient;
pub use fetcher::Fetcher;
