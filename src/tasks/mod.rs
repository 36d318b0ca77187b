//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the caches are open.
//!
//! # Tasks
//! - Expiry sweep: removes expired cache entries at configured intervals

mod cleanup;

pub use cleanup::spawn_sweep_task;
