//! Cache eviction policies. This crate ships one: bucket-based LFU.

pub mod lfu;

#[cfg(feature = "concurrency")]
pub use lfu::ConcurrentLfuCache;
pub use lfu::LfuCache;
