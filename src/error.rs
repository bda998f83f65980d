//! Error types for the lfukit library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when internal data-structure invariants
//!   are violated (debug/test-only `check_invariants` methods).
//! - [`ConfigError`]: Returned when cache configuration parameters are
//!   invalid (e.g. an index headroom below 1.0).
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::builder::LfuCacheBuilder;
//! use lfukit::error::ConfigError;
//! use lfukit::policy::lfu::LfuCache;
//!
//! // Fallible construction for user-configurable parameters
//! let cache: Result<LfuCache<u64, String>, ConfigError> =
//!     LfuCacheBuilder::new(100).index_headroom(2.0).try_build();
//! assert!(cache.is_ok());
//!
//! // Undersizing the item index is caught without panicking
//! let bad = LfuCacheBuilder::new(100).index_headroom(0.5).try_build::<u64, String>();
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by `check_invariants` on
/// [`LfuCache`](crate::policy::lfu::LfuCache). Carries a human-readable
/// description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`LfuCacheBuilder::try_build`](crate::builder::LfuCacheBuilder::try_build).
/// Carries a human-readable description of which parameter failed
/// validation.
///
/// # Example
///
/// ```
/// use lfukit::builder::LfuCacheBuilder;
///
/// let err = LfuCacheBuilder::new(8)
///     .index_headroom(f64::NAN)
///     .try_build::<u64, u64>()
///     .unwrap_err();
/// assert!(err.to_string().contains("headroom"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
