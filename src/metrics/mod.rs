//! Operation counters for the LFU cache, compiled in with the `metrics`
//! cargo feature.
//!
//! Recording, snapshotting and consumption are split: the cache owns an
//! [`LfuMetrics`](metrics_impl::LfuMetrics) and bumps counters inline;
//! benches and tests read a point-in-time
//! [`LfuMetricsSnapshot`](snapshot::LfuMetricsSnapshot) through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider).

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use cell::MetricsCell;
pub use metrics_impl::LfuMetrics;
pub use snapshot::LfuMetricsSnapshot;
pub use traits::{LfuMetricsReadRecorder, LfuMetricsRecorder, MetricsSnapshotProvider};
