//! Metrics trait surface, split along mutability lines.
//!
//! Recorders only write counters; [`MetricsSnapshotProvider`] only reads
//! them. Mutating cache operations record through [`LfuMetricsRecorder`]
//! (`&mut self`); read-only operations record through
//! [`LfuMetricsReadRecorder`], implemented for `&LfuMetrics` so the
//! counters can be bumped from `&self` methods.

/// Counters for mutating LFU operations.
pub trait LfuMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_pop_lfu_call(&mut self);
    fn record_pop_lfu_found(&mut self);
    fn record_reset_frequency_call(&mut self);
    fn record_reset_frequency_found(&mut self);
    fn record_increment_frequency_call(&mut self);
    fn record_increment_frequency_found(&mut self);
    fn record_clear(&mut self);
}

/// Counters for read-only LFU operations.
pub trait LfuMetricsReadRecorder {
    fn record_peek_lfu_call(&self);
    fn record_peek_lfu_found(&self);
    fn record_frequency_call(&self);
    fn record_frequency_found(&self);
}

/// Point-in-time snapshot access, decoupled from recording.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
