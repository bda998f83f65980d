use std::cell::Cell;

/// Counter cell for metrics recorded from `&self` methods.
///
/// Read paths like `peek_lfu` and `frequency` take `&self`, so their
/// counters go through interior mutability. Metrics are observational
/// only and never affect cache behavior.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}
