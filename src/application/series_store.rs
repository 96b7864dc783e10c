// Bounded series store - fixed-capacity history of global readings
use crate::domain::telemetry::{GlobalSeries, TelemetryReading};
use crate::error::ConfigurationError;
use std::sync::Arc;

pub const DEFAULT_CAPACITY: usize = 500;

/// Holds the seven global sequences behind one `Arc`.
///
/// `append` goes through [`Arc::make_mut`]: when no snapshot is outstanding the
/// series is updated in place, otherwise it is cloned first and the snapshot
/// keeps the old copy. Readers therefore only ever see whole ticks.
#[derive(Debug, Clone)]
pub struct BoundedSeriesStore {
    capacity: usize,
    series: Arc<GlobalSeries>,
}

impl BoundedSeriesStore {
    pub fn new(capacity: usize) -> Result<Self, ConfigurationError> {
        if capacity == 0 {
            return Err(ConfigurationError::InvalidCapacity(capacity));
        }

        Ok(Self {
            capacity,
            series: Arc::new(GlobalSeries::with_capacity(capacity)),
        })
    }

    pub fn append(&mut self, reading: TelemetryReading) {
        Arc::make_mut(&mut self.series).push(reading, self.capacity);
    }

    pub fn snapshot(&self) -> Arc<GlobalSeries> {
        Arc::clone(&self.series)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
