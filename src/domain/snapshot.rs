// Snapshot - immutable point-in-time view handed to readers after each tick
use super::air_quality::AlertLevel;
use super::location::{Location, LocationState};
use super::telemetry::{Channel, GlobalSeries, TelemetryReading};
use crate::error::TelemetryError;
use serde::Serialize;
use std::sync::Arc;

/// Shares the series and location table by `Arc`; nothing in here points back
/// into the generator, so it can be read on another thread while ticks continue.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    sequence: u64,
    series: Arc<GlobalSeries>,
    locations: Arc<[Location]>,
    states: Vec<LocationState>,
}

impl Snapshot {
    pub(crate) fn new(
        sequence: u64,
        series: Arc<GlobalSeries>,
        locations: Arc<[Location]>,
        states: Vec<LocationState>,
    ) -> Self {
        debug_assert_eq!(locations.len(), states.len());
        Self {
            sequence,
            series,
            locations,
            states,
        }
    }

    /// Number of ticks produced before this snapshot was taken.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn global_series(&self) -> &GlobalSeries {
        &self.series
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn state_of(&self, location_id: &str) -> Result<&LocationState, TelemetryError> {
        self.locations
            .iter()
            .position(|location| location.id == location_id)
            .and_then(|index| self.states.get(index))
            .ok_or_else(|| TelemetryError::LocationNotFound(location_id.to_string()))
    }

    /// Locations paired with their readings, in construction order.
    pub fn feed(&self) -> impl Iterator<Item = (&Location, &LocationState)> {
        self.locations.iter().zip(self.states.iter())
    }

    pub fn latest(&self) -> Option<TelemetryReading> {
        self.series.latest()
    }

    /// Newest value minus the one before it.
    pub fn change_from_previous(&self, channel: Channel) -> Option<f64> {
        let values = self.series.channel(channel);
        let len = values.len();
        if len < 2 {
            return None;
        }
        Some(values[len - 1] - values[len - 2])
    }

    pub fn alert_level(&self) -> AlertLevel {
        self.latest()
            .map(|reading| AlertLevel::from_aqi(reading.aqi))
            .unwrap_or(AlertLevel::Nominal)
    }
}
