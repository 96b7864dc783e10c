// Synthetic city telemetry: diurnal signal generator over a bounded history
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::series_store::BoundedSeriesStore;
pub use application::signal_generator::SignalGenerator;
pub use domain::air_quality::{classify_aqi, AlertLevel, AqiBand};
pub use domain::location::{Location, LocationCategory, LocationState};
pub use domain::snapshot::Snapshot;
pub use domain::telemetry::{Channel, GlobalSeries, TelemetryReading};
pub use error::{ConfigurationError, TelemetryError};
