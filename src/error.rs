// Error types for generator construction and snapshot queries
use thiserror::Error;

/// Raised only while building a generator; the instance is never created.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("series capacity must be greater than zero, got {0}")]
    InvalidCapacity(usize),

    #[error("at least one location is required")]
    NoLocations,

    #[error("duplicate location id `{0}`")]
    DuplicateLocation(String),

    #[error("location `{id}` has out-of-range coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        id: String,
        latitude: f64,
        longitude: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("location `{0}` not found")]
    LocationNotFound(String),
}
