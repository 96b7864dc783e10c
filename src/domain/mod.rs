// Domain layer - Plain data types and pure rules
pub mod air_quality;
pub mod location;
pub mod snapshot;
pub mod telemetry;
