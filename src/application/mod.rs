// Application layer - Generator, bounded store and derived analytics
pub mod analytics;
pub mod clock;
pub mod diurnal;
pub mod series_store;
pub mod signal_generator;
