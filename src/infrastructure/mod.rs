// Infrastructure layer - Configuration sources and process setup
pub mod config;
pub mod logging;
