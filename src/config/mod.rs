/// Auth API configuration from environment variables
pub mod api;

/// Database configuration and connection management
pub mod database;

/// Job catalog loading from config.toml
pub mod jobs;
