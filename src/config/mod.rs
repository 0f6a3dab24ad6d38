/// Database configuration and connection management
pub mod database;

/// Game configuration loading from config.toml
pub mod game;
