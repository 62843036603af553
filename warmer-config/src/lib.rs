//! Domain-driven configuration management for the cache warmer
//!
//! Configuration is split by functional domain (engine, http, cache detection,
//! logging), with validation, defaults, and environment variable overrides.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    cache::{CacheConfig, CacheIndicator},
    engine::EngineConfig,
    http::HttpConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    WarmerConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
