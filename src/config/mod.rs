//! Configuration
//!
//! Typed configuration with env/file/default layering.

mod loader;
mod types;

pub use loader::{load_config, load_config_from_path, print_config, ConfigError};
pub use types::{
    AppConfig, AssetsConfig, AudioConfig, LogConfig, ServerConfig, StressConfig,
    SynthesisConfig, TelemetryConfig,
};
