//! Configuration Loader
//!
//! Multi-source configuration merging, highest priority first:
//! 1. Environment variables
//! 2. Configuration file (config.toml)
//! 3. Defaults

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// Configuration load error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// Configuration file search names
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// Load the application configuration.
///
/// Merged by priority, highest first:
/// 1. Environment variables (prefix `NAHOLOS_`, level separator `__`)
/// 2. Configuration file (config.toml or config.local.toml)
/// 3. Defaults
///
/// # Environment variable examples
/// - `NAHOLOS_SERVER__PORT=8080`
/// - `NAHOLOS_SYNTHESIS__MODEL_URL=http://model-server:8000`
/// - `NAHOLOS_ASSETS__CACHE_DIR=/data/assets`
/// - `NAHOLOS_TELEMETRY__TOKEN=secret`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// Load from an explicit file path instead of the default search names.
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. defaults (lowest priority)
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5080)?
        .set_default("assets.cache_dir", "data/assets")?
        .set_default(
            "assets.release_url",
            crate::infrastructure::assets::DEFAULT_RELEASE_URL,
        )?
        .set_default("assets.download_timeout_secs", 600)?
        .set_default("synthesis.model_url", "http://localhost:8000")?
        .set_default("synthesis.timeout_secs", 120)?
        .set_default("synthesis.text_limit", 2000)?
        .set_default("audio.format", "wav")?
        .set_default("audio.subtype", "pcm_16")?
        .set_default(
            "telemetry.endpoint",
            "http://localhost:8080/api/telemetry/upload",
        )?
        .set_default("telemetry.flush_interval_secs", 60)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. configuration file, when present
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. environment variables (highest priority)
    builder = builder.add_source(
        Environment::with_prefix("NAHOLOS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration consistency
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.synthesis.model_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Synthesis backend URL cannot be empty".to_string(),
        ));
    }

    if config.synthesis.text_limit == 0 {
        return Err(ConfigError::ValidationError(
            "Text limit cannot be 0".to_string(),
        ));
    }

    if let Some(device) = &config.synthesis.device {
        if crate::application::ports::Device::parse(device).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "Unknown device `{}`, expected `cpu` or `cuda`",
                device
            )));
        }
    }

    if config.audio.audio_spec().is_none() {
        return Err(ConfigError::ValidationError(format!(
            "Unknown audio format/subtype `{}`/`{}`",
            config.audio.format, config.audio.subtype
        )));
    }

    if config.telemetry.enabled() {
        if config.telemetry.endpoint.is_empty() {
            return Err(ConfigError::ValidationError(
                "Telemetry endpoint cannot be empty when a token is configured".to_string(),
            ));
        }
        if config.telemetry.flush_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "Telemetry flush interval cannot be 0".to_string(),
            ));
        }
    }

    Ok(())
}

/// Log the effective configuration at startup
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Asset Cache: {}", config.assets.cache_dir.display());
    tracing::info!("Release URL: {}", config.assets.release_url);
    tracing::info!("Synthesis Backend: {}", config.synthesis.model_url);
    tracing::info!("Synthesis Timeout: {}s", config.synthesis.timeout_secs);
    tracing::info!("Text Limit: {} code points", config.synthesis.text_limit);
    tracing::info!(
        "Audio: {} / {}",
        config.audio.format,
        config.audio.subtype
    );
    tracing::info!("Telemetry Enabled: {}", config.telemetry.enabled());
    if config.telemetry.enabled() {
        tracing::info!("Telemetry Endpoint: {}", config.telemetry.endpoint);
        tracing::info!(
            "Telemetry Flush Interval: {}s",
            config.telemetry.flush_interval_secs
        );
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
