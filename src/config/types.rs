//! Configuration Types

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::request::{AudioFormat, AudioSpec, SampleSubtype};
use crate::infrastructure::assets::DEFAULT_RELEASE_URL;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Asset bootstrap configuration
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Synthesis backend configuration
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Stress resolution configuration
    #[serde(default)]
    pub stress: StressConfig,

    /// Output audio configuration
    #[serde(default)]
    pub audio: AudioConfig,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Log configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Asset bootstrap configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    /// Directory the release assets are cached in; must exist at startup
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Base URL of the release the assets are fetched from
    #[serde(default = "default_release_url")]
    pub release_url: String,

    /// Download timeout (seconds)
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("data/assets")
}

fn default_release_url() -> String {
    DEFAULT_RELEASE_URL.to_string()
}

fn default_download_timeout() -> u64 {
    600
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            release_url: default_release_url(),
            download_timeout_secs: default_download_timeout(),
        }
    }
}

/// Synthesis backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// Backend base URL
    #[serde(default = "default_model_url")]
    pub model_url: String,

    /// Request timeout (seconds)
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,

    /// Compute device override (`cpu` or `cuda`); autodetected when unset
    #[serde(default)]
    pub device: Option<String>,

    /// Request text limit in Unicode code points; longer input is silently
    /// truncated before stress resolution
    #[serde(default = "default_text_limit")]
    pub text_limit: usize,
}

fn default_model_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_model_timeout() -> u64 {
    120
}

fn default_text_limit() -> usize {
    2000
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            model_url: default_model_url(),
            timeout_secs: default_model_timeout(),
            device: None,
            text_limit: default_text_limit(),
        }
    }
}

/// Stress resolution configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StressConfig {
    /// Dictionary TSV path; the bundled seed dictionary is used when unset
    #[serde(default)]
    pub dictionary_path: Option<PathBuf>,
}

/// Output audio configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    /// Default output container format
    #[serde(default = "default_audio_format")]
    pub format: String,

    /// Default sample subtype
    #[serde(default = "default_audio_subtype")]
    pub subtype: String,
}

fn default_audio_format() -> String {
    "wav".to_string()
}

fn default_audio_subtype() -> String {
    "pcm_16".to_string()
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            format: default_audio_format(),
            subtype: default_audio_subtype(),
        }
    }
}

impl AudioConfig {
    /// Parse the configured default spec; `None` when a name is unknown.
    pub fn audio_spec(&self) -> Option<AudioSpec> {
        Some(AudioSpec {
            format: AudioFormat::parse(&self.format)?,
            subtype: SampleSubtype::parse(&self.subtype)?,
        })
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Delivery credential; telemetry is disabled entirely when unset
    #[serde(default)]
    pub token: Option<String>,

    /// Upload endpoint URL
    #[serde(default = "default_telemetry_endpoint")]
    pub endpoint: String,

    /// Interval between flush attempts (seconds)
    #[serde(default = "default_flush_interval")]
    pub flush_interval_secs: u64,
}

fn default_telemetry_endpoint() -> String {
    "http://localhost:8080/api/telemetry/upload".to_string()
}

fn default_flush_interval() -> u64 {
    60
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: default_telemetry_endpoint(),
            flush_interval_secs: default_flush_interval(),
        }
    }
}

impl TelemetryConfig {
    /// Telemetry runs only when a credential is configured.
    pub fn enabled(&self) -> bool {
        self.token.as_deref().map(|t| !t.is_empty()).unwrap_or(false)
    }
}

/// Log configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON-formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5080);
        assert_eq!(config.synthesis.model_url, "http://localhost:8000");
        assert_eq!(config.synthesis.text_limit, 2000);
        assert_eq!(config.assets.cache_dir, PathBuf::from("data/assets"));
        assert!(!config.telemetry.enabled());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5080");
    }

    #[test]
    fn test_audio_spec_parses_defaults() {
        let spec = AudioConfig::default().audio_spec().unwrap();
        assert_eq!(spec.format, AudioFormat::Wav);
        assert_eq!(spec.subtype, SampleSubtype::Pcm16);
    }

    #[test]
    fn test_audio_spec_rejects_unknown_subtype() {
        let config = AudioConfig {
            format: "wav".to_string(),
            subtype: "pcm_8".to_string(),
        };
        assert!(config.audio_spec().is_none());
    }

    #[test]
    fn test_telemetry_enabled_requires_non_empty_token() {
        let mut config = TelemetryConfig::default();
        assert!(!config.enabled());
        config.token = Some(String::new());
        assert!(!config.enabled());
        config.token = Some("secret".to_string());
        assert!(config.enabled());
    }
}
