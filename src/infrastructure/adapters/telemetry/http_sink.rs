//! HTTP Telemetry Sink
//!
//! Implements `TelemetrySinkPort`: delivers record batches as a JSON array
//! of positional rows to the configured endpoint with bearer-token auth.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{SinkError, TelemetrySinkPort};
use crate::domain::telemetry::LogRecord;

/// HTTP telemetry sink configuration
#[derive(Debug, Clone)]
pub struct HttpTelemetrySinkConfig {
    /// Upload endpoint URL
    pub endpoint: String,
    /// Delivery credential sent as a bearer token
    pub token: String,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

impl HttpTelemetrySinkConfig {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            timeout_secs: 30,
        }
    }
}

/// HTTP telemetry sink.
pub struct HttpTelemetrySink {
    client: Client,
    config: HttpTelemetrySinkConfig,
}

impl HttpTelemetrySink {
    pub fn new(config: HttpTelemetrySinkConfig) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SinkError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl TelemetrySinkPort for HttpTelemetrySink {
    async fn upload(&self, batch: &[LogRecord]) -> Result<(), SinkError> {
        let rows: Vec<_> = batch.iter().map(LogRecord::as_row).collect();

        tracing::debug!(
            endpoint = %self.config.endpoint,
            records = rows.len(),
            "Uploading telemetry batch"
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.token)
            .json(&rows)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SinkError::Timeout
                } else {
                    SinkError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected(format!("HTTP {}: {}", status, error_text)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = HttpTelemetrySinkConfig::new("https://sink.example/api/upload", "secret");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.endpoint, "https://sink.example/api/upload");
    }
}
