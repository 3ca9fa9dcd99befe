//! HTTP Model Client
//!
//! Implements `SynthesisModelPort` against the external synthesis backend.
//!
//! Backend API:
//! POST {base_url}/api/model/synthesize
//! Request: {"text": "...", "speaker_embedding": [...], "device": "cpu"} (JSON)
//! Response: raw little-endian f32 samples, metadata in headers

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{Device, ModelError, SynthesisModelPort, Waveform};
use crate::domain::voice::SpeakerEmbedding;

/// Synthesis request body (JSON)
#[derive(Debug, Serialize)]
struct ModelHttpRequest<'a> {
    /// Stressed text to synthesize
    text: &'a str,
    /// Speaker embedding vector
    speaker_embedding: &'a [f32],
    /// Compute device the backend should run on
    device: &'a str,
}

/// HTTP model client configuration
#[derive(Debug, Clone)]
pub struct HttpModelClientConfig {
    /// Backend base URL
    pub base_url: String,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
    /// Compute device, selected once at process start
    pub device: Device,
}

impl Default for HttpModelClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
            device: Device::Cpu,
        }
    }
}

impl HttpModelClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }
}

/// HTTP client for the synthesis backend.
pub struct HttpModelClient {
    client: Client,
    config: HttpModelClientConfig,
}

impl HttpModelClient {
    pub fn new(config: HttpModelClientConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/api/model/synthesize", self.config.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }
}

#[async_trait]
impl SynthesisModelPort for HttpModelClient {
    async fn synthesize(
        &self,
        stressed_text: &str,
        speaker: &SpeakerEmbedding,
    ) -> Result<Waveform, ModelError> {
        let body = ModelHttpRequest {
            text: stressed_text,
            speaker_embedding: speaker.as_slice(),
            device: self.config.device.as_str(),
        };

        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = stressed_text.len(),
            embedding_dim = speaker.dimension(),
            "Sending synthesis request"
        );

        let response = self
            .client
            .post(self.synthesize_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout
                } else if e.is_connect() {
                    ModelError::NetworkError(format!("Cannot connect to backend: {}", e))
                } else {
                    ModelError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ModelError::BackendError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let sample_rate = response
            .headers()
            .get("X-Sample-Rate")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| {
                ModelError::InvalidResponse("missing X-Sample-Rate header".to_string())
            })?;

        let payload = response
            .bytes()
            .await
            .map_err(|e| ModelError::InvalidResponse(format!("Failed to read audio: {}", e)))?;

        if payload.len() % 4 != 0 {
            return Err(ModelError::InvalidResponse(format!(
                "sample payload of {} bytes is not f32-aligned",
                payload.len()
            )));
        }

        let samples: Vec<f32> = payload
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        tracing::info!(
            samples = samples.len(),
            sample_rate = sample_rate,
            "Backend synthesis completed"
        );

        Ok(Waveform::new(samples, sample_rate))
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpModelClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config.device, Device::Cpu);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpModelClientConfig::new("http://model:9000")
            .with_timeout(60)
            .with_device(Device::Cuda);
        assert_eq!(config.base_url, "http://model:9000");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.device, Device::Cuda);
    }
}
