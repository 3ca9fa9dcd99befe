//! Fake Model Client
//!
//! Stands in for the synthesis backend: returns a deterministic generated
//! waveform whose length tracks the input text, without any network access.

use async_trait::async_trait;

use crate::application::ports::{ModelError, SynthesisModelPort, Waveform};
use crate::domain::voice::SpeakerEmbedding;

/// Fake model client configuration
#[derive(Debug, Clone)]
pub struct FakeModelClientConfig {
    /// Output sample rate
    pub sample_rate: u32,
    /// Synthesized samples per input character
    pub samples_per_char: usize,
    /// Simulated inference latency (milliseconds)
    pub latency_ms: u64,
}

impl Default for FakeModelClientConfig {
    fn default() -> Self {
        Self {
            sample_rate: 22050,
            samples_per_char: 1800,
            latency_ms: 50,
        }
    }
}

/// Fake synthesis backend.
pub struct FakeModelClient {
    config: FakeModelClientConfig,
}

impl FakeModelClient {
    pub fn new(config: FakeModelClientConfig) -> Self {
        tracing::info!(
            sample_rate = config.sample_rate,
            "FakeModelClient initialized"
        );
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeModelClientConfig::default())
    }
}

#[async_trait]
impl SynthesisModelPort for FakeModelClient {
    async fn synthesize(
        &self,
        stressed_text: &str,
        _speaker: &SpeakerEmbedding,
    ) -> Result<Waveform, ModelError> {
        tracing::debug!(
            text_len = stressed_text.len(),
            "FakeModelClient: generating fixed-tone audio"
        );

        tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;

        let sample_count = stressed_text.chars().count().max(1) * self.config.samples_per_char;
        let step = 440.0 * 2.0 * std::f32::consts::PI / self.config.sample_rate as f32;
        let samples = (0..sample_count)
            .map(|i| (i as f32 * step).sin() * 0.3)
            .collect();

        Ok(Waveform::new(samples, self.config.sample_rate))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::voice::SpeakerEmbedding;

    #[tokio::test]
    async fn test_waveform_is_deterministic_and_non_empty() {
        let client = FakeModelClient::new(FakeModelClientConfig {
            latency_ms: 0,
            ..Default::default()
        });
        let embedding = SpeakerEmbedding::new(vec![0.0, 1.0]);

        let a = client.synthesize("привіт", &embedding).await.unwrap();
        let b = client.synthesize("привіт", &embedding).await.unwrap();

        assert!(!a.is_empty());
        assert_eq!(a, b);
        assert_eq!(a.sample_rate, 22050);
    }
}
