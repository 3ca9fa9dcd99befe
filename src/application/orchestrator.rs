//! Synthesis Orchestrator
//!
//! Drives one request end to end: validation, preprocessing, truncation,
//! stress resolution, backend dispatch, RTF logging, encoding and the
//! success-only telemetry enqueue. Validation failures reject the request
//! before any processing and leave no side effects.

use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{AudioEncoderPort, SynthesisModelPort};
use crate::domain::request::{AudioFormat, AudioSpec, SampleSubtype, SynthesisRequest};
use crate::domain::stress::{StressMode, StressResolver};
use crate::domain::telemetry::LogRecord;
use crate::domain::text::preprocess_text;
use crate::domain::voice::SpeakerTable;
use crate::infrastructure::telemetry::TelemetryQueue;

/// Default request text limit, in Unicode code points.
pub const DEFAULT_TEXT_LIMIT: usize = 2000;

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Maximum request text length; longer input is silently truncated
    /// before stress resolution.
    pub text_limit: usize,
    /// Output encoding applied when the request leaves format/subtype unset.
    pub default_spec: AudioSpec,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            text_limit: DEFAULT_TEXT_LIMIT,
            default_spec: AudioSpec::default(),
        }
    }
}

/// Result of a successful synthesis request.
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// Encoded audio bytes.
    pub audio: Vec<u8>,
    /// The stressed text that was actually synthesized; reflects truncation.
    pub stressed_text: String,
    pub content_type: &'static str,
    pub sample_rate: u32,
    pub duration_ms: u64,
}

/// Synthesis request orchestrator.
pub struct SynthesisOrchestrator {
    config: OrchestratorConfig,
    resolver: StressResolver,
    speakers: SpeakerTable,
    model: Arc<dyn SynthesisModelPort>,
    encoder: Arc<dyn AudioEncoderPort>,
    telemetry: Option<Arc<TelemetryQueue>>,
}

impl SynthesisOrchestrator {
    pub fn new(
        config: OrchestratorConfig,
        resolver: StressResolver,
        speakers: SpeakerTable,
        model: Arc<dyn SynthesisModelPort>,
        encoder: Arc<dyn AudioEncoderPort>,
    ) -> Self {
        Self {
            config,
            resolver,
            speakers,
            model,
            encoder,
            telemetry: None,
        }
    }

    /// Attach the telemetry queue; without one, successful requests are not
    /// recorded at all.
    pub fn with_telemetry(mut self, queue: Arc<TelemetryQueue>) -> Self {
        self.telemetry = Some(queue);
        self
    }

    /// All accepted voice names, sorted.
    pub fn voices(&self) -> Vec<String> {
        self.speakers.names()
    }

    /// Resolve stress without synthesizing; same preprocessing and
    /// truncation as the full pipeline.
    pub fn resolve_stress(&self, text: &str, mode: StressMode) -> String {
        let text = self.prepare_text(text);
        self.resolver.resolve(&text, mode)
    }

    /// Run one synthesis request to completion.
    pub async fn synthesize(
        &self,
        request: SynthesisRequest,
    ) -> Result<SynthesisOutput, ApplicationError> {
        // validation first: no side effects for rejected requests
        let mode = StressMode::parse(&request.stress_mode).ok_or_else(|| {
            ApplicationError::validation(format!(
                "invalid stress mode `{}`, expected one of: dictionary, model",
                request.stress_mode
            ))
        })?;
        let voice = self.speakers.resolve(&request.voice).ok_or_else(|| {
            ApplicationError::validation(format!("unknown voice `{}`", request.voice))
        })?;
        let spec = self.parse_spec(&request)?;
        let embedding = self.speakers.embedding(&voice).ok_or_else(|| {
            ApplicationError::internal(format!("no embedding for resolved voice `{}`", voice))
        })?;

        let request_id = Uuid::new_v4();
        let text = self.prepare_text(&request.text);
        let stressed_text = self.resolver.resolve(&text, mode);

        tracing::debug!(
            request_id = %request_id,
            voice = %voice,
            mode = %mode,
            text_len = text.chars().count(),
            "Dispatching synthesis request"
        );

        let started = Instant::now();
        let waveform = self.model.synthesize(&stressed_text, embedding).await?;
        let elapsed = started.elapsed();

        let duration_secs = waveform.duration_secs();
        if duration_secs > 0.0 {
            let rtf = elapsed.as_secs_f64() / duration_secs;
            tracing::info!(
                request_id = %request_id,
                voice = %voice,
                rtf = format!("{:.5}", rtf),
                audio_secs = format!("{:.2}", duration_secs),
                "Synthesis completed"
            );
        }

        let sample_rate = waveform.sample_rate;
        let duration_ms = waveform.duration_ms();
        let audio = self.encoder.encode(&waveform, &spec)?;

        if let Some(queue) = &self.telemetry {
            queue.enqueue(LogRecord::new(text.as_str(), voice.as_str(), mode.as_str()));
        }

        Ok(SynthesisOutput {
            audio,
            stressed_text,
            content_type: spec.format.content_type(),
            sample_rate,
            duration_ms,
        })
    }

    /// Silently truncate to the configured limit, then preprocess;
    /// observable through the returned stressed text, never reported as an
    /// error.
    fn prepare_text(&self, text: &str) -> String {
        let text = if text.chars().count() <= self.config.text_limit {
            text.to_string()
        } else {
            tracing::debug!(
                limit = self.config.text_limit,
                "Request text truncated to limit"
            );
            text.chars().take(self.config.text_limit).collect()
        };
        preprocess_text(&text)
    }

    fn parse_spec(&self, request: &SynthesisRequest) -> Result<AudioSpec, ApplicationError> {
        let format = match &request.format {
            Some(name) => AudioFormat::parse(name).ok_or_else(|| {
                ApplicationError::validation(format!("unknown audio format `{}`", name))
            })?,
            None => self.config.default_spec.format,
        };
        let subtype = match &request.subtype {
            Some(name) => SampleSubtype::parse(name).ok_or_else(|| {
                ApplicationError::validation(format!("unknown audio subtype `{}`", name))
            })?,
            None => self.config.default_spec.subtype,
        };
        Ok(AudioSpec { format, subtype })
    }
}
