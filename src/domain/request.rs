//! Synthesis Request Types

use super::stress::StressMode;

/// Output audio container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Wav,
    Flac,
    Ogg,
}

impl AudioFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Flac => "audio/flac",
            Self::Ogg => "audio/ogg",
        }
    }
}

/// Sample encoding within the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleSubtype {
    Pcm16,
    Pcm24,
    Float,
}

impl SampleSubtype {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "pcm_16" => Some(Self::Pcm16),
            "pcm_24" => Some(Self::Pcm24),
            "float" => Some(Self::Float),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pcm16 => "pcm_16",
            Self::Pcm24 => "pcm_24",
            Self::Float => "float",
        }
    }
}

/// Validated output audio specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSpec {
    pub format: AudioFormat,
    pub subtype: SampleSubtype,
}

impl Default for AudioSpec {
    fn default() -> Self {
        Self {
            format: AudioFormat::Wav,
            subtype: SampleSubtype::Pcm16,
        }
    }
}

/// A raw synthesis request as received from the caller; everything is a
/// string until the orchestrator validates it.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// Input text to synthesize.
    pub text: String,
    /// Voice identifier (built-in or extended-table).
    pub voice: String,
    /// Stress mode identifier (`dictionary` or `model`).
    pub stress_mode: String,
    /// Output container format; defaults apply when absent.
    pub format: Option<String>,
    /// Output sample subtype; defaults apply when absent.
    pub subtype: Option<String>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice: impl Into<String>, stress_mode: StressMode) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
            stress_mode: stress_mode.as_str().to_string(),
            format: None,
            subtype: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(AudioFormat::parse("wav"), Some(AudioFormat::Wav));
        assert_eq!(AudioFormat::parse("WAV"), Some(AudioFormat::Wav));
        assert_eq!(AudioFormat::parse("mp3"), None);
    }

    #[test]
    fn test_subtype_parse() {
        assert_eq!(SampleSubtype::parse("pcm_16"), Some(SampleSubtype::Pcm16));
        assert_eq!(SampleSubtype::parse("FLOAT"), Some(SampleSubtype::Float));
        assert_eq!(SampleSubtype::parse("pcm_8"), None);
    }

    #[test]
    fn test_default_spec_is_uncompressed_wav() {
        let spec = AudioSpec::default();
        assert_eq!(spec.format, AudioFormat::Wav);
        assert_eq!(spec.subtype, SampleSubtype::Pcm16);
    }
}
