//! WAV Encoder
//!
//! Implements `AudioEncoderPort` for the WAV container with PCM16, PCM24 and
//! Float32 subtypes. Lossy containers parse at the request layer but are
//! rejected here as unsupported.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::application::ports::{AudioEncoderPort, EncodeError, Waveform};
use crate::domain::request::{AudioFormat, AudioSpec, SampleSubtype};

/// WAV container encoder.
#[derive(Default)]
pub struct WavEncoder;

impl WavEncoder {
    pub fn new() -> Self {
        Self
    }

    fn wav_spec(waveform: &Waveform, subtype: SampleSubtype) -> WavSpec {
        let (bits_per_sample, sample_format) = match subtype {
            SampleSubtype::Pcm16 => (16, SampleFormat::Int),
            SampleSubtype::Pcm24 => (24, SampleFormat::Int),
            SampleSubtype::Float => (32, SampleFormat::Float),
        };
        WavSpec {
            channels: 1,
            sample_rate: waveform.sample_rate,
            bits_per_sample,
            sample_format,
        }
    }
}

impl AudioEncoderPort for WavEncoder {
    fn encode(&self, waveform: &Waveform, spec: &AudioSpec) -> Result<Vec<u8>, EncodeError> {
        if spec.format != AudioFormat::Wav {
            return Err(EncodeError::UnsupportedFormat(
                spec.format.extension().to_string(),
            ));
        }

        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, Self::wav_spec(waveform, spec.subtype))
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

        let write_result: Result<(), hound::Error> = (|| {
            match spec.subtype {
                SampleSubtype::Pcm16 => {
                    for &sample in &waveform.samples {
                        let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                        writer.write_sample(scaled)?;
                    }
                }
                SampleSubtype::Pcm24 => {
                    // 24-bit PCM rides in an i32 with hound
                    const PCM24_MAX: f32 = 8_388_607.0;
                    for &sample in &waveform.samples {
                        let scaled = (sample.clamp(-1.0, 1.0) * PCM24_MAX) as i32;
                        writer.write_sample(scaled)?;
                    }
                }
                SampleSubtype::Float => {
                    for &sample in &waveform.samples {
                        writer.write_sample(sample)?;
                    }
                }
            }
            writer.finalize()
        })();
        write_result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

        Ok(cursor.into_inner())
    }
}
