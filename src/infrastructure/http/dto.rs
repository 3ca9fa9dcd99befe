//! Data Transfer Objects

use serde::{Deserialize, Serialize};

// ============================================================================
// Response envelope
// ============================================================================

/// Uniform API response format
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// TTS DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    pub voice: String,
    /// Defaults to `dictionary` when absent.
    #[serde(default = "default_stress_mode")]
    pub stress: String,
    pub format: Option<String>,
    pub subtype: Option<String>,
}

fn default_stress_mode() -> String {
    "dictionary".to_string()
}

#[derive(Debug, Deserialize)]
pub struct StressRequest {
    pub text: String,
    #[serde(default = "default_stress_mode")]
    pub stress: String,
}

#[derive(Debug, Serialize)]
pub struct StressResponse {
    pub stressed_text: String,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<String>,
}
