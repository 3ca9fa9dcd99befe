//! Telemetry Log Record
//!
//! Immutable value created once per successful synthesis request. The wire
//! shape is a positional row `[text, speaker, stress_mode, schema_version,
//! timestamp]`, delivered in batches by the flush worker.

use chrono::{DateTime, Utc};

/// Version of the telemetry row layout.
pub const LOG_SCHEMA_VERSION: u32 = 1;

/// One anonymized usage record.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub text: String,
    pub speaker: String,
    pub stress_mode: String,
    pub schema_version: u32,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(
        text: impl Into<String>,
        speaker: impl Into<String>,
        stress_mode: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            speaker: speaker.into(),
            stress_mode: stress_mode.into(),
            schema_version: LOG_SCHEMA_VERSION,
            timestamp: Utc::now(),
        }
    }

    /// Positional wire row; tuples serialize to JSON arrays.
    pub fn as_row(&self) -> (&str, &str, &str, u32, String) {
        (
            &self.text,
            &self.speaker,
            &self.stress_mode,
            self.schema_version,
            self.timestamp.to_rfc3339(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_carries_schema_version() {
        let record = LogRecord::new("привіт", "tetiana", "dictionary");
        assert_eq!(record.schema_version, LOG_SCHEMA_VERSION);
    }

    #[test]
    fn test_row_shape() {
        let record = LogRecord::new("привіт", "tetiana", "dictionary");
        let row = record.as_row();
        assert_eq!(row.0, "привіт");
        assert_eq!(row.1, "tetiana");
        assert_eq!(row.2, "dictionary");
        assert_eq!(row.3, 1);

        let json = serde_json::to_string(&row).unwrap();
        assert!(json.starts_with('['), "row serializes as a JSON array");
    }
}
