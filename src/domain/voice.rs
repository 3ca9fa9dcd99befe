//! Voice Context
//!
//! One canonical mapping from voice identifiers to speaker embeddings: the
//! built-in speakers are variants of `Voice`, table-only voices are
//! `Voice::Extended`, and `SpeakerTable` resolves either to its embedding.
//! The table is loaded once at startup and read-only thereafter.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

/// Built-in speaker identifiers shipped with the released model.
const BUILTIN_VOICES: &[&str] = &["tetiana", "mykyta", "lada", "dmytro", "oleksa"];

/// Speaker table error
#[derive(Debug, Error)]
pub enum SpeakerTableError {
    #[error("speaker table is empty")]
    Empty,

    #[error("speaker table is missing built-in voice `{0}`")]
    MissingBuiltin(&'static str),

    #[error("embedding for `{voice}` has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        voice: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to parse speaker table: {0}")]
    Parse(String),
}

/// A voice identifier: one of the built-in speakers or a voice added through
/// the runtime-loaded embedding table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Voice {
    Tetiana,
    Mykyta,
    Lada,
    Dmytro,
    Oleksa,
    Extended(String),
}

impl Voice {
    /// Match a built-in voice identifier.
    pub fn builtin(id: &str) -> Option<Self> {
        match id {
            "tetiana" => Some(Self::Tetiana),
            "mykyta" => Some(Self::Mykyta),
            "lada" => Some(Self::Lada),
            "dmytro" => Some(Self::Dmytro),
            "oleksa" => Some(Self::Oleksa),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Tetiana => "tetiana",
            Self::Mykyta => "mykyta",
            Self::Lada => "lada",
            Self::Dmytro => "dmytro",
            Self::Oleksa => "oleksa",
            Self::Extended(id) => id,
        }
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed-dimension vector characterizing a voice, consumed opaquely by the
/// synthesis backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerEmbedding(Vec<f32>);

impl SpeakerEmbedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Read-only mapping from voice names to embeddings.
///
/// Invariants, checked at load:
/// - every built-in voice is present
/// - all embeddings share one dimension
pub struct SpeakerTable {
    embeddings: HashMap<String, SpeakerEmbedding>,
    dimension: usize,
}

impl SpeakerTable {
    /// Build a table from name/embedding pairs.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, Vec<f32>)>,
    ) -> Result<Self, SpeakerTableError> {
        let mut embeddings = HashMap::new();
        let mut dimension = None;

        for (name, values) in entries {
            let expected = *dimension.get_or_insert(values.len());
            if values.len() != expected {
                return Err(SpeakerTableError::DimensionMismatch {
                    voice: name,
                    expected,
                    actual: values.len(),
                });
            }
            embeddings.insert(name, SpeakerEmbedding::new(values));
        }

        let dimension = dimension.ok_or(SpeakerTableError::Empty)?;

        for &builtin in BUILTIN_VOICES {
            if !embeddings.contains_key(builtin) {
                return Err(SpeakerTableError::MissingBuiltin(builtin));
            }
        }

        Ok(Self {
            embeddings,
            dimension,
        })
    }

    /// Parse the cached `speakers.json` asset: a JSON object mapping voice
    /// names to embedding vectors.
    pub fn from_json_str(source: &str) -> Result<Self, SpeakerTableError> {
        let parsed: HashMap<String, Vec<f32>> =
            serde_json::from_str(source).map_err(|e| SpeakerTableError::Parse(e.to_string()))?;
        Self::from_entries(parsed)
    }

    /// Resolve an identifier to a voice: built-ins always parse, any other
    /// identifier is accepted only when present in the table.
    pub fn resolve(&self, id: &str) -> Option<Voice> {
        if let Some(voice) = Voice::builtin(id) {
            return Some(voice);
        }
        self.embeddings
            .contains_key(id)
            .then(|| Voice::Extended(id.to_string()))
    }

    /// Embedding for a resolved voice.
    pub fn embedding(&self, voice: &Voice) -> Option<&SpeakerEmbedding> {
        self.embeddings.get(voice.as_str())
    }

    /// All voice names, sorted for stable listings.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.embeddings.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Table with every built-in voice mapped to a small distinct embedding.
    pub fn builtin_table() -> SpeakerTable {
        SpeakerTable::from_entries(
            BUILTIN_VOICES
                .iter()
                .enumerate()
                .map(|(i, name)| (name.to_string(), vec![i as f32, 1.0, 0.0])),
        )
        .unwrap()
    }

    /// Builtin table plus one extended voice.
    pub fn extended_table() -> SpeakerTable {
        SpeakerTable::from_entries(
            BUILTIN_VOICES
                .iter()
                .enumerate()
                .map(|(i, name)| (name.to_string(), vec![i as f32, 1.0, 0.0]))
                .chain([("marichka".to_string(), vec![9.0, 1.0, 0.0])]),
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{builtin_table, extended_table};
    use super::*;

    #[test]
    fn test_builtin_voices_resolve() {
        let table = builtin_table();
        assert_eq!(table.resolve("tetiana"), Some(Voice::Tetiana));
        assert_eq!(table.resolve("oleksa"), Some(Voice::Oleksa));
    }

    #[test]
    fn test_unknown_voice_rejected() {
        let table = builtin_table();
        assert_eq!(table.resolve("eleven"), None);
    }

    #[test]
    fn test_extended_voice_accepted_when_in_table() {
        let table = extended_table();
        assert_eq!(
            table.resolve("marichka"),
            Some(Voice::Extended("marichka".to_string()))
        );
        let embedding = table
            .embedding(&Voice::Extended("marichka".to_string()))
            .unwrap();
        assert_eq!(embedding.as_slice(), &[9.0, 1.0, 0.0]);
    }

    #[test]
    fn test_missing_builtin_rejected_at_load() {
        let result = SpeakerTable::from_entries([("tetiana".to_string(), vec![0.0])]);
        assert!(matches!(
            result,
            Err(SpeakerTableError::MissingBuiltin("mykyta"))
        ));
    }

    #[test]
    fn test_dimension_mismatch_rejected_at_load() {
        let result = SpeakerTable::from_entries([
            ("tetiana".to_string(), vec![0.0, 1.0]),
            ("mykyta".to_string(), vec![0.0]),
        ]);
        assert!(matches!(
            result,
            Err(SpeakerTableError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let table = SpeakerTable::from_json_str(
            r#"{
                "tetiana": [0.0, 1.0],
                "mykyta": [1.0, 0.0],
                "lada": [0.5, 0.5],
                "dmytro": [0.2, 0.8],
                "oleksa": [0.8, 0.2]
            }"#,
        )
        .unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.dimension(), 2);
    }

    #[test]
    fn test_names_sorted() {
        let names = extended_table().names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"marichka".to_string()));
    }
}
