//! Stress Dictionary
//!
//! Immutable lookup table from normalized word forms to stress candidates.
//! Loaded exactly once at startup; every accessor takes `&self`.
//!
//! Source format is TSV: `form<TAB>vowel_index<TAB>cases`. Repeated forms
//! are homographs; file order is preserved and serves as the deterministic
//! tie-break order during resolution.

use std::collections::HashMap;

use thiserror::Error;

use super::vowel_count;

/// Bundled seed dictionary, compiled into the binary.
const BUNDLED_TSV: &str = include_str!("../../../data/stress_dict.tsv");

/// Dictionary load error
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("invalid entry at line {line}: {reason}")]
    InvalidEntry { line: usize, reason: String },

    #[error("dictionary source contains no entries")]
    Empty,
}

/// Grammatical case tag attached to a stress candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GramCase {
    Nominative,
    Genitive,
    Dative,
    Accusative,
    Instrumental,
    Locative,
    Vocative,
}

impl GramCase {
    /// Parse the short tag used in dictionary sources.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "nom" => Some(Self::Nominative),
            "gen" => Some(Self::Genitive),
            "dat" => Some(Self::Dative),
            "acc" => Some(Self::Accusative),
            "ins" => Some(Self::Instrumental),
            "loc" => Some(Self::Locative),
            "voc" => Some(Self::Vocative),
            _ => None,
        }
    }
}

/// One stress reading of a word form.
///
/// `vowel_index` is the zero-based ordinal of the stressed vowel within the
/// word. Validated against the form's vowel count at load time, so marking
/// can never run past the end of the word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressCandidate {
    pub vowel_index: usize,
    pub tags: Vec<GramCase>,
}

/// Immutable stress dictionary.
pub struct StressDictionary {
    entries: HashMap<String, Vec<StressCandidate>>,
    version: Option<String>,
}

impl StressDictionary {
    /// Parse a TSV source into a dictionary.
    pub fn from_tsv_str(source: &str) -> Result<Self, DictionaryError> {
        let mut entries: HashMap<String, Vec<StressCandidate>> = HashMap::new();
        let mut version = None;

        for (idx, raw_line) in source.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                if let Some(v) = comment.trim().strip_prefix("version:") {
                    version = Some(v.trim().to_string());
                }
                continue;
            }

            let mut fields = line.split('\t');
            let form = fields.next().unwrap_or_default();
            let index_field = fields.next().ok_or_else(|| DictionaryError::InvalidEntry {
                line: line_no,
                reason: "missing vowel index field".to_string(),
            })?;
            let tags_field = fields.next().unwrap_or("-");

            let form = normalize_word(form);
            if form.is_empty() {
                return Err(DictionaryError::InvalidEntry {
                    line: line_no,
                    reason: "empty word form".to_string(),
                });
            }

            let vowel_index: usize =
                index_field
                    .parse()
                    .map_err(|_| DictionaryError::InvalidEntry {
                        line: line_no,
                        reason: format!("invalid vowel index `{}`", index_field),
                    })?;
            let vowels = vowel_count(&form);
            if vowel_index >= vowels {
                return Err(DictionaryError::InvalidEntry {
                    line: line_no,
                    reason: format!(
                        "vowel index {} out of range for `{}` ({} vowels)",
                        vowel_index, form, vowels
                    ),
                });
            }

            let tags = parse_tags(tags_field).map_err(|tag| DictionaryError::InvalidEntry {
                line: line_no,
                reason: format!("unknown case tag `{}`", tag),
            })?;

            entries
                .entry(form)
                .or_default()
                .push(StressCandidate { vowel_index, tags });
        }

        if entries.is_empty() {
            return Err(DictionaryError::Empty);
        }

        Ok(Self { entries, version })
    }

    /// Load the bundled seed dictionary.
    pub fn bundled() -> Result<Self, DictionaryError> {
        Self::from_tsv_str(BUNDLED_TSV)
    }

    /// Candidates for a normalized word form, in source order.
    pub fn lookup(&self, normalized_form: &str) -> &[StressCandidate] {
        self.entries
            .get(normalized_form)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct word forms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Version string parsed from a `# version:` header comment, if any.
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

fn parse_tags(field: &str) -> Result<Vec<GramCase>, String> {
    if field == "-" || field.is_empty() {
        return Ok(Vec::new());
    }
    field
        .split(',')
        .map(|tag| {
            let tag = tag.trim();
            GramCase::parse(tag).ok_or_else(|| tag.to_string())
        })
        .collect()
}

/// Normalize a word form for dictionary lookup: lowercase, combining marks
/// stripped, apostrophe variants folded to U+0027.
pub fn normalize_word(word: &str) -> String {
    word.chars()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .flat_map(|c| {
            let folded = match c {
                '’' | 'ʼ' | '`' => '\'',
                other => other,
            };
            folded.to_lowercase()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_entry() {
        let dict = StressDictionary::from_tsv_str("привіт\t1\t-").unwrap();
        let candidates = dict.lookup("привіт");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].vowel_index, 1);
        assert!(candidates[0].tags.is_empty());
    }

    #[test]
    fn test_homograph_order_preserved() {
        let src = "замок\t0\tnom,acc\nзамок\t1\tnom,acc";
        let dict = StressDictionary::from_tsv_str(src).unwrap();
        let candidates = dict.lookup("замок");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].vowel_index, 0);
        assert_eq!(candidates[1].vowel_index, 1);
    }

    #[test]
    fn test_case_tags_parsed() {
        let dict = StressDictionary::from_tsv_str("руки\t1\tgen").unwrap();
        assert_eq!(dict.lookup("руки")[0].tags, vec![GramCase::Genitive]);
    }

    #[test]
    fn test_vowel_index_out_of_range_rejected() {
        let result = StressDictionary::from_tsv_str("мова\t5\t-");
        assert!(matches!(
            result,
            Err(DictionaryError::InvalidEntry { line: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let result = StressDictionary::from_tsv_str("мова\t0\tabl");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_source_rejected() {
        assert!(matches!(
            StressDictionary::from_tsv_str("# only comments\n"),
            Err(DictionaryError::Empty)
        ));
    }

    #[test]
    fn test_version_header() {
        let dict = StressDictionary::from_tsv_str("# version: 2026.02\nмова\t0\t-").unwrap();
        assert_eq!(dict.version(), Some("2026.02"));
    }

    #[test]
    fn test_lookup_unknown_form_is_empty() {
        let dict = StressDictionary::from_tsv_str("мова\t0\t-").unwrap();
        assert!(dict.lookup("невідоме").is_empty());
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("Приві́т"), "привіт");
        assert_eq!(normalize_word("м’яч"), "м'яч");
        assert_eq!(normalize_word("МОВА"), "мова");
    }

    #[test]
    fn test_bundled_dictionary_loads() {
        let dict = StressDictionary::bundled().unwrap();
        assert!(!dict.is_empty());
        assert_eq!(dict.version(), Some("2026.02"));
        // seed entries used by the end-to-end examples
        assert_eq!(dict.lookup("привіт").len(), 1);
        assert_eq!(dict.lookup("тебе").len(), 1);
        assert_eq!(dict.lookup("звати").len(), 1);
        assert_eq!(dict.lookup("руки").len(), 2);
    }
}
