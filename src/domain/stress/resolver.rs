//! Stress Resolver
//!
//! Turns a sentence into a stress-annotated sentence: one combining acute
//! per multi-vowel word, chosen by manual override, dictionary lookup with
//! neighbor-context disambiguation, or an optional statistical predictor.
//!
//! Never fails on well-formed input and preserves the token count; words it
//! cannot resolve are emitted without a mark.

use std::sync::Arc;

use super::dictionary::{normalize_word, GramCase, StressCandidate, StressDictionary};
use super::tokenizer::{tokenize, Token, TokenKind};
use super::{is_vowel, vowel_count, StressMode, OVERRIDE_MARKER, STRESS_MARK};

/// Statistical fallback for words absent from the dictionary.
///
/// Implementations score candidate vowel positions and return the zero-based
/// ordinal of the winning vowel. Must be deterministic: `model`-mode output
/// is reproducible for a fixed dictionary and predictor.
pub trait StressPredictorPort: Send + Sync {
    /// Predicted stressed-vowel ordinal for a normalized word, or `None`
    /// when the word has fewer than two vowels.
    fn predict(&self, word: &str) -> Option<usize>;
}

/// Grammatical cases governed by common prepositions, used to narrow
/// homograph candidates by the immediately preceding word.
const PREPOSITION_CASES: &[(&str, &[GramCase])] = &[
    ("без", &[GramCase::Genitive]),
    ("біля", &[GramCase::Genitive]),
    ("в", &[GramCase::Accusative, GramCase::Locative]),
    ("від", &[GramCase::Genitive]),
    ("для", &[GramCase::Genitive]),
    ("до", &[GramCase::Genitive]),
    ("з", &[GramCase::Genitive, GramCase::Instrumental]),
    ("за", &[GramCase::Accusative, GramCase::Instrumental]),
    ("зі", &[GramCase::Genitive, GramCase::Instrumental]),
    ("із", &[GramCase::Genitive, GramCase::Instrumental]),
    ("коло", &[GramCase::Genitive]),
    ("крім", &[GramCase::Genitive]),
    ("між", &[GramCase::Instrumental]),
    ("на", &[GramCase::Accusative, GramCase::Locative]),
    ("над", &[GramCase::Instrumental]),
    ("перед", &[GramCase::Instrumental]),
    ("під", &[GramCase::Accusative, GramCase::Instrumental]),
    ("після", &[GramCase::Genitive]),
    ("по", &[GramCase::Dative, GramCase::Locative]),
    ("при", &[GramCase::Locative]),
    ("про", &[GramCase::Accusative]),
    ("серед", &[GramCase::Genitive]),
    ("у", &[GramCase::Accusative, GramCase::Locative, GramCase::Genitive]),
    ("через", &[GramCase::Accusative]),
];

/// Stress resolver over an immutable dictionary.
pub struct StressResolver {
    dictionary: Arc<StressDictionary>,
    predictor: Option<Arc<dyn StressPredictorPort>>,
}

impl StressResolver {
    pub fn new(dictionary: Arc<StressDictionary>) -> Self {
        Self {
            dictionary,
            predictor: None,
        }
    }

    /// Attach the statistical fallback used in `model` mode.
    pub fn with_predictor(mut self, predictor: Arc<dyn StressPredictorPort>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    /// Resolve stress for a whole sentence.
    ///
    /// Deterministic for a given dictionary, mode and input; idempotent when
    /// re-run on its own output.
    pub fn resolve(&self, sentence: &str, mode: StressMode) -> String {
        let tokens = tokenize(sentence);
        let mut output = String::with_capacity(sentence.len() + tokens.len());

        for (index, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::Word => output.push_str(&self.resolve_word(&tokens, index, mode)),
                _ => output.push_str(&token.text),
            }
        }

        output
    }

    fn resolve_word(&self, tokens: &[Token], index: usize, mode: StressMode) -> String {
        let surface = tokens[index].text.as_str();
        let has_marker = surface.contains(OVERRIDE_MARKER);

        // Stale combining marks never participate in override parsing or
        // lookup; known words are re-marked from the bare form, which makes
        // resolution idempotent.
        let mut bare = strip_stress_marks(surface);

        if has_marker {
            if let Some(forced) = apply_override(&bare) {
                return forced;
            }
            // markers that precede no vowel are dropped, resolution continues
            bare.retain(|c| c != OVERRIDE_MARKER);
        }

        if vowel_count(&bare) < 2 {
            return unresolved(surface, &bare, has_marker);
        }

        let normalized = normalize_word(&bare);
        let candidates = self.dictionary.lookup(&normalized);

        match candidates {
            [] => match mode {
                StressMode::Dictionary => {
                    tracing::debug!(word = %normalized, "no stress candidates, emitting unresolved");
                    unresolved(surface, &bare, has_marker)
                }
                StressMode::Model => match self.predictor.as_ref().and_then(|p| p.predict(&normalized)) {
                    Some(vowel_index) => mark_vowel(&bare, vowel_index),
                    None => {
                        tracing::debug!(word = %normalized, "predictor declined, emitting unresolved");
                        unresolved(surface, &bare, has_marker)
                    }
                },
            },
            [single] => mark_vowel(&bare, single.vowel_index),
            multiple => {
                let chosen = disambiguate(multiple, preceding_word(tokens, index));
                mark_vowel(&bare, chosen.vowel_index)
            }
        }
    }
}

/// Unresolved words are emitted verbatim; when override markers were present
/// but ineffective, the marker-stripped form is emitted instead, since
/// markers are always consumed.
fn unresolved(surface: &str, bare: &str, had_marker: bool) -> String {
    if had_marker {
        bare.to_string()
    } else {
        surface.to_string()
    }
}

/// Apply the manual override: the first `+` standing immediately before a
/// vowel wins, every marker is stripped.
fn apply_override(word: &str) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut output = String::with_capacity(word.len());
    let mut forced = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch == OVERRIDE_MARKER {
            if !forced && i + 1 < chars.len() && is_vowel(chars[i + 1]) {
                output.push(chars[i + 1]);
                output.push(STRESS_MARK);
                forced = true;
                i += 2;
                continue;
            }
            i += 1;
            continue;
        }
        output.push(ch);
        i += 1;
    }

    forced.then_some(output)
}

/// Insert the stress mark after the vowel with the given zero-based ordinal.
fn mark_vowel(word: &str, vowel_index: usize) -> String {
    let mut output = String::with_capacity(word.len() + STRESS_MARK.len_utf8());
    let mut seen = 0;

    for ch in word.chars() {
        output.push(ch);
        if is_vowel(ch) {
            if seen == vowel_index {
                output.push(STRESS_MARK);
            }
            seen += 1;
        }
    }

    output
}

fn strip_stress_marks(word: &str) -> String {
    word.chars()
        .filter(|c| !matches!(c, '\u{0300}' | '\u{0301}'))
        .collect()
}

/// Nearest preceding word token, looking across whitespace only; punctuation
/// breaks adjacency.
fn preceding_word(tokens: &[Token], index: usize) -> Option<&str> {
    for token in tokens[..index].iter().rev() {
        match token.kind {
            TokenKind::Whitespace => continue,
            TokenKind::Word => return Some(token.text.as_str()),
            TokenKind::Punctuation => return None,
        }
    }
    None
}

/// Narrow homograph candidates by the case a preceding preposition governs;
/// whatever remains ambiguous falls back to dictionary order.
fn disambiguate<'a>(
    candidates: &'a [StressCandidate],
    previous: Option<&str>,
) -> &'a StressCandidate {
    if let Some(previous) = previous {
        if let Some(cases) = preposition_cases(&normalize_word(previous)) {
            let mut narrowed = candidates
                .iter()
                .filter(|c| c.tags.iter().any(|tag| cases.contains(tag)));
            if let Some(first) = narrowed.next() {
                return first;
            }
        }
    }
    &candidates[0]
}

fn preposition_cases(word: &str) -> Option<&'static [GramCase]> {
    PREPOSITION_CASES
        .iter()
        .find(|(preposition, _)| *preposition == word)
        .map(|(_, cases)| *cases)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PenultimatePredictor;

    impl StressPredictorPort for PenultimatePredictor {
        fn predict(&self, word: &str) -> Option<usize> {
            let vowels = vowel_count(word);
            (vowels >= 2).then(|| vowels - 2)
        }
    }

    fn resolver() -> StressResolver {
        StressResolver::new(Arc::new(StressDictionary::bundled().unwrap()))
    }

    fn resolver_with_predictor() -> StressResolver {
        resolver().with_predictor(Arc::new(PenultimatePredictor))
    }

    fn stress_marks(text: &str) -> usize {
        text.chars().filter(|&c| c == STRESS_MARK).count()
    }

    #[test]
    fn test_unique_candidate_marked_in_both_modes() {
        for mode in [StressMode::Dictionary, StressMode::Model] {
            let output = resolver_with_predictor().resolve("звати", mode);
            assert_eq!(output, "зва\u{301}ти", "mode {:?}", mode);
        }
    }

    #[test]
    fn test_single_vowel_word_unchanged() {
        assert_eq!(resolver().resolve("як", StressMode::Dictionary), "як");
    }

    #[test]
    fn test_no_vowel_token_unchanged() {
        assert_eq!(resolver().resolve("...", StressMode::Dictionary), "...");
    }

    #[test]
    fn test_unknown_word_unresolved_in_dictionary_mode() {
        let output = resolver().resolve("абракадабра", StressMode::Dictionary);
        // degraded case: emitted without a mark, distinguishable from a
        // resolved word
        assert_eq!(output, "абракадабра");
        assert_eq!(stress_marks(&output), 0);
    }

    #[test]
    fn test_unknown_word_predicted_in_model_mode() {
        let output = resolver_with_predictor().resolve("абракадабра", StressMode::Model);
        assert_eq!(stress_marks(&output), 1);
        // penultimate of а-а-а-а-а
        assert_eq!(output, "абракада\u{301}бра");
    }

    #[test]
    fn test_model_mode_without_predictor_degrades() {
        let output = resolver().resolve("абракадабра", StressMode::Model);
        assert_eq!(output, "абракадабра");
    }

    #[test]
    fn test_override_bypasses_lookup() {
        // word absent from the dictionary; the override alone decides
        let output = resolver().resolve("гр+инкль", StressMode::Dictionary);
        assert_eq!(output, "гри\u{301}нкль");
    }

    #[test]
    fn test_override_wins_over_dictionary() {
        // dictionary says приві́т; the override forces the first vowel
        let output = resolver().resolve("пр+ивіт", StressMode::Dictionary);
        assert_eq!(output, "при\u{301}віт");
    }

    #[test]
    fn test_first_override_marker_wins() {
        let output = resolver().resolve("св+о+є", StressMode::Dictionary);
        assert_eq!(output, "сво\u{301}є");
    }

    #[test]
    fn test_stray_marker_stripped_and_resolution_continues() {
        let output = resolver().resolve("привіт+", StressMode::Dictionary);
        assert_eq!(output, "приві\u{301}т");
    }

    #[test]
    fn test_homograph_tie_break_is_first_candidate() {
        let output = resolver().resolve("замок", StressMode::Dictionary);
        assert_eq!(output, "за\u{301}мок");
    }

    #[test]
    fn test_homograph_narrowed_by_preposition() {
        // "до" governs the genitive: руки́, not ру́ки
        let output = resolver().resolve("до руки", StressMode::Dictionary);
        assert_eq!(output, "до руки\u{301}");
    }

    #[test]
    fn test_homograph_without_context_uses_dictionary_order() {
        let output = resolver().resolve("руки", StressMode::Dictionary);
        assert_eq!(output, "ру\u{301}ки");
    }

    #[test]
    fn test_punctuation_breaks_adjacency() {
        // the preposition is separated by a comma, so no narrowing applies
        let output = resolver().resolve("до, руки", StressMode::Dictionary);
        assert_eq!(output, "до, ру\u{301}ки");
    }

    #[test]
    fn test_token_count_preserved() {
        let input = "Привіт, як тебе звати?";
        let output = resolver().resolve(input, StressMode::Dictionary);
        assert_eq!(tokenize(&output).len(), tokenize(input).len());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let a = resolver().resolve("Привіт, як тебе звати?", StressMode::Dictionary);
        let b = resolver().resolve("Привіт, як тебе звати?", StressMode::Dictionary);
        assert_eq!(a, b);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let resolver = resolver_with_predictor();
        for mode in [StressMode::Dictionary, StressMode::Model] {
            let once = resolver.resolve("Привіт, як тебе звати?", mode);
            let twice = resolver.resolve(&once, mode);
            assert_eq!(once, twice, "mode {:?}", mode);
        }
    }

    #[test]
    fn test_already_marked_known_word_not_double_marked() {
        let output = resolver().resolve("приві\u{301}т", StressMode::Dictionary);
        assert_eq!(output, "приві\u{301}т");
        assert_eq!(stress_marks(&output), 1);
    }

    #[test]
    fn test_every_multi_vowel_word_marked_once() {
        let output = resolver().resolve("Привіт, як тебе звати?", StressMode::Dictionary);
        for token in tokenize(&output) {
            if token.kind == TokenKind::Word && vowel_count(&token.text) >= 2 {
                assert_eq!(stress_marks(&token.text), 1, "word {}", token.text);
            }
        }
    }

    #[test]
    fn test_uppercase_word_resolved() {
        let output = resolver().resolve("ПРИВІТ", StressMode::Dictionary);
        assert_eq!(output, "ПРИВІ\u{301}Т");
    }
}
