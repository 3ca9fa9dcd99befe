//! Text Preprocessing
//!
//! Normalization applied to request text before truncation and stress
//! resolution: whitespace runs collapse to a single space and non-breaking
//! spaces are folded, so the synthesis backend never sees layout artifacts.

/// Normalize raw request text.
pub fn preprocess_text(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.trim().chars() {
        if ch.is_whitespace() || ch == '\u{00A0}' {
            pending_space = !output.is_empty();
            continue;
        }
        if pending_space {
            output.push(' ');
            pending_space = false;
        }
        output.push(ch);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(preprocess_text("привіт   світ"), "привіт світ");
        assert_eq!(preprocess_text("перший\n\tдругий"), "перший другий");
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(preprocess_text("  привіт  "), "привіт");
    }

    #[test]
    fn test_non_breaking_space_folded() {
        assert_eq!(preprocess_text("привіт\u{00A0}світ"), "привіт світ");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(preprocess_text("Привіт, як тебе звати?"), "Привіт, як тебе звати?");
    }
}
