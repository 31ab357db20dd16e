//! Text normalization and tokenization.
//!
//! The index itself only deals in already normalized terms; this module is
//! the default way raw text becomes those terms.

/// Punctuation removed before tokenizing.
const STRIPPED: [char; 5] = ['.', ',', '!', '?', ':'];

/// Lowercase `text` and strip sentence punctuation.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !STRIPPED.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Normalize `text` and split it on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("This is a sample document."), "this is a sample document");
        assert_eq!(normalize("Hello, World! Ready? Go:"), "hello world ready go");
        assert_eq!(normalize("ÜBER"), "über");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("  Another document\twith sample words. "),
            vec!["another", "document", "with", "sample", "words"]
        );
        assert!(tokenize(" . , ").is_empty());
    }

    #[test]
    fn test_other_punctuation_is_kept() {
        assert_eq!(tokenize("rust-lang (2024)"), vec!["rust-lang", "(2024)"]);
    }
}
