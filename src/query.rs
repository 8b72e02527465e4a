//! Raw request text to lookup phrase.
//!
//! Text is lowercased, runs of whitespace collapse to one space, and the ends
//! are trimmed. Tokens written as `[word]` mark the word the caller wants
//! suggestions for; the first such token is the lookup phrase. Without a
//! marker, the whole normalized text is looked up.

use serde::Serialize;

/// Normalized request text plus the marked words found in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    /// Lowercased, whitespace-collapsed text.
    pub normalized: String,
    /// Bracket-marked words in order of appearance, brackets removed.
    pub missing_words: Vec<String>,
}

impl ParsedQuery {
    /// The phrase to embed, or `None` when the input was blank.
    pub fn lookup(&self) -> Option<&str> {
        self.missing_words
            .first()
            .map(String::as_str)
            .or_else(|| (!self.normalized.is_empty()).then_some(self.normalized.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.lookup().is_none()
    }
}

pub fn parse_query(raw: &str) -> ParsedQuery {
    let lowered = raw.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    let missing_words = tokens
        .iter()
        .filter_map(|token| token.strip_prefix('[')?.strip_suffix(']'))
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect();

    ParsedQuery {
        normalized: tokens.join(" "),
        missing_words,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let parsed = parse_query("  The   Quick\tBrown  ");
        assert_eq!(parsed.normalized, "the quick brown");
        assert!(parsed.missing_words.is_empty());
        assert_eq!(parsed.lookup(), Some("the quick brown"));
    }

    #[test]
    fn bracketed_word_is_the_lookup() {
        let parsed = parse_query("the [Kitten] sat on the [mat]");
        assert_eq!(parsed.missing_words, ["kitten", "mat"]);
        assert_eq!(parsed.lookup(), Some("kitten"));
    }

    #[test]
    fn partial_brackets_are_plain_words() {
        let parsed = parse_query("[open close]");
        assert!(parsed.missing_words.is_empty());
        assert_eq!(parsed.lookup(), Some("[open close]"));
    }

    #[test]
    fn empty_brackets_are_ignored() {
        let parsed = parse_query("a [] b");
        assert!(parsed.missing_words.is_empty());
        assert_eq!(parsed.lookup(), Some("a [] b"));
    }

    #[test]
    fn blank_input_has_no_lookup() {
        for raw in ["", "   ", "\t\n"] {
            let parsed = parse_query(raw);
            assert!(parsed.is_empty(), "{raw:?}");
            assert_eq!(parsed.lookup(), None);
        }
    }

    #[test]
    fn single_word() {
        assert_eq!(parse_query("Cat").lookup(), Some("cat"));
    }
}
