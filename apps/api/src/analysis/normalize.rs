//! Text normalization shared by every matching stage.

/// Lowercases, replaces every non-alphanumeric, non-whitespace character with a
/// space, collapses whitespace runs and trims both ends.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            // punctuation and whitespace both collapse into a single separator
            pending_space = true;
        }
    }

    out
}

/// Whitespace-delimited word count, as used for section adequacy checks.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Built REST APIs, in Python!"), "built rest apis in python");
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(normalize("  a \t\n  b   c  "), "a b c");
    }

    #[test]
    fn test_punctuation_inside_tokens_becomes_space() {
        assert_eq!(normalize("node.js / C++"), "node js c");
        assert_eq!(normalize("ci/cd"), "ci cd");
    }

    #[test]
    fn test_underscore_is_not_alphanumeric() {
        assert_eq!(normalize("snake_case"), "snake case");
    }

    #[test]
    fn test_empty_and_punctuation_only_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("--- ... !!!"), "");
    }

    #[test]
    fn test_unicode_letters_are_kept() {
        assert_eq!(normalize("Résumé — Café"), "résumé café");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("one two\nthree   four"), 4);
        assert_eq!(word_count(""), 0);
    }
}
