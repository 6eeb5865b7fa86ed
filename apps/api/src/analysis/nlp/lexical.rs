//! Rule-based English engine: UAX #29 word segmentation, suffix-stripping
//! lemmatizer and signed feature-hashed document vectors.

use unicode_segmentation::UnicodeSegmentation;

use super::stopwords::is_stop_word;
use super::{Doc, NlpEngine, NlpError, Token};

/// Widest hashed vector the engine accepts.
pub const MAX_VECTOR_DIMS: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Width of the hashed document vector. `0` disables vectors entirely,
    /// which sends every similarity check down the lexical-overlap path.
    pub vector_dims: usize,
    /// Longest input (in characters) a single `process` call accepts.
    pub max_input_chars: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vector_dims: 300,
            max_input_chars: 1_000_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LexicalEngine {
    config: EngineConfig,
}

impl LexicalEngine {
    pub fn new(config: EngineConfig) -> Result<Self, NlpError> {
        if config.vector_dims > MAX_VECTOR_DIMS {
            return Err(NlpError::Init(format!(
                "vector_dims {} exceeds maximum of {MAX_VECTOR_DIMS}",
                config.vector_dims
            )));
        }
        if config.max_input_chars == 0 {
            return Err(NlpError::Init("max_input_chars must be positive".to_string()));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split_word_bounds()
            .filter(|piece| !piece.chars().all(char::is_whitespace))
            .map(|piece| {
                let lower = piece.to_lowercase();
                let is_punct = !piece.chars().any(char::is_alphanumeric);
                let lemma = if is_punct {
                    lower.clone()
                } else {
                    lemmatize(&lower)
                };
                Token {
                    text: piece.to_string(),
                    is_stop: !is_punct && is_stop_word(&lower),
                    is_punct,
                    lemma,
                }
            })
            .collect()
    }

    /// Mean of signed one-hot lemma hashes over content tokens.
    fn vectorize(&self, tokens: &[Token]) -> Option<Vec<f32>> {
        let dims = self.config.vector_dims;
        if dims == 0 {
            return None;
        }

        let mut vector = vec![0.0_f32; dims];
        let mut count = 0usize;
        for token in tokens.iter().filter(|t| t.is_content()) {
            let hash = fnv1a(token.lemma.as_bytes());
            let idx = (hash % dims as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[idx] += sign;
            count += 1;
        }

        if count == 0 {
            return None;
        }
        let scale = 1.0 / count as f32;
        vector.iter_mut().for_each(|x| *x *= scale);
        Some(vector)
    }
}

impl NlpEngine for LexicalEngine {
    fn name(&self) -> &'static str {
        "lexical"
    }

    fn process(&self, text: &str) -> Result<Doc, NlpError> {
        let len = text.chars().count();
        if len > self.config.max_input_chars {
            return Err(NlpError::InputTooLong {
                len,
                max: self.config.max_input_chars,
            });
        }

        let tokens = self.tokenize(text);
        let vector = self.vectorize(&tokens);
        Ok(Doc::new(tokens, vector))
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(PRIME)
    })
}

const IRREGULAR: &[(&str, &str)] = &[
    ("was", "be"),
    ("were", "be"),
    ("is", "be"),
    ("are", "be"),
    ("been", "be"),
    ("has", "have"),
    ("had", "have"),
    ("did", "do"),
    ("does", "do"),
    ("built", "build"),
    ("led", "lead"),
    ("ran", "run"),
    ("wrote", "write"),
    ("written", "write"),
    ("taught", "teach"),
    ("made", "make"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("began", "begin"),
    ("begun", "begin"),
    ("children", "child"),
    ("people", "person"),
    ("data", "data"),
];

/// Nouns whose `-ing` / `-ed` ending is not an inflection.
const UNINFLECTED: &[&str] = &[
    "accounting", "advertising", "anything", "banking", "building", "ceiling", "clothing",
    "during", "engineering", "evening", "everything", "funding", "hundred", "housing",
    "learning", "lending", "marketing", "mining", "modeling", "modelling", "morning",
    "nothing", "offering", "pricing", "prototyping", "something", "spring", "string",
    "trading", "training", "wireframing",
];

/// Suffix-stripping lemmatizer for lowercase English words.
///
/// Handles the common inflections (plural `-s`/`-es`/`-ies`, `-ing`, `-ed`)
/// and a small irregular table. `-ing` / `-ed` nouns listed in [`UNINFLECTED`]
/// keep their form. Words containing digits are left alone.
pub fn lemmatize(lower: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR.iter().find(|(form, _)| *form == lower) {
        return (*lemma).to_string();
    }
    if !lower.is_ascii() || lower.chars().any(|c| c.is_ascii_digit()) {
        return lower.to_string();
    }

    let len = lower.len();
    if lower.ends_with("ies") && len > 4 {
        return format!("{}y", &lower[..len - 3]);
    }
    if lower.ends_with("es") && len > 3 {
        let stem = &lower[..len - 2];
        if stem.ends_with("ss")
            || stem.ends_with("sh")
            || stem.ends_with("ch")
            || stem.ends_with('x')
            || stem.ends_with('o')
        {
            return stem.to_string();
        }
    }
    if lower.ends_with('s')
        && len > 2
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("sis")
    {
        return lower[..len - 1].to_string();
    }
    if UNINFLECTED.contains(&lower) || lower.ends_with("eed") {
        return lower.to_string();
    }
    if lower.ends_with("ing") && len > 5 {
        return strip_verb_suffix(lower, 3);
    }
    if lower.ends_with("ed") && len > 4 {
        if lower.ends_with("ied") {
            return format!("{}y", &lower[..len - 3]);
        }
        return strip_verb_suffix(lower, 2);
    }

    lower.to_string()
}

/// Drops `-ing` / `-ed` when the remaining stem has a vowel, then undoubles a
/// final consonant (`runn`) or restores a silent `e` (`cod` -> `code`).
fn strip_verb_suffix(lower: &str, suffix_len: usize) -> String {
    let stem = &lower[..lower.len() - suffix_len];
    if !has_vowel(stem) {
        return lower.to_string();
    }

    let undoubled = undouble(stem);
    if undoubled.len() < stem.len() {
        return undoubled;
    }
    if measure(stem) == 1 && ends_cvc(stem) {
        return format!("{stem}e");
    }
    stem.to_string()
}

/// `y` is a vowel only after a consonant.
fn is_consonant(bytes: &[u8], i: usize) -> bool {
    match bytes[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(bytes, i - 1),
        _ => true,
    }
}

fn has_vowel(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    (0..bytes.len()).any(|i| !is_consonant(bytes, i))
}

/// Number of vowel-consonant runs: `tree` 0, `trad` 1, `develop` 2.
fn measure(stem: &str) -> usize {
    let bytes = stem.as_bytes();
    (1..bytes.len())
        .filter(|&i| !is_consonant(bytes, i - 1) && is_consonant(bytes, i))
        .count()
}

/// Consonant-vowel-consonant ending, last letter not `w`, `x` or `y`.
fn ends_cvc(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    n >= 3
        && is_consonant(bytes, n - 3)
        && !is_consonant(bytes, n - 2)
        && is_consonant(bytes, n - 1)
        && !matches!(bytes[n - 1], b'w' | b'x' | b'y')
}

/// `runn` -> `run`, `programm` -> `program`.
fn undouble(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1] == bytes[n - 2] && !matches!(bytes[n - 1], b'l' | b's' | b'z') {
        return stem[..n - 1].to_string();
    }
    stem.to_string()
}
