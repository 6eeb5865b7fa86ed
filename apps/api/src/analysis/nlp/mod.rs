//! NLP engine seam: tokenization, lemmatization and document vectors.
//!
//! The scoring pipeline only talks to [`NlpEngine`]. The crate ships
//! [`LexicalEngine`], a rule-based English engine; statistical engines plug in
//! behind the same trait. Engines must be stateless (or internally
//! synchronized): one handle is shared by every concurrent analysis.

pub mod lexical;
pub mod stopwords;

use thiserror::Error;

pub use lexical::{EngineConfig, LexicalEngine};

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("NLP engine failed to initialize: {0}")]
    Init(String),

    #[error("input of {len} characters exceeds the engine limit of {max}")]
    InputTooLong { len: usize, max: usize },

    #[error("NLP engine error: {0}")]
    Engine(String),
}

/// A single token with the flags the matcher needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub is_stop: bool,
    pub is_punct: bool,
}

impl Token {
    /// Neither a stop word nor punctuation.
    pub fn is_content(&self) -> bool {
        !self.is_stop && !self.is_punct
    }
}

/// A processed document: tokens plus an optional whole-document vector.
#[derive(Debug, Clone, Default)]
pub struct Doc {
    tokens: Vec<Token>,
    vector: Option<Vec<f32>>,
}

impl Doc {
    pub fn new(tokens: Vec<Token>, vector: Option<Vec<f32>>) -> Self {
        Self { tokens, vector }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn has_vector(&self) -> bool {
        self.vector.is_some()
    }

    pub fn vector(&self) -> Option<&[f32]> {
        self.vector.as_deref()
    }

    /// Every token's lemma joined by single spaces.
    pub fn lemma_text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.lemma.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lemmas of content tokens, in document order.
    pub fn content_lemmas(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| t.is_content())
            .map(|t| t.lemma.as_str())
    }
}

pub trait NlpEngine: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Tokenizes, lemmatizes and (when the engine supports it) vectorizes `text`.
    fn process(&self, text: &str) -> Result<Doc, NlpError>;

    /// Cosine similarity of two document vectors; 0.0 if either has none.
    fn similarity(&self, a: &Doc, b: &Doc) -> f64 {
        match (a.vector(), b.vector()) {
            (Some(x), Some(y)) => cosine(x, y),
            _ => 0.0,
        }
    }
}

/// Cosine similarity in [-1, 1]. Zero-norm or mismatched vectors score 0.0.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
