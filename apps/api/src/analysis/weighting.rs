//! Term Weighter: two-document TF-IDF over resume vs. job-description keywords.
//!
//! The corpus is exactly two documents, so `idf = ln(2 / (1 + df))` with
//! `df` in {1, 2}. This is not an estimate of corpus statistics; it only biases
//! scoring away from vocabulary both documents share.

use std::collections::{BTreeSet, HashMap};

use crate::analysis::nlp::Doc;

/// Lemma -> occurrence count for one document.
pub type KeywordFrequency = HashMap<String, u32>;

/// Word -> real-valued weight.
pub type TermWeightMap = HashMap<String, f64>;

/// Minimum surface length for a token to count as a keyword.
pub const MIN_KEYWORD_LEN: usize = 3;

const CORPUS_SIZE: f64 = 2.0;

/// Counts lemmas of content tokens whose surface text has at least `min_len` characters.
pub fn keyword_frequencies(doc: &Doc, min_len: usize) -> KeywordFrequency {
    let mut freqs = KeywordFrequency::new();
    for token in doc.tokens() {
        if token.is_content() && token.text.chars().count() >= min_len {
            *freqs.entry(token.lemma.clone()).or_insert(0) += 1;
        }
    }
    freqs
}

/// Raw count over document length; an empty document divides by 1.
pub fn term_frequencies(freqs: &KeywordFrequency, doc_len: usize) -> TermWeightMap {
    let denom = doc_len.max(1) as f64;
    freqs
        .iter()
        .map(|(word, count)| (word.clone(), f64::from(*count) / denom))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermWeights {
    pub resume: TermWeightMap,
    pub job: TermWeightMap,
}

impl TermWeights {
    /// Job terms absent from the resume, heaviest first (ties by word).
    pub fn job_only_terms(&self, resume_keywords: &KeywordFrequency) -> Vec<(&str, f64)> {
        let mut terms: Vec<(&str, f64)> = self
            .job
            .iter()
            .filter(|(word, _)| !resume_keywords.contains_key(*word))
            .map(|(word, weight)| (word.as_str(), *weight))
            .collect();
        terms.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms
    }
}

/// Weights every word of either keyword set for both documents.
///
/// Both output maps are keyed by the union of words; a document that lacks a
/// word gets tf = 0 for it.
pub fn weight(
    resume_keywords: &KeywordFrequency,
    job_keywords: &KeywordFrequency,
    resume_tf: &TermWeightMap,
    job_tf: &TermWeightMap,
) -> TermWeights {
    let all_words: BTreeSet<&String> = resume_keywords.keys().chain(job_keywords.keys()).collect();

    let mut weights = TermWeights::default();
    for word in all_words {
        let df = u8::from(resume_keywords.contains_key(word)) + u8::from(job_keywords.contains_key(word));
        let idf = (CORPUS_SIZE / (1.0 + f64::from(df))).ln();

        let resume_tf = resume_tf.get(word).copied().unwrap_or(0.0);
        let job_tf = job_tf.get(word).copied().unwrap_or(0.0);
        weights.resume.insert(word.clone(), resume_tf * idf);
        weights.job.insert(word.clone(), job_tf * idf);
    }
    weights
}
