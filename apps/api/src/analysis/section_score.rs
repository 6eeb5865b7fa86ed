//! Section Scorer: similarity of one resume section to the full job description.

use std::collections::HashSet;

use crate::analysis::nlp::{NlpEngine, NlpError};
use crate::analysis::normalize::normalize;

/// Scores `section_text` against `job_text`.
///
/// Uses vector cosine similarity when both documents have vectors (the result
/// may be negative and is returned as-is). Otherwise falls back to the share of
/// job lemmas that also appear in the section. Empty input on either side is 0.
pub fn score_section(
    engine: &dyn NlpEngine,
    section_text: &str,
    job_text: &str,
) -> Result<f64, NlpError> {
    if section_text.trim().is_empty() || job_text.trim().is_empty() {
        return Ok(0.0);
    }

    let section_doc = engine.process(&normalize(section_text))?;
    let job_doc = engine.process(&normalize(job_text))?;

    if section_doc.has_vector() && job_doc.has_vector() {
        return Ok(engine.similarity(&section_doc, &job_doc));
    }

    let section_lemmas: HashSet<&str> = section_doc.content_lemmas().collect();
    let job_lemmas: HashSet<&str> = job_doc.content_lemmas().collect();
    if job_lemmas.is_empty() {
        return Ok(0.0);
    }

    let shared = section_lemmas.intersection(&job_lemmas).count();
    Ok(shared as f64 / job_lemmas.len() as f64)
}
