//! Orchestrates one resume ↔ job-description analysis.
//!
//! Every call builds its own intermediate state; only the NLP engine handle
//! and the skill taxonomy are shared. A call is synchronous and CPU-bound, so
//! async callers should run it on a blocking thread.

use std::sync::Arc;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::composite::{
    self, JitterPolicy, NoiseSource, ScoreComponents, ScoreWeights,
};
use crate::analysis::nlp::NlpEngine;
use crate::analysis::normalize::normalize;
use crate::analysis::section_score::score_section;
use crate::analysis::sections::{segment, SectionName};
use crate::analysis::skills::{categorize_skills, extract_skills, FoundSkills, ALL_SKILLS, DOMAIN_SKILLS};
use crate::analysis::suggestions::{suggest, ScoreBand};
use crate::analysis::weighting::{keyword_frequencies, term_frequencies, weight, MIN_KEYWORD_LEN};
use crate::errors::AnalysisError;

/// Job-only terms logged at debug level.
const LOGGED_TERMS: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Result model
// ────────────────────────────────────────────────────────────────────────────

/// Per-section 0–100 scores in segmentation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionScores {
    entries: Vec<(SectionName, f64)>,
}

impl SectionScores {
    pub fn get(&self, name: SectionName) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionName, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SectionScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, score) in &self.entries {
            map.serialize_entry(name.as_str(), score)?;
        }
        map.end()
    }
}

/// Everything a report needs. All scores are on the 0–100 scale, one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub score: f64,
    pub band: ScoreBand,
    pub section_scores: SectionScores,
    pub found_skills: FoundSkills,
    pub missing_skills: Vec<String>,
    pub semantic_similarity: f64,
    pub keyword_match: f64,
    pub domain_match: f64,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// The first `limit` missing skills, in job-description order.
    pub fn missing_keywords(&self, limit: usize) -> &[String] {
        &self.missing_skills[..self.missing_skills.len().min(limit)]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Analyzer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Analyzer {
    engine: Arc<dyn NlpEngine>,
    weights: ScoreWeights,
    jitter: JitterPolicy,
}

impl Analyzer {
    /// Default weights, perturbation drawn from OS entropy.
    pub fn new(engine: Arc<dyn NlpEngine>) -> Self {
        Self {
            engine,
            weights: ScoreWeights::default(),
            jitter: JitterPolicy::Entropy,
        }
    }

    pub fn with_jitter(mut self, jitter: JitterPolicy) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn engine(&self) -> &dyn NlpEngine {
        self.engine.as_ref()
    }

    pub fn jitter(&self) -> JitterPolicy {
        self.jitter
    }

    /// Runs the full pipeline with a noise source from the configured policy.
    pub fn analyze(&self, resume_text: &str, job_text: &str) -> Result<AnalysisResult, AnalysisError> {
        let mut noise = self.jitter.noise_source();
        self.analyze_with_noise(resume_text, job_text, noise.as_mut())
    }

    pub fn analyze_with_noise(
        &self,
        resume_text: &str,
        job_text: &str,
        noise: &mut dyn NoiseSource,
    ) -> Result<AnalysisResult, AnalysisError> {
        if resume_text.trim().is_empty() {
            return Err(AnalysisError::Input("resume text is empty".to_string()));
        }
        if job_text.trim().is_empty() {
            return Err(AnalysisError::Input("job description is empty".to_string()));
        }

        let engine = self.engine();

        let sections = segment(resume_text);
        debug!(sections = ?sections.names(), "Resume segmented");

        let resume_doc = engine
            .process(&normalize(resume_text))
            .map_err(|e| AnalysisError::dependency("document processing", e))?;
        let job_doc = engine
            .process(&normalize(job_text))
            .map_err(|e| AnalysisError::dependency("document processing", e))?;

        let resume_keywords = keyword_frequencies(&resume_doc, MIN_KEYWORD_LEN);
        let job_keywords = keyword_frequencies(&job_doc, MIN_KEYWORD_LEN);
        let term_weights = weight(
            &resume_keywords,
            &job_keywords,
            &term_frequencies(&resume_keywords, resume_doc.len()),
            &term_frequencies(&job_keywords, job_doc.len()),
        );
        if tracing::enabled!(tracing::Level::DEBUG) {
            let top: Vec<_> = term_weights
                .job_only_terms(&resume_keywords)
                .into_iter()
                .take(LOGGED_TERMS)
                .collect();
            debug!(terms = ?top, "Job-only terms");
        }

        let semantic = composite::semantic_similarity(engine, &resume_doc, &job_doc);

        let resume_skills = extract_skills(resume_text, engine, &ALL_SKILLS)
            .map_err(|e| AnalysisError::dependency("skill extraction", e))?;
        let job_skills = extract_skills(job_text, engine, &ALL_SKILLS)
            .map_err(|e| AnalysisError::dependency("skill extraction", e))?;
        debug!(resume = ?resume_skills, job = ?job_skills, "Skills extracted");

        let keyword = composite::keyword_match(&resume_skills, &job_skills);

        let mut raw_section_scores = Vec::with_capacity(sections.len());
        for section in sections.iter() {
            let score = match score_section(engine, &section.content, job_text) {
                Ok(score) => score,
                Err(e) => {
                    warn!(section = %section.name, error = %e, "Section scoring failed; using 0");
                    0.0
                }
            };
            raw_section_scores.push((section.name, score));
        }
        let raw_score_of = |name: SectionName| {
            raw_section_scores
                .iter()
                .find(|(n, _)| *n == name)
                .map_or(0.0, |(_, score)| *score)
        };

        let resume_domain = extract_skills(resume_text, engine, &DOMAIN_SKILLS)
            .map_err(|e| AnalysisError::dependency("skill extraction", e))?;
        let job_domain = extract_skills(job_text, engine, &DOMAIN_SKILLS)
            .map_err(|e| AnalysisError::dependency("skill extraction", e))?;
        let domain = composite::domain_match(&resume_domain, &job_domain);

        let components = ScoreComponents {
            semantic,
            keyword,
            experience: raw_score_of(SectionName::Experience),
            skills: raw_score_of(SectionName::Skills),
            domain,
        };
        let score = composite::final_score(&components, &self.weights, noise);

        let missing_skills = composite::missing_skills(&job_skills, &resume_skills);
        let suggestions = suggest(&missing_skills, &sections, score);

        info!(
            score,
            sections = sections.len(),
            resume_skills = resume_skills.len(),
            missing = missing_skills.len(),
            "Analysis complete"
        );

        Ok(AnalysisResult {
            score,
            band: ScoreBand::from_score(score),
            section_scores: SectionScores {
                entries: raw_section_scores
                    .into_iter()
                    .map(|(name, raw)| (name, composite::to_percent(raw)))
                    .collect(),
            },
            found_skills: categorize_skills(&resume_skills),
            missing_skills,
            semantic_similarity: composite::to_percent(semantic),
            keyword_match: composite::to_percent(keyword),
            domain_match: composite::to_percent(domain),
            suggestions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::composite::NoNoise;
    use crate::analysis::nlp::{Doc, EngineConfig, LexicalEngine, NlpError};

    const RESUME: &str =
        "EXPERIENCE\nBuilt REST APIs in Python and Django.\nEDUCATION\nBS Computer Science.";
    const JOB: &str = "Looking for a Python developer with Django and AWS experience.";

    fn analyzer() -> Analyzer {
        let engine = LexicalEngine::new(EngineConfig::default()).unwrap();
        Analyzer::new(Arc::new(engine)).with_jitter(JitterPolicy::Disabled)
    }

    /// Engine that fails every call.
    struct BrokenEngine;

    impl NlpEngine for BrokenEngine {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn process(&self, _text: &str) -> Result<Doc, NlpError> {
            Err(NlpError::Engine("model not loaded".to_string()))
        }
    }

    #[test]
    fn test_scenario_python_django_aws() {
        let result = analyzer().analyze(RESUME, JOB).unwrap();

        let names: Vec<_> = result.section_scores.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec![SectionName::Header, SectionName::Experience, SectionName::Education]
        );
        assert!(result.found_skills.contains_ignore_case("python"));
        assert!(result.found_skills.contains_ignore_case("django"));
        assert_eq!(result.missing_skills, vec!["aws".to_string()]);
        assert_eq!(result.keyword_match, 66.7);
        assert_eq!(result.domain_match, 0.0);
    }

    #[test]
    fn test_scores_are_bounded() {
        let result = analyzer().analyze(RESUME, JOB).unwrap();
        assert!((0.0..=100.0).contains(&result.score), "Score was {}", result.score);
        for (name, score) in result.section_scores.iter() {
            assert!((0.0..=100.0).contains(&score), "{name} scored {score}");
        }
        for sub in [result.semantic_similarity, result.keyword_match, result.domain_match] {
            assert!((0.0..=100.0).contains(&sub), "Sub-score was {sub}");
        }
    }

    #[test]
    fn test_missing_skills_disjoint_from_found() {
        let result = analyzer().analyze(RESUME, JOB).unwrap();
        for skill in &result.missing_skills {
            assert!(!result.found_skills.contains_ignore_case(skill), "{skill} is both");
        }
    }

    #[test]
    fn test_disabled_jitter_is_deterministic() {
        let a = analyzer().analyze(RESUME, JOB).unwrap();
        let b = analyzer().analyze(RESUME, JOB).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_jitter_is_deterministic_and_bounded() {
        let base = analyzer().analyze(RESUME, JOB).unwrap().score;
        let seeded = analyzer().with_jitter(JitterPolicy::Seeded(11));
        let a = seeded.analyze(RESUME, JOB).unwrap().score;
        let b = seeded.analyze(RESUME, JOB).unwrap().score;
        assert_eq!(a, b);
        assert!((a - base).abs() <= 1.1 + 1e-9, "Jittered {a} vs base {base}");
    }

    #[test]
    fn test_job_without_skills_scores_zero_keyword_and_domain() {
        let result = analyzer()
            .analyze(RESUME, "We want a friendly person who enjoys hard work.")
            .unwrap();
        assert_eq!(result.keyword_match, 0.0);
        assert_eq!(result.domain_match, 0.0);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_domain_match_counts_shared_domain_skills() {
        let result = analyzer()
            .analyze(
                "SKILLS\nMachine learning, statistics and Python.",
                "Seeking machine learning and healthcare experience.",
            )
            .unwrap();
        // job domain: machine learning, healthcare -> one of two covered
        assert_eq!(result.domain_match, 50.0);
    }

    #[test]
    fn test_related_nouns_do_not_satisfy_domain_skills() {
        let result = analyzer()
            .analyze(
                "EXPERIENCE\nAnalyzed stock markets for a bank.",
                "We need marketing and banking experience.",
            )
            .unwrap();
        assert_eq!(result.domain_match, 0.0);
        assert!(result.missing_skills.contains(&"banking".to_string()), "{:?}", result.missing_skills);
        assert!(result.missing_skills.contains(&"marketing".to_string()), "{:?}", result.missing_skills);
        assert!(!result.found_skills.contains_ignore_case("banking"));
        assert!(!result.found_skills.contains_ignore_case("marketing"));
    }

    #[test]
    fn test_empty_inputs_are_input_errors() {
        let err = analyzer().analyze("   ", JOB).unwrap_err();
        assert!(matches!(err, AnalysisError::Input(_)));
        let err = analyzer().analyze(RESUME, "").unwrap_err();
        assert!(matches!(err, AnalysisError::Input(_)));
    }

    #[test]
    fn test_engine_failure_is_dependency_error() {
        let analyzer = Analyzer::new(Arc::new(BrokenEngine)).with_jitter(JitterPolicy::Disabled);
        let err = analyzer.analyze(RESUME, JOB).unwrap_err();
        assert!(
            matches!(err, AnalysisError::DependencyUnavailable { stage: "document processing", .. }),
            "{err:?}"
        );
    }

    #[test]
    fn test_lexical_fallback_without_vectors() {
        let engine = LexicalEngine::new(EngineConfig {
            vector_dims: 0,
            ..EngineConfig::default()
        })
        .unwrap();
        let analyzer = Analyzer::new(Arc::new(engine)).with_jitter(JitterPolicy::Disabled);
        let result = analyzer.analyze(RESUME, JOB).unwrap();
        assert_eq!(result.semantic_similarity, 0.0);
        assert_eq!(result.keyword_match, 66.7);
        assert!(result.section_scores.get(SectionName::Experience).unwrap() > 0.0);
    }

    #[test]
    fn test_noise_is_applied_once() {
        struct Plus(f64);
        impl NoiseSource for Plus {
            fn sample(&mut self) -> f64 {
                self.0
            }
        }

        let a = analyzer();
        let plain = a.analyze_with_noise(RESUME, JOB, &mut NoNoise).unwrap().score;
        let shifted = a.analyze_with_noise(RESUME, JOB, &mut Plus(0.5)).unwrap().score;
        assert!((shifted - plain - 0.5).abs() <= 0.11, "{plain} -> {shifted}");
    }

    #[test]
    fn test_missing_keywords_truncates() {
        let mut result = analyzer().analyze(RESUME, JOB).unwrap();
        result.missing_skills = (0..15).map(|i| format!("skill{i}")).collect();
        assert_eq!(result.missing_keywords(10).len(), 10);
        assert_eq!(result.missing_keywords(10)[0], "skill0");
        assert_eq!(result.missing_keywords(100).len(), 15);
    }

    #[test]
    fn test_suggestions_bounded_and_non_empty() {
        let result = analyzer().analyze(RESUME, JOB).unwrap();
        assert!(!result.suggestions.is_empty());
        assert!(result.suggestions.len() <= 5);
    }

    #[test]
    fn test_result_serializes_with_snake_case_fields() {
        let result = analyzer().analyze(RESUME, JOB).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        for key in [
            "score",
            "band",
            "section_scores",
            "found_skills",
            "missing_skills",
            "semantic_similarity",
            "keyword_match",
            "domain_match",
            "suggestions",
        ] {
            assert!(json.get(key).is_some(), "missing field {key}");
        }
        assert!(json["section_scores"].get("experience").is_some());
        assert_eq!(json["found_skills"]["technical"]["programming_languages"][0], "python");
    }
}
