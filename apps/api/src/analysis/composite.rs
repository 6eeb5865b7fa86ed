//! Composite Scorer: weighted blend of the match components plus a bounded
//! random perturbation.
//!
//! The perturbation comes from an injected [`NoiseSource`]; nothing here reads a
//! global RNG. Use [`JitterPolicy::Disabled`] or [`JitterPolicy::Seeded`] for
//! reproducible scores.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::nlp::{Doc, NlpEngine};

// ────────────────────────────────────────────────────────────────────────────
// Weights
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub semantic: f64,
    pub keyword: f64,
    pub experience: f64,
    pub skills: f64,
    pub domain: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            semantic: 0.25,
            keyword: 0.25,
            experience: 0.20,
            skills: 0.15,
            domain: 0.15,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.semantic + self.keyword + self.experience + self.skills + self.domain
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Perturbation
// ────────────────────────────────────────────────────────────────────────────

/// Source of the additive perturbation applied to the composite score.
pub trait NoiseSource {
    /// One sample, in score points.
    fn sample(&mut self) -> f64;
}

/// Always zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNoise;

impl NoiseSource for NoNoise {
    fn sample(&mut self) -> f64 {
        0.0
    }
}

/// Uniform samples in `[-amplitude, amplitude]`.
#[derive(Debug, Clone)]
pub struct UniformNoise {
    rng: ChaCha20Rng,
    amplitude: f64,
}

impl UniformNoise {
    pub const DEFAULT_AMPLITUDE: f64 = 1.0;

    pub fn new(rng: ChaCha20Rng, amplitude: f64) -> Self {
        Self {
            rng,
            amplitude: amplitude.abs(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed), Self::DEFAULT_AMPLITUDE)
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha20Rng::from_entropy(), Self::DEFAULT_AMPLITUDE)
    }
}

impl NoiseSource for UniformNoise {
    fn sample(&mut self) -> f64 {
        self.rng.gen_range(-self.amplitude..=self.amplitude)
    }
}

/// How each analysis obtains its noise source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JitterPolicy {
    Disabled,
    /// A fresh generator from the same seed per analysis: identical inputs
    /// produce identical scores.
    Seeded(u64),
    Entropy,
}

impl JitterPolicy {
    pub fn noise_source(&self) -> Box<dyn NoiseSource + Send> {
        match self {
            JitterPolicy::Disabled => Box::new(NoNoise),
            JitterPolicy::Seeded(seed) => Box::new(UniformNoise::seeded(*seed)),
            JitterPolicy::Entropy => Box::new(UniformNoise::from_entropy()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Components
// ────────────────────────────────────────────────────────────────────────────

/// Raw component values. Nominally in [0, 1]; `semantic`, `experience` and
/// `skills` come from cosine similarity and may be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreComponents {
    pub semantic: f64,
    pub keyword: f64,
    pub experience: f64,
    pub skills: f64,
    pub domain: f64,
}

impl ScoreComponents {
    /// Weighted sum on the 0–1 scale, before perturbation or clamping.
    pub fn weighted_sum(&self, weights: &ScoreWeights) -> f64 {
        weights.semantic * self.semantic
            + weights.keyword * self.keyword
            + weights.experience * self.experience
            + weights.skills * self.skills
            + weights.domain * self.domain
    }
}

/// Final 0–100 score: weighted sum scaled to points, perturbed, clamped and
/// rounded to one decimal.
pub fn final_score(
    components: &ScoreComponents,
    weights: &ScoreWeights,
    noise: &mut dyn NoiseSource,
) -> f64 {
    let points = components.weighted_sum(weights) * 100.0 + noise.sample();
    round1(points.clamp(0.0, 100.0))
}

/// Whole-document similarity; 0.0 unless both documents carry vectors.
pub fn semantic_similarity(engine: &dyn NlpEngine, resume: &Doc, job: &Doc) -> f64 {
    if resume.has_vector() && job.has_vector() {
        engine.similarity(resume, job)
    } else {
        0.0
    }
}

/// Share of job skills also found in the resume; 0.0 when the job lists none.
pub fn keyword_match(resume_skills: &[String], job_skills: &[String]) -> f64 {
    overlap_ratio(resume_skills, job_skills)
}

/// Share of job domain skills also found in the resume; 0.0 when the job lists none.
pub fn domain_match(resume_domain: &[String], job_domain: &[String]) -> f64 {
    overlap_ratio(resume_domain, job_domain)
}

fn overlap_ratio(resume: &[String], job: &[String]) -> f64 {
    let job: HashSet<String> = job.iter().map(|s| s.to_lowercase()).collect();
    if job.is_empty() {
        return 0.0;
    }
    let resume: HashSet<String> = resume.iter().map(|s| s.to_lowercase()).collect();
    resume.intersection(&job).count() as f64 / job.len() as f64
}

/// Job skills not present (case-insensitive) among the resume skills, in job order.
pub fn missing_skills(job_skills: &[String], resume_skills: &[String]) -> Vec<String> {
    let have: HashSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let mut seen = HashSet::new();
    job_skills
        .iter()
        .filter(|s| {
            let lower = s.to_lowercase();
            !have.contains(&lower) && seen.insert(lower)
        })
        .cloned()
        .collect()
}

/// 0–1 component as a reported 0–100 sub-score.
pub fn to_percent(value: f64) -> f64 {
    round1((value * 100.0).clamp(0.0, 100.0))
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    struct Fixed(f64);

    impl NoiseSource for Fixed {
        fn sample(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoreWeights::default();
        assert!((w.total() - 1.0).abs() < 1e-12, "Total was {}", w.total());
    }

    #[test]
    fn test_final_score_full_match() {
        let c = ScoreComponents {
            semantic: 1.0,
            keyword: 1.0,
            experience: 1.0,
            skills: 1.0,
            domain: 1.0,
        };
        assert_eq!(final_score(&c, &ScoreWeights::default(), &mut NoNoise), 100.0);
    }

    #[test]
    fn test_final_score_partial() {
        // 0.25*0.8 + 0.25*0.6 + 0.20*0.5 + 0.15*0.4 + 0.15*0.0 = 0.51
        let c = ScoreComponents {
            semantic: 0.8,
            keyword: 0.6,
            experience: 0.5,
            skills: 0.4,
            domain: 0.0,
        };
        let score = final_score(&c, &ScoreWeights::default(), &mut NoNoise);
        assert!((score - 51.0).abs() < 1e-9, "Score was {score}");
    }

    #[test]
    fn test_final_score_clamped_despite_noise() {
        let full = ScoreComponents {
            semantic: 1.0,
            keyword: 1.0,
            experience: 1.0,
            skills: 1.0,
            domain: 1.0,
        };
        assert_eq!(final_score(&full, &ScoreWeights::default(), &mut Fixed(1.0)), 100.0);

        let negative = ScoreComponents {
            semantic: -0.5,
            experience: -0.5,
            ..ScoreComponents::default()
        };
        assert_eq!(final_score(&negative, &ScoreWeights::default(), &mut Fixed(-1.0)), 0.0);
    }

    #[test]
    fn test_uniform_noise_stays_in_range() {
        let mut noise = UniformNoise::seeded(7);
        for _ in 0..1_000 {
            let x = noise.sample();
            assert!((-1.0..=1.0).contains(&x), "Sample was {x}");
        }
    }

    #[test]
    fn test_seeded_policy_is_reproducible() {
        let policy = JitterPolicy::Seeded(42);
        let a = policy.noise_source().sample();
        let b = policy.noise_source().sample();
        assert_eq!(a, b);
    }

    #[test]
    fn test_disabled_policy_is_zero() {
        assert_eq!(JitterPolicy::Disabled.noise_source().sample(), 0.0);
    }

    #[test]
    fn test_keyword_match_ratio() {
        let resume = skills(&["python", "django", "rest", "rest api"]);
        let job = skills(&["python", "django", "aws"]);
        let ratio = keyword_match(&resume, &job);
        assert!((ratio - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(to_percent(ratio), 66.7);
    }

    #[test]
    fn test_empty_job_skills_match_zero() {
        let resume = skills(&["python"]);
        assert_eq!(keyword_match(&resume, &[]), 0.0);
        assert_eq!(domain_match(&resume, &[]), 0.0);
    }

    #[test]
    fn test_missing_skills_keep_job_order_and_ignore_case() {
        let job = skills(&["aws", "Python", "docker", "aws"]);
        let resume = skills(&["python"]);
        assert_eq!(missing_skills(&job, &resume), skills(&["aws", "docker"]));
    }

    #[test]
    fn test_to_percent_clamps_and_rounds() {
        assert_eq!(to_percent(-0.2), 0.0);
        assert_eq!(to_percent(1.3), 100.0);
        assert_eq!(to_percent(0.12345), 12.3);
    }
}
