//! Suggestion Generator: short, ordered improvement advice.

use serde::{Deserialize, Serialize};

use crate::analysis::sections::{SectionName, Sections};

/// Upper bound on returned suggestions.
pub const MAX_SUGGESTIONS: usize = 5;

const EXPERIENCE_MIN_WORDS: usize = 100;
const SKILLS_MIN_WORDS: usize = 50;
const LISTED_MISSING_SKILLS: usize = 3;

/// Coarse reading of the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// Below 40.
    Low,
    /// 40 up to (not including) 70.
    Partial,
    Strong,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score < 40.0 {
            ScoreBand::Low
        } else if score < 70.0 {
            ScoreBand::Partial
        } else {
            ScoreBand::Strong
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            ScoreBand::Low => {
                "Your resume needs significant improvements to match this job description."
            }
            ScoreBand::Partial => {
                "Your resume partially matches the job requirements but could be improved."
            }
            ScoreBand::Strong => {
                "Your resume matches well with the job description with some minor gaps."
            }
        }
    }
}

/// Builds at most [`MAX_SUGGESTIONS`] suggestions; never empty.
pub fn suggest(missing_skills: &[String], sections: &Sections, score: f64) -> Vec<String> {
    let mut out = vec![ScoreBand::from_score(score).headline().to_string()];

    if !missing_skills.is_empty() {
        out.push(missing_skills_advice(missing_skills));
    }

    match sections.get(SectionName::Experience) {
        Some(section) if section.word_count() < EXPERIENCE_MIN_WORDS => out.push(
            "Expand your work experience section with more details about your achievements and responsibilities."
                .to_string(),
        ),
        Some(_) => {}
        None => out.push("Add a detailed work experience section to your resume.".to_string()),
    }

    match sections.get(SectionName::Skills) {
        Some(section) if section.word_count() < SKILLS_MIN_WORDS => out.push(
            "Enhance your skills section with more specific technical and soft skills relevant to the position."
                .to_string(),
        ),
        Some(_) => {}
        None => out.push(
            "Add a dedicated skills section highlighting your technical expertise and soft skills."
                .to_string(),
        ),
    }

    out.push("Quantify your achievements with specific metrics and numbers where possible.".to_string());
    out.push(
        "Tailor your resume summary to highlight your most relevant experience for this specific role."
            .to_string(),
    );

    out.truncate(MAX_SUGGESTIONS);
    out
}

fn missing_skills_advice(missing: &[String]) -> String {
    if missing.len() <= LISTED_MISSING_SKILLS {
        format!("Add these missing skills to your resume: {}", missing.join(", "))
    } else {
        format!(
            "Consider adding these key missing skills: {} (and {} more)",
            missing[..LISTED_MISSING_SKILLS].join(", "),
            missing.len() - LISTED_MISSING_SKILLS
        )
    }
}
