//! Axum route handlers for the ATS analysis API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::pipeline::AnalysisResult;
use crate::analysis::sections::{segment, SectionName, Sections};
use crate::analysis::skills::{categorize_skills, extract_skills, FoundSkills, ALL_SKILLS};
use crate::errors::{AnalysisError, AppError};
use crate::extract::AppJson;
use crate::state::AppState;

/// Missing keywords echoed at the top level of an analyze response.
pub const MISSING_KEYWORDS_LIMIT: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub success: bool,
    pub result: AnalysisResult,
    pub missing_keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SectionsRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    pub section_names: Vec<SectionName>,
    pub sections: Sections,
}

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
    pub categorized: FoundSkills,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/analyze
///
/// Scores a resume against a job description and returns the full report.
pub async fn handle_analyze(
    State(state): State<AppState>,
    AppJson(request): AppJson<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let analysis_id = Uuid::new_v4();
    let result = state
        .analyzer
        .analyze(request.resume_text, request.job_description)
        .await?;

    info!(
        %analysis_id,
        backend = state.analyzer.backend(),
        jitter = ?state.config.jitter,
        score = result.score,
        "ATS analysis served"
    );

    let missing_keywords = result.missing_keywords(MISSING_KEYWORDS_LIMIT).to_vec();
    Ok(Json(AnalyzeResponse {
        analysis_id,
        analyzed_at: Utc::now(),
        success: true,
        result,
        missing_keywords,
    }))
}

/// POST /api/v1/ats/sections
///
/// Returns the segmented resume, for checking how headers were detected.
pub async fn handle_sections(
    AppJson(request): AppJson<SectionsRequest>,
) -> Result<Json<SectionsResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let sections = segment(&request.resume_text);
    Ok(Json(SectionsResponse {
        section_names: sections.names(),
        sections,
    }))
}

/// POST /api/v1/ats/skills
///
/// Extracts taxonomy skills from arbitrary text.
pub async fn handle_skills(
    State(state): State<AppState>,
    AppJson(request): AppJson<SkillsRequest>,
) -> Result<Json<SkillsResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let engine = state.engine.clone();
    let skills = tokio::task::spawn_blocking(move || {
        extract_skills(&request.text, engine.as_ref(), &ALL_SKILLS)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))?
    .map_err(|e| AnalysisError::dependency("skill extraction", e))?;

    Ok(Json(SkillsResponse {
        categorized: categorize_skills(&skills),
        skills,
    }))
}
