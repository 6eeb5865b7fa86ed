//! Async seam between the HTTP layer and the synchronous pipeline.
//!
//! `AppState` holds an `Arc<dyn MatchAnalyzer>`, so handlers never depend on
//! the concrete pipeline and tests can substitute their own.

use anyhow::Context;
use async_trait::async_trait;

use crate::analysis::pipeline::{AnalysisResult, Analyzer};
use crate::errors::AppError;

#[async_trait]
pub trait MatchAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        resume_text: String,
        job_description: String,
    ) -> Result<AnalysisResult, AppError>;

    /// Backend name, for logs.
    fn backend(&self) -> &'static str;
}

/// Runs [`Analyzer`] on tokio's blocking pool, one task per request.
pub struct PipelineAnalyzer {
    analyzer: Analyzer,
}

impl PipelineAnalyzer {
    pub fn new(analyzer: Analyzer) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl MatchAnalyzer for PipelineAnalyzer {
    async fn analyze(
        &self,
        resume_text: String,
        job_description: String,
    ) -> Result<AnalysisResult, AppError> {
        let analyzer = self.analyzer.clone();
        let result = tokio::task::spawn_blocking(move || {
            analyzer.analyze(&resume_text, &job_description)
        })
        .await
        .context("analysis task failed to complete")??;
        Ok(result)
    }

    fn backend(&self) -> &'static str {
        self.analyzer.engine().name()
    }
}
