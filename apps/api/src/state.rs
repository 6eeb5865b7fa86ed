use std::sync::Arc;

use anyhow::{Context, Result};

use crate::analysis::nlp::{LexicalEngine, NlpEngine};
use crate::analysis::pipeline::Analyzer;
use crate::analysis::service::{MatchAnalyzer, PipelineAnalyzer};
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Shared NLP engine. Stateless, so one handle serves every request.
    pub engine: Arc<dyn NlpEngine>,
    /// Pluggable analyzer. Default: the in-process pipeline on the blocking pool.
    pub analyzer: Arc<dyn MatchAnalyzer>,
}

impl AppState {
    /// Initializes the NLP engine and analyzer from config. Engine
    /// initialization failure is a startup error.
    pub fn from_config(config: Config) -> Result<Self> {
        let engine: Arc<dyn NlpEngine> = Arc::new(
            LexicalEngine::new(config.engine.clone())
                .context("NLP engine failed to initialize")?,
        );
        let analyzer = Analyzer::new(engine.clone()).with_jitter(config.jitter);

        Ok(AppState {
            config,
            engine,
            analyzer: Arc::new(PipelineAnalyzer::new(analyzer)),
        })
    }
}
