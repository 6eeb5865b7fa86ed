use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::analysis::nlp::NlpError;

/// Structured error body: `{error, code, diagnostic}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorObject {
    pub error: String,
    pub code: &'static str,
    pub diagnostic: Option<String>,
}

/// Failure of a single analysis. No partial result accompanies either variant.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("NLP engine unavailable during {stage}")]
    DependencyUnavailable {
        stage: &'static str,
        #[source]
        source: NlpError,
    },
}

impl AnalysisError {
    pub fn dependency(stage: &'static str, source: NlpError) -> Self {
        AnalysisError::DependencyUnavailable { stage, source }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::Input(_) => "INPUT_ERROR",
            AnalysisError::DependencyUnavailable { .. } => "DEPENDENCY_UNAVAILABLE",
        }
    }

    pub fn error_object(&self) -> ErrorObject {
        let diagnostic = match self {
            AnalysisError::Input(_) => None,
            AnalysisError::DependencyUnavailable { source, .. } => Some(source.to_string()),
        };
        ErrorObject {
            error: self.to_string(),
            code: self.code(),
            diagnostic,
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorObject {
                    error: msg.clone(),
                    code: "INPUT_ERROR",
                    diagnostic: None,
                },
            ),
            AppError::Analysis(e @ AnalysisError::Input(_)) => {
                (StatusCode::BAD_REQUEST, e.error_object())
            }
            AppError::Analysis(e @ AnalysisError::DependencyUnavailable { .. }) => {
                tracing::error!("Analysis dependency failure: {e:?}");
                (StatusCode::SERVICE_UNAVAILABLE, e.error_object())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorObject {
                        error: "An internal server error occurred".to_string(),
                        code: "INTERNAL_ERROR",
                        diagnostic: Some(e.to_string()),
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_object_has_no_diagnostic() {
        let obj = AnalysisError::Input("resume text is empty".to_string()).error_object();
        assert_eq!(obj.code, "INPUT_ERROR");
        assert_eq!(obj.error, "Invalid input: resume text is empty");
        assert!(obj.diagnostic.is_none());
    }

    #[test]
    fn test_dependency_error_object_carries_cause() {
        let err = AnalysisError::dependency(
            "document processing",
            NlpError::InputTooLong { len: 10, max: 5 },
        );
        let obj = err.error_object();
        assert_eq!(obj.code, "DEPENDENCY_UNAVAILABLE");
        assert_eq!(obj.error, "NLP engine unavailable during document processing");
        assert_eq!(
            obj.diagnostic.as_deref(),
            Some("input of 10 characters exceeds the engine limit of 5")
        );
    }

    #[test]
    fn test_status_codes() {
        let resp = AppError::Validation("bad".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::from(AnalysisError::Input("empty".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::from(AnalysisError::dependency(
            "skill extraction",
            NlpError::Engine("down".to_string()),
        ))
        .into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let resp = AppError::from(anyhow::anyhow!("boom")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
