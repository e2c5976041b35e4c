//! Typed rejections produced by the vacation engine.
//!
//! Every rejection carries a machine-checkable `kind()` tag plus a
//! human-readable reason, so any adapter (REST, MCP tool caller, chat)
//! can decide whether to retry with corrected parameters or give up.

use actix_web::{HttpResponse, http::StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Start date after end date.
    #[error("{0}")]
    InvalidRange(String),

    /// Operation on a past date where forward-looking is required.
    #[error("{0}")]
    PastDate(String),

    /// Unrecognized request type.
    #[error("{0}")]
    InvalidKind(String),

    /// Referenced request/employee does not exist or does not belong to the caller.
    #[error("{0}")]
    NotFound(String),

    /// Storage-layer failure; never retried by the engine.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl EngineError {
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InvalidRange(_) => "invalid_range",
            EngineError::PastDate(_) => "past_date",
            EngineError::InvalidKind(_) => "invalid_kind",
            EngineError::NotFound(_) => "not_found",
            EngineError::Storage(_) => "storage",
        }
    }

    pub fn is_rejection(&self) -> bool {
        !matches!(self, EngineError::Storage(_))
    }
}

impl actix_web::ResponseError for EngineError {
    fn status_code(&self) -> StatusCode {
        match self {
            EngineError::InvalidRange(_)
            | EngineError::PastDate(_)
            | EngineError::InvalidKind(_) => StatusCode::BAD_REQUEST,
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Storage details stay in the logs, not the response body.
        let message = match self {
            EngineError::Storage(e) => {
                tracing::error!(error = %e, "Storage failure");
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "kind": self.kind(),
            "error": message,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable_tags() {
        assert_eq!(EngineError::InvalidRange(String::new()).kind(), "invalid_range");
        assert_eq!(EngineError::PastDate(String::new()).kind(), "past_date");
        assert_eq!(EngineError::InvalidKind(String::new()).kind(), "invalid_kind");
        assert_eq!(EngineError::NotFound(String::new()).kind(), "not_found");
    }

    #[test]
    fn storage_is_not_a_rejection() {
        assert!(EngineError::NotFound("x".into()).is_rejection());
        assert!(!EngineError::Storage(sqlx::Error::RowNotFound).is_rejection());
    }
}
