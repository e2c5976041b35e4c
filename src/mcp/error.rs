//! Conversions from the engine's typed rejections to MCP protocol errors.
//!
//! The machine-checkable kind rides along in the error data, so a
//! model-driven caller can decide whether to retry with corrected
//! parameters or give up.

use rmcp::ErrorData;
use rmcp::model::ErrorCode;

use crate::auth::AuthError;
use crate::error::EngineError;

impl From<EngineError> for ErrorData {
    fn from(err: EngineError) -> Self {
        if err.is_rejection() {
            Self::new(
                ErrorCode::INVALID_PARAMS,
                err.to_string(),
                Some(serde_json::json!({ "kind": err.kind() })),
            )
        } else {
            tracing::error!(error = %err, "Storage failure");
            Self::new(ErrorCode::INTERNAL_ERROR, "storage error", None)
        }
    }
}

impl From<AuthError> for ErrorData {
    fn from(err: AuthError) -> Self {
        ErrorData::new(
            ErrorCode::INVALID_REQUEST,
            err.to_string(),
            Some(serde_json::json!({ "kind": "unauthorized" })),
        )
    }
}
