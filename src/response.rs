//! JSON payloads of the transpile endpoint.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result, TranspileError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranspileRequest {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TranspileResponse {
    Success { success: bool, tact_code: String },
    Failure { success: bool, error: ErrorBody },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

impl TranspileResponse {
    pub fn success(tact_code: String) -> Self {
        TranspileResponse::Success {
            success: true,
            tact_code,
        }
    }

    pub fn failure(error: &TranspileError) -> Self {
        TranspileResponse::Failure {
            success: false,
            error: ErrorBody {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TranspileResponse::Success { .. })
    }
}

impl From<Result<String>> for TranspileResponse {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(tact_code) => TranspileResponse::success(tact_code),
            Err(err) => TranspileResponse::failure(&err),
        }
    }
}

/// Answers one transpile request.
pub fn handle(request: &TranspileRequest) -> TranspileResponse {
    crate::transpile(&request.code).into()
}
