//! Error types for the transpiler core.
//!
//! Every failure surfaces as a [`TranspileError`]; [`TranspileError::kind`]
//! gives the stable, serialisable category used by the JSON boundary.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranspileError {
    /// Neither an `interface <Name>` nor a `contract <Name>` declaration was found.
    #[error("no interface or contract declaration found")]
    NoDeclarationFound,

    /// A parameter segment without a discoverable name. Reported, never fatal.
    #[error("malformed parameter `{segment}`: expected a type followed by a name")]
    MalformedParameter { segment: String },

    #[error("grammar error: {0}")]
    Grammar(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    NoDeclarationFound,
    MalformedParameter,
    Grammar,
}

impl TranspileError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranspileError::NoDeclarationFound => ErrorKind::NoDeclarationFound,
            TranspileError::MalformedParameter { .. } => ErrorKind::MalformedParameter,
            TranspileError::Grammar(_) => ErrorKind::Grammar,
        }
    }
}

pub type Result<T> = std::result::Result<T, TranspileError>;
