// src/error.rs
//! Failure categories of a résumé analysis round trip

use thiserror::Error;

/// Message shown in the error region when the server answers with a non-2xx status
pub const SERVER_ERROR_MESSAGE: &str = "Error analyzing resume";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Transport failure, or the résumé could not be read before sending
    #[error("{0}")]
    Network(String),

    /// Server answered, but not with a success status. The body is not surfaced.
    #[error("Error analyzing resume")]
    Server { status: u16 },

    /// Success status with a body that is not an analysis result
    #[error("{0}")]
    Parse(String),
}

impl AnalysisError {
    pub fn status(&self) -> Option<u16> {
        match self {
            AnalysisError::Server { status } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Network(_) => "network",
            AnalysisError::Server { .. } => "server",
            AnalysisError::Parse(_) => "parse",
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AnalysisError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            AnalysisError::Server {
                status: status.as_u16(),
            }
        } else {
            AnalysisError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Parse(err.to_string())
    }
}
