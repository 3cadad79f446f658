// src/error.rs

//! Unified error handling for the curriculum library.

use std::fmt;

use thiserror::Error;

use crate::models::SectionId;

/// Result type alias for curriculum operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Section identifier outside the closed set
    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    /// Module declared in more than one chapter while duplicates are rejected
    #[error("Module '{module_id}' declared in both '{first}' and '{second}'")]
    DuplicateModule {
        module_id: String,
        first: SectionId,
        second: SectionId,
    },

    /// Problem input could not be turned into metadata
    #[error("Parse error for {input}: {message}")]
    Parse { input: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a parse error with the offending input.
    pub fn parse(input: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_module_message() {
        let err = AppError::DuplicateModule {
            module_id: "graphs".into(),
            first: SectionId::Beginner,
            second: SectionId::Advanced,
        };
        assert_eq!(
            err.to_string(),
            "Module 'graphs' declared in both 'beginner' and 'advanced'"
        );
    }

    #[test]
    fn test_parse_helper() {
        let err = AppError::parse("not a url", "missing scheme");
        assert_eq!(err.to_string(), "Parse error for not a url: missing scheme");
    }
}
