use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    VersesUnavailable,
    ReflectionNotConfigured,
    ReflectionUnavailable,
}

impl ErrorCode {
    pub fn user_message(self) -> &'static str {
        match self {
            Self::VersesUnavailable => locale::VERSES_UNAVAILABLE,
            Self::ReflectionNotConfigured => locale::REFLECTION_NOT_CONFIGURED,
            Self::ReflectionUnavailable => locale::REFLECTION_UNAVAILABLE,
        }
    }
}

/// Failure as shown to the user. Never carries technical detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct UserError {
    pub code: ErrorCode,
    pub message: String,
}

impl UserError {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.user_message().to_string(),
        }
    }
}

impl From<ErrorCode> for UserError {
    fn from(value: ErrorCode) -> Self {
        Self::new(value)
    }
}
