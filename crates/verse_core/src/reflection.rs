//! On-demand reflections for the current verse and the panel that shows them.

use genai_integration::{GenerationError, TextGenerator};
use shared::{
    domain::VerseRecord,
    error::{ErrorCode, UserError},
};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ReflectionError {
    #[error("reflection generation is not configured")]
    NotConfigured,
    #[error("reflection generation failed: {0}")]
    Unavailable(#[source] GenerationError),
}

impl ReflectionError {
    pub fn user_error(&self) -> UserError {
        match self {
            Self::NotConfigured => UserError::new(ErrorCode::ReflectionNotConfigured),
            Self::Unavailable(_) => UserError::new(ErrorCode::ReflectionUnavailable),
        }
    }
}

impl From<GenerationError> for ReflectionError {
    fn from(value: GenerationError) -> Self {
        if value.is_not_configured() {
            Self::NotConfigured
        } else {
            Self::Unavailable(value)
        }
    }
}

pub fn build_reflection_prompt(verse: &VerseRecord) -> String {
    format!(
        "Eres un guía espiritual cristiano, cercano y esperanzador. \
         Escribe en español una reflexión breve (dos o tres párrafos cortos) \
         sobre el siguiente versículo bíblico, aplicándolo a la vida diaria.\n\n\
         Versículo: \"{}\"\nReferencia: {}\n\n\
         Responde únicamente con el texto de la reflexión, sin títulos ni listas.",
        verse.text.trim(),
        verse.reference.trim()
    )
}

/// Each call may produce different text for the same verse.
pub async fn generate_reflection(
    generator: &dyn TextGenerator,
    verse: &VerseRecord,
) -> Result<String, ReflectionError> {
    let prompt = build_reflection_prompt(verse);
    generator
        .generate_text(&prompt)
        .await
        .map_err(ReflectionError::from)
        .inspect_err(|err| match err {
            ReflectionError::NotConfigured => {
                warn!(verse_id = %verse.id, "reflection requested without a configured API key")
            }
            ReflectionError::Unavailable(source) => {
                error!(verse_id = %verse.id, "error generating reflection: {source}")
            }
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectionOutcome {
    Text(String),
    Failed(UserError),
}

impl From<Result<String, ReflectionError>> for ReflectionOutcome {
    fn from(value: Result<String, ReflectionError>) -> Self {
        match value {
            Ok(text) => Self::Text(text),
            Err(err) => Self::Failed(err.user_error()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// First toggle: the caller must run generation and then `complete`.
    StartGeneration,
    /// A generation is already running; the control is disabled.
    Ignored,
    Shown,
    Hidden,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReflectionPanel {
    #[default]
    Idle,
    Generating,
    Ready {
        outcome: ReflectionOutcome,
        visible: bool,
    },
}

impl ReflectionPanel {
    pub fn toggle(&mut self) -> ToggleAction {
        match self {
            Self::Idle => {
                *self = Self::Generating;
                ToggleAction::StartGeneration
            }
            Self::Generating => ToggleAction::Ignored,
            Self::Ready { visible, .. } => {
                *visible = !*visible;
                if *visible {
                    ToggleAction::Shown
                } else {
                    ToggleAction::Hidden
                }
            }
        }
    }

    /// Stores the result of a generation. Ignored unless one is running.
    pub fn complete(&mut self, outcome: ReflectionOutcome) -> bool {
        if !matches!(self, Self::Generating) {
            return false;
        }
        *self = Self::Ready {
            outcome,
            visible: true,
        };
        true
    }

    pub fn is_generating(&self) -> bool {
        matches!(self, Self::Generating)
    }

    pub fn visible_outcome(&self) -> Option<&ReflectionOutcome> {
        match self {
            Self::Ready {
                outcome,
                visible: true,
            } => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/reflection_tests.rs"]
mod tests;
