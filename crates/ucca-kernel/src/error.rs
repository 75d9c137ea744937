//! Error types for UCCA identification.

use crate::id::{Action, Controller};
use serde::{Deserialize, Serialize};

/// A single inconsistency found while validating an authority tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthorityViolation {
    /// A controller is authorized for an action that has no properties.
    UndeclaredAction {
        controller: Controller,
        action: Action,
    },

    /// An action has properties but no controller is authorized for it.
    UnauthorizedAction { action: Action },
}

impl std::fmt::Display for AuthorityViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndeclaredAction { controller, action } => write!(
                f,
                "No action properties provided for {action}, but was given in controller {controller}."
            ),
            Self::UnauthorizedAction { action } => {
                write!(f, "No controller defines action {action}")
            }
        }
    }
}

/// An authority tuple failed validation.
///
/// Holds every violation from both validation passes, in discovery order.
/// The message is the newline-joined list of violation messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", render_lines(.violations))]
pub struct ValidationError {
    pub violations: Vec<AuthorityViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<AuthorityViolation>) -> Self {
        Self { violations }
    }

    /// Rendered violation messages, one per violation.
    pub fn lines(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

fn render_lines(violations: &[AuthorityViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors from fallible UCCA kernel operations.
#[derive(Debug, thiserror::Error)]
pub enum UccaError {
    /// The authority tuple is internally inconsistent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// An authority document is malformed.
    #[error("invalid authority document: {0}")]
    InvalidDocument(String),

    /// Storage or I/O failure.
    #[error("storage error: {0}")]
    Storage(String),
}
