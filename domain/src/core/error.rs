//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Raised when a backend reply breaks the chat protocol contract or when a
/// caller builds a value object that the protocol cannot carry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Backend contract violation: {0}")]
    ContractViolation(String),

    #[error("Tool name cannot be empty")]
    EmptyToolName,

    #[error("Unknown clarification option '{option}' for phrase '{phrase}'")]
    UnknownOption { option: String, phrase: String },

    #[error("Invalid model hint {0:?}: only visible ASCII characters are allowed")]
    InvalidModelHint(String),
}

impl DomainError {
    /// Check if this error was caused by a malformed backend reply
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, DomainError::ContractViolation(_))
    }
}
