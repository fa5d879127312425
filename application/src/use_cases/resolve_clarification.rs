//! Clarification resolver use case.
//!
//! Drives the choice round trip for a clarify outcome:
//!
//! ```text
//! Clarify ──▶ ClarificationChoice ──POST /memory/alias──▶ ack
//!                                         │
//!                                         └─ 409 (no force) ──▶ ResolveError::Conflict
//! ```
//!
//! Re-issuing the original utterance afterwards is up to the caller.

use crate::ports::backend_transport::TransportError;
use crate::use_cases::preferences::PreferencesUseCase;
use aios_domain::{Ack, Clarification, ClarificationChoice, DomainError};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while resolving a clarification.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A different default is already stored for the phrase. Resubmit with
    /// `force` to overwrite it. Displays the backend's rejection verbatim.
    #[error("{source}")]
    Conflict {
        phrase: String,
        #[source]
        source: TransportError,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ResolveError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ResolveError::Conflict { .. })
    }

    /// The backend's rejection, for conflicts and transport failures alike.
    pub fn transport_error(&self) -> Option<&TransportError> {
        match self {
            ResolveError::Conflict { source, .. } | ResolveError::Transport(source) => Some(source),
            ResolveError::Domain(_) => None,
        }
    }
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedChoice {
    pub choice: String,
    pub phrase: String,
    /// Whether the backend now holds this as the phrase's default
    pub persisted_default: bool,
    pub ack: Ack,
}

/// Use case for resolving a clarify outcome.
#[derive(Clone)]
pub struct ResolveClarificationUseCase {
    preferences: PreferencesUseCase,
}

impl ResolveClarificationUseCase {
    pub fn new(preferences: PreferencesUseCase) -> Self {
        Self { preferences }
    }

    /// Submit the user's choice once.
    pub async fn resolve(&self, choice: ClarificationChoice) -> Result<ResolvedChoice, ResolveError> {
        match self.preferences.remember_alias(&choice).await {
            Ok(ack) => {
                info!(
                    "Resolved '{}' -> '{}'{}",
                    choice.phrase,
                    choice.choice,
                    if choice.make_default { " (default)" } else { "" }
                );
                Ok(ResolvedChoice {
                    persisted_default: choice.make_default,
                    choice: choice.choice,
                    phrase: choice.phrase,
                    ack,
                })
            }
            Err(e) if e.is_conflict() && !choice.force => {
                warn!("Default conflict for '{}': {}", choice.phrase, e);
                Err(ResolveError::Conflict {
                    phrase: choice.phrase,
                    source: e,
                })
            }
            Err(e) => Err(ResolveError::Transport(e)),
        }
    }

    /// Pick one of the clarification's options by id (or name), or answer in
    /// free text when it offered none.
    pub async fn resolve_option(
        &self,
        clarification: &Clarification,
        value: &str,
        make_default: bool,
        force: bool,
    ) -> Result<ResolvedChoice, ResolveError> {
        let mut choice = ClarificationChoice::for_option(clarification, value)?;
        choice.make_default = make_default;
        choice.force = force;
        self.resolve(choice).await
    }
}
