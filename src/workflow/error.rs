use super::phase::{Phase, PhaseError, RedirectTarget};
use super::review::ReviewError;
use super::rows::RowError;
use super::validate::ValidationError;
use crate::client::SaveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Generation,
    Save,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Generation => "generation",
            RequestKind::Save => "save",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Row(#[from] RowError),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    Phase(#[from] PhaseError),
    #[error(transparent)]
    Save(#[from] SaveError),
    #[error("a {kind} request is already in flight")]
    RequestInFlight { kind: RequestKind },
    #[error("this action needs the {expected} phase (current phase: {actual})")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("workflow already finished; continue at {target}")]
    Finished { target: RedirectTarget },
}
