#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Config,
    Review,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Config => "config",
            Phase::Review => "review",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseTrigger {
    GenerationSucceeded,
    Back,
    ReviewEmptied,
}

impl PhaseTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseTrigger::GenerationSucceeded => "generation_succeeded",
            PhaseTrigger::Back => "back",
            PhaseTrigger::ReviewEmptied => "review_emptied",
        }
    }
}

impl std::fmt::Display for PhaseTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhaseError {
    #[error("phase transition from `{from}` on `{trigger}` is invalid")]
    InvalidTransition { from: Phase, trigger: PhaseTrigger },
}

pub fn next_phase(current: Phase, trigger: PhaseTrigger) -> Result<Phase, PhaseError> {
    match (current, trigger) {
        (Phase::Config, PhaseTrigger::GenerationSucceeded)
        | (Phase::Review, PhaseTrigger::GenerationSucceeded) => Ok(Phase::Review),
        (Phase::Review, PhaseTrigger::Back) | (Phase::Review, PhaseTrigger::ReviewEmptied) => {
            Ok(Phase::Config)
        }
        (from, trigger) => Err(PhaseError::InvalidTransition { from, trigger }),
    }
}

/// Where the operator is sent once a batch is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(String);

impl RedirectTarget {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
