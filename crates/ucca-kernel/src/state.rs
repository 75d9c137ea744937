//! Action states used to describe a combination.
//!
//! Every control action can be provided or not provided. Continuous actions
//! additionally have temporal states: the action can start or end relative to
//! the other actions in a combination.

use serde::{Deserialize, Serialize};

/// Provided / not-provided state, used by the "1-2" UCCA types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProvidedActionState {
    Provided,
    NotProvided,
}

impl ProvidedActionState {
    /// Canonical iteration order.
    pub const ALL: [Self; 2] = [Self::Provided, Self::NotProvided];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Provided => "provided",
            Self::NotProvided => "not-provided",
        }
    }
}

/// Temporal state of a continuous action, used by the "3-4" UCCA types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemporalActionState {
    Starts,
    Ends,
}

impl TemporalActionState {
    /// Canonical iteration order.
    pub const ALL: [Self; 2] = [Self::Starts, Self::Ends];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starts => "starts",
            Self::Ends => "ends",
        }
    }
}

/// Either family of action state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionState {
    Provided(ProvidedActionState),
    Temporal(TemporalActionState),
}

impl ActionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Provided(s) => s.as_str(),
            Self::Temporal(s) => s.as_str(),
        }
    }
}

impl From<ProvidedActionState> for ActionState {
    fn from(state: ProvidedActionState) -> Self {
        Self::Provided(state)
    }
}

impl From<TemporalActionState> for ActionState {
    fn from(state: TemporalActionState) -> Self {
        Self::Temporal(state)
    }
}

impl std::fmt::Display for ProvidedActionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for TemporalActionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for ActionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
