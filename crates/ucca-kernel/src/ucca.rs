//! UCCA records: the four variants produced by enumeration.
//!
//! ```text
//!                 provided / not-provided     starts / ends
//! team (2a)       Row 1  "2a.1-2"             Row 3  "2a.3-4"
//! controller (2b) Row 2  "2b.1-2"             Row 4  "2b.3-4"
//! ```

use crate::id::{Action, Controller};
use crate::state::{ActionState, ProvidedActionState, TemporalActionState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Team-level combination: `action` in `action_state` while the
/// `other_actions` are in `other_actions_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Abstraction2a<S> {
    pub action: Action,
    pub other_actions: BTreeSet<Action>,
    pub action_state: S,
    pub other_actions_state: S,
}

/// Controller-specific combination: `controller` puts `action` in
/// `action_state` while the `other_controllers` sharing authority over it
/// are in `other_actions_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Abstraction2b<S> {
    pub action: Action,
    pub controller: Controller,
    pub other_controllers: BTreeSet<Controller>,
    pub action_state: S,
    pub other_actions_state: S,
}

/// An unsafe combination of control actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Ucca {
    #[serde(rename = "2a.1-2")]
    TeamProvided(Abstraction2a<ProvidedActionState>),

    #[serde(rename = "2b.1-2")]
    ControllerProvided(Abstraction2b<ProvidedActionState>),

    #[serde(rename = "2a.3-4")]
    TeamTemporal(Abstraction2a<TemporalActionState>),

    #[serde(rename = "2b.3-4")]
    ControllerTemporal(Abstraction2b<TemporalActionState>),
}

/// Level of abstraction of a UCCA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbstractionType {
    #[serde(rename = "2a")]
    Team,
    #[serde(rename = "2b")]
    Controller,
}

impl AbstractionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Team => "2a",
            Self::Controller => "2b",
        }
    }
}

/// State family of a UCCA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UccaTypes {
    #[serde(rename = "1-2")]
    Provided,
    #[serde(rename = "3-4")]
    Temporal,
}

impl UccaTypes {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Provided => "1-2",
            Self::Temporal => "3-4",
        }
    }
}

/// One row of the case table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Row {
    Row1,
    Row2,
    Row3,
    Row4,
}

impl Row {
    pub const ALL: [Self; 4] = [Self::Row1, Self::Row2, Self::Row3, Self::Row4];

    pub fn number(self) -> u8 {
        match self {
            Self::Row1 => 1,
            Self::Row2 => 2,
            Self::Row3 => 3,
            Self::Row4 => 4,
        }
    }

    pub fn abstraction_type(self) -> AbstractionType {
        match self {
            Self::Row1 | Self::Row3 => AbstractionType::Team,
            Self::Row2 | Self::Row4 => AbstractionType::Controller,
        }
    }

    pub fn ucca_types(self) -> UccaTypes {
        match self {
            Self::Row1 | Self::Row2 => UccaTypes::Provided,
            Self::Row3 | Self::Row4 => UccaTypes::Temporal,
        }
    }

    /// Variant tag, e.g. `"2a.1-2"`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Row1 => "2a.1-2",
            Self::Row2 => "2b.1-2",
            Self::Row3 => "2a.3-4",
            Self::Row4 => "2b.3-4",
        }
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}", self.number())
    }
}

impl std::str::FromStr for Row {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "row1" | "2a.1-2" => Ok(Self::Row1),
            "2" | "row2" | "2b.1-2" => Ok(Self::Row2),
            "3" | "row3" | "2a.3-4" => Ok(Self::Row3),
            "4" | "row4" | "2b.3-4" => Ok(Self::Row4),
            _ => Err(format!("unknown row: {s}")),
        }
    }
}

impl Ucca {
    pub fn row(&self) -> Row {
        match self {
            Self::TeamProvided(_) => Row::Row1,
            Self::ControllerProvided(_) => Row::Row2,
            Self::TeamTemporal(_) => Row::Row3,
            Self::ControllerTemporal(_) => Row::Row4,
        }
    }

    pub fn tag(&self) -> &'static str {
        self.row().tag()
    }

    pub fn abstraction_type(&self) -> AbstractionType {
        self.row().abstraction_type()
    }

    pub fn ucca_types(&self) -> UccaTypes {
        self.row().ucca_types()
    }

    pub fn action(&self) -> &Action {
        match self {
            Self::TeamProvided(u) => &u.action,
            Self::ControllerProvided(u) => &u.action,
            Self::TeamTemporal(u) => &u.action,
            Self::ControllerTemporal(u) => &u.action,
        }
    }

    /// The named controller, for controller-specific variants.
    pub fn controller(&self) -> Option<&Controller> {
        match self {
            Self::TeamProvided(_) | Self::TeamTemporal(_) => None,
            Self::ControllerProvided(u) => Some(&u.controller),
            Self::ControllerTemporal(u) => Some(&u.controller),
        }
    }

    pub fn action_state(&self) -> ActionState {
        match self {
            Self::TeamProvided(u) => u.action_state.into(),
            Self::ControllerProvided(u) => u.action_state.into(),
            Self::TeamTemporal(u) => u.action_state.into(),
            Self::ControllerTemporal(u) => u.action_state.into(),
        }
    }

    pub fn other_actions_state(&self) -> ActionState {
        match self {
            Self::TeamProvided(u) => u.other_actions_state.into(),
            Self::ControllerProvided(u) => u.other_actions_state.into(),
            Self::TeamTemporal(u) => u.other_actions_state.into(),
            Self::ControllerTemporal(u) => u.other_actions_state.into(),
        }
    }

    /// Flatten into the exported record shape.
    pub fn to_record(&self) -> UccaRecord {
        let (other_actions, other_controllers) = match self {
            Self::TeamProvided(u) => (Some(u.other_actions.clone()), None),
            Self::TeamTemporal(u) => (Some(u.other_actions.clone()), None),
            Self::ControllerProvided(u) => (None, Some(u.other_controllers.clone())),
            Self::ControllerTemporal(u) => (None, Some(u.other_controllers.clone())),
        };
        UccaRecord {
            tag: self.tag().to_string(),
            abstraction_type: self.abstraction_type(),
            ucca_types: self.ucca_types(),
            action: self.action().clone(),
            controller: self.controller().cloned(),
            other_actions,
            other_controllers,
            action_state: self.action_state(),
            other_actions_state: self.other_actions_state(),
        }
    }
}

impl std::fmt::Display for Ucca {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TeamProvided(u) => write_team(f, self.tag(), u),
            Self::TeamTemporal(u) => write_team(f, self.tag(), u),
            Self::ControllerProvided(u) => write_controller(f, self.tag(), u),
            Self::ControllerTemporal(u) => write_controller(f, self.tag(), u),
        }
    }
}

fn write_team<S: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    tag: &str,
    u: &Abstraction2a<S>,
) -> std::fmt::Result {
    write!(
        f,
        "[{tag}] {} {} while {{{}}} {}",
        u.action,
        u.action_state,
        join_ids(&u.other_actions),
        u.other_actions_state
    )
}

fn write_controller<S: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    tag: &str,
    u: &Abstraction2b<S>,
) -> std::fmt::Result {
    write!(
        f,
        "[{tag}] {} by {} {} while {{{}}} {}",
        u.action,
        u.controller,
        u.action_state,
        join_ids(&u.other_controllers),
        u.other_actions_state
    )
}

fn join_ids<T: std::fmt::Display>(ids: &BTreeSet<T>) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Flat export shape handed to rendering and export layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UccaRecord {
    #[serde(rename = "type")]
    pub tag: String,
    pub abstraction_type: AbstractionType,
    pub ucca_types: UccaTypes,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<Controller>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_actions: Option<BTreeSet<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_controllers: Option<BTreeSet<Controller>>,
    pub action_state: ActionState,
    pub other_actions_state: ActionState,
}
