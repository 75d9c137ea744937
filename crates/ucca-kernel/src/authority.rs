//! The authority model: who may issue which control action.

use crate::id::{Action, Controller};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Properties of a single control action.
///
/// Discrete actions only have provided / not-provided states. Continuous
/// actions additionally have starts / ends states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionProps {
    pub id: Action,
    pub discrete: bool,
}

impl ActionProps {
    pub fn discrete(id: Action) -> Self {
        Self { id, discrete: true }
    }

    pub fn continuous(id: Action) -> Self {
        Self {
            id,
            discrete: false,
        }
    }

    pub fn is_continuous(&self) -> bool {
        !self.discrete
    }
}

/// Controller authority and action properties for one controller team.
///
/// Both maps are ordered, so every traversal of a tuple is canonical and
/// reproducible regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityTuple {
    /// Controller → actions it is authorized to issue.
    pub controllers: BTreeMap<Controller, BTreeSet<Action>>,

    /// Action → its properties.
    pub actions: BTreeMap<Action, ActionProps>,
}

impl AuthorityTuple {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `controller` authority over `action`.
    pub fn authorize(&mut self, controller: Controller, action: Action) -> &mut Self {
        self.controllers.entry(controller).or_default().insert(action);
        self
    }

    /// Register a controller with no authority yet.
    pub fn add_controller(&mut self, controller: Controller) -> &mut Self {
        self.controllers.entry(controller).or_default();
        self
    }

    /// Declare (or replace) the properties of an action.
    pub fn declare(&mut self, props: ActionProps) -> &mut Self {
        self.actions.insert(props.id.clone(), props);
        self
    }

    /// Whether `action` is declared and continuous.
    pub fn is_continuous(&self, action: &Action) -> bool {
        self.actions
            .get(action)
            .is_some_and(ActionProps::is_continuous)
    }

    /// Total number of controller → action authority edges.
    pub fn edge_count(&self) -> usize {
        self.controllers.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_authority() {
        let mut tuple = AuthorityTuple::new();
        tuple
            .authorize(Controller::new("C1"), Action::new("X"))
            .authorize(Controller::new("C2"), Action::new("X"))
            .authorize(Controller::new("C2"), Action::new("Y"))
            .declare(ActionProps::discrete(Action::new("X")))
            .declare(ActionProps::continuous(Action::new("Y")));

        assert_eq!(tuple.controllers.len(), 2);
        assert_eq!(tuple.edge_count(), 3);
        assert!(tuple.is_continuous(&Action::new("Y")));
        assert!(!tuple.is_continuous(&Action::new("X")));
        assert!(!tuple.is_continuous(&Action::new("missing")));
    }

    #[test]
    fn add_controller_keeps_existing_authority() {
        let mut tuple = AuthorityTuple::new();
        tuple.authorize(Controller::new("C1"), Action::new("X"));
        tuple.add_controller(Controller::new("C1"));
        assert_eq!(tuple.edge_count(), 1);
    }
}
