//! Authority tuple validation and reverse-index construction.
//!
//! Validation runs two independent passes and collects every violation
//! before deciding:
//! 1. every action a controller is authorized for has properties;
//! 2. every action with properties is authorized by some controller.

use crate::authority::AuthorityTuple;
use crate::error::{AuthorityViolation, ValidationError};
use crate::id::{Action, Controller};
use std::collections::{BTreeMap, BTreeSet};

/// Action → controllers authorized to issue it.
pub type ActionToControllers = BTreeMap<Action, BTreeSet<Controller>>;

/// Collect all violations of bidirectional coverage, pass 1 then pass 2.
pub fn authority_violations(authority: &AuthorityTuple) -> Vec<AuthorityViolation> {
    let mut violations = Vec::new();

    for (controller, actions) in &authority.controllers {
        for action in actions {
            if !authority.actions.contains_key(action) {
                violations.push(AuthorityViolation::UndeclaredAction {
                    controller: controller.clone(),
                    action: action.clone(),
                });
            }
        }
    }

    for action in authority.actions.keys() {
        let authorized = authority
            .controllers
            .values()
            .any(|actions| actions.contains(action));
        if !authorized {
            violations.push(AuthorityViolation::UnauthorizedAction {
                action: action.clone(),
            });
        }
    }

    violations
}

/// Validate an authority tuple, reporting every violation at once.
pub fn validate(authority: &AuthorityTuple) -> Result<(), ValidationError> {
    let violations = authority_violations(authority);
    if violations.is_empty() {
        return Ok(());
    }
    for violation in &violations {
        tracing::warn!(%violation, "authority tuple violation");
    }
    Err(ValidationError::new(violations))
}

/// Invert controller authority into action → controllers.
///
/// One pass over every authority edge.
pub fn build_action_to_controllers(authority: &AuthorityTuple) -> ActionToControllers {
    let mut index: ActionToControllers = BTreeMap::new();
    for (controller, actions) in &authority.controllers {
        for action in actions {
            index
                .entry(action.clone())
                .or_default()
                .insert(controller.clone());
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::ActionProps;

    fn c(id: &str) -> Controller {
        Controller::new(id)
    }

    fn a(id: &str) -> Action {
        Action::new(id)
    }

    #[test]
    fn consistent_tuple_validates() {
        let mut tuple = AuthorityTuple::new();
        tuple
            .authorize(c("C1"), a("X"))
            .declare(ActionProps::discrete(a("X")));
        assert!(validate(&tuple).is_ok());
    }

    #[test]
    fn empty_tuple_validates() {
        assert!(validate(&AuthorityTuple::new()).is_ok());
    }

    #[test]
    fn collects_violations_from_both_passes() {
        let mut tuple = AuthorityTuple::new();
        tuple
            .authorize(c("C1"), a("Z"))
            .authorize(c("C2"), a("Q"))
            .authorize(c("C2"), a("X"))
            .declare(ActionProps::discrete(a("X")))
            .declare(ActionProps::discrete(a("W")))
            .declare(ActionProps::continuous(a("V")));

        let err = validate(&tuple).unwrap_err();
        assert_eq!(
            err.lines(),
            vec![
                "No action properties provided for Z, but was given in controller C1.",
                "No action properties provided for Q, but was given in controller C2.",
                "No controller defines action V",
                "No controller defines action W",
            ]
        );
    }

    #[test]
    fn controller_without_authority_is_not_a_violation() {
        let mut tuple = AuthorityTuple::new();
        tuple
            .add_controller(c("idle"))
            .authorize(c("C1"), a("X"))
            .declare(ActionProps::discrete(a("X")));
        assert!(validate(&tuple).is_ok());
    }

    #[test]
    fn reverse_index_inverts_authority() {
        let mut tuple = AuthorityTuple::new();
        tuple
            .authorize(c("C1"), a("X"))
            .authorize(c("C2"), a("X"))
            .authorize(c("C2"), a("Y"));

        let index = build_action_to_controllers(&tuple);
        assert_eq!(index[&a("X")], BTreeSet::from([c("C1"), c("C2")]));
        assert_eq!(index[&a("Y")], BTreeSet::from([c("C2")]));
        assert_eq!(index.len(), 2);
    }
}
