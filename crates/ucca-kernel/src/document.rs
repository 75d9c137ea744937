//! Authority documents: the JSON shape the application layer hands over.
//!
//! A document lists controllers with their authorized actions, actions with
//! their discreteness, and groups of interchangeable controllers. Descriptive
//! metadata (controller kind, action verb/object) is carried along but never
//! affects enumeration.

use crate::authority::{ActionProps, AuthorityTuple};
use crate::enumerate::Enumerator;
use crate::error::UccaError;
use crate::id::{Action, Controller};
use crate::interchange::InterchangeableControllers;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityDocument {
    /// Optional name of the controller team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    #[serde(default)]
    pub controllers: Vec<ControllerEntry>,

    #[serde(default)]
    pub actions: Vec<ActionEntry>,

    /// Groups of controllers treated as substitutes for one another.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interchangeable: Vec<Vec<Controller>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerEntry {
    pub id: Controller,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntry {
    pub id: Action,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub verb: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub object: String,
    #[serde(default = "default_discrete")]
    pub discrete: bool,
}

fn default_discrete() -> bool {
    true
}

impl ActionEntry {
    /// Human-readable label, e.g. `open valve`; falls back to the id.
    pub fn label(&self) -> String {
        let label = format!("{} {}", self.verb.trim(), self.object.trim());
        let label = label.trim();
        if label.is_empty() {
            self.id.to_string()
        } else {
            label.to_string()
        }
    }
}

impl AuthorityDocument {
    pub fn from_json_str(input: &str) -> Result<Self, UccaError> {
        serde_json::from_str(input).map_err(|e| UccaError::InvalidDocument(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, UccaError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| UccaError::Storage(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json_str(&content)
    }

    /// Split into the authority tuple and the interchangeability forest.
    ///
    /// Duplicate ids and interchangeable groups naming unknown controllers
    /// are document errors. Authority consistency is left to validation.
    pub fn into_parts(self) -> Result<(AuthorityTuple, InterchangeableControllers), UccaError> {
        let mut tuple = AuthorityTuple::new();

        let mut seen_controllers = BTreeSet::new();
        for entry in self.controllers {
            if !seen_controllers.insert(entry.id.clone()) {
                return Err(UccaError::InvalidDocument(format!(
                    "duplicate controller id: {}",
                    entry.id
                )));
            }
            tuple.add_controller(entry.id.clone());
            for action in entry.actions {
                tuple.authorize(entry.id.clone(), action);
            }
        }

        for entry in self.actions {
            if tuple.actions.contains_key(&entry.id) {
                return Err(UccaError::InvalidDocument(format!(
                    "duplicate action id: {}",
                    entry.id
                )));
            }
            tuple.declare(ActionProps {
                id: entry.id,
                discrete: entry.discrete,
            });
        }

        let mut interchangeable =
            InterchangeableControllers::with_controllers(tuple.controllers.keys().cloned());
        for group in &self.interchangeable {
            for controller in group {
                if !tuple.controllers.contains_key(controller) {
                    return Err(UccaError::InvalidDocument(format!(
                        "interchangeable group names unknown controller: {controller}"
                    )));
                }
            }
            if let Some((first, rest)) = group.split_first() {
                for other in rest {
                    interchangeable.union(first, other);
                }
            }
        }

        Ok((tuple, interchangeable))
    }

    /// Build a validated enumerator from this document.
    pub fn into_enumerator(self) -> Result<Enumerator, UccaError> {
        let (tuple, interchangeable) = self.into_parts()?;
        Ok(Enumerator::new(tuple, interchangeable)?)
    }
}
