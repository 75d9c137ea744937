//! UCCA enumeration over the fixed four-row case table.
//!
//! Pass A visits every action in id order and emits Row 1 then Row 3.
//! Pass B visits every (action, controller) pair in id order and emits
//! Row 2 then Row 4.
//!
//! Emission is push-based: each UCCA is handed to a [`UccaSink`] as soon as
//! it is built, and the sink can stop the run by returning
//! [`ControlFlow::Break`].

use crate::authority::AuthorityTuple;
use crate::error::ValidationError;
use crate::id::{Action, Controller};
use crate::interchange::InterchangeableControllers;
use crate::state::{ProvidedActionState, TemporalActionState};
use crate::ucca::{Abstraction2a, Abstraction2b, Row, Ucca};
use crate::validate::{ActionToControllers, build_action_to_controllers, validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::ControlFlow;

/// Row 2 pairs, in emission order. `(not-provided, provided)` is
/// intentionally absent: it is covered from the perspective of the
/// controller that did provide the action.
const ROW2_STATES: [(ProvidedActionState, ProvidedActionState); 3] = [
    (
        ProvidedActionState::NotProvided,
        ProvidedActionState::NotProvided,
    ),
    (ProvidedActionState::Provided, ProvidedActionState::Provided),
    (
        ProvidedActionState::Provided,
        ProvidedActionState::NotProvided,
    ),
];

/// Receiver of enumerated UCCAs.
pub trait UccaSink {
    /// Accept one UCCA. Returning `Break` ends the enumeration.
    fn accept(&mut self, ucca: Ucca) -> ControlFlow<()>;
}

impl UccaSink for Vec<Ucca> {
    fn accept(&mut self, ucca: Ucca) -> ControlFlow<()> {
        self.push(ucca);
        ControlFlow::Continue(())
    }
}

impl<F> UccaSink for F
where
    F: FnMut(Ucca) -> ControlFlow<()>,
{
    fn accept(&mut self, ucca: Ucca) -> ControlFlow<()> {
        self(ucca)
    }
}

/// Summary of one enumeration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumerationOutcome {
    /// UCCAs handed to the sink, including one it answered with `Break`.
    pub offered: usize,
    pub stopped_early: bool,
}

/// Number of UCCAs per row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowCounts {
    pub row1: usize,
    pub row2: usize,
    pub row3: usize,
    pub row4: usize,
}

impl RowCounts {
    pub fn get(&self, row: Row) -> usize {
        match row {
            Row::Row1 => self.row1,
            Row::Row2 => self.row2,
            Row::Row3 => self.row3,
            Row::Row4 => self.row4,
        }
    }

    pub fn total(&self) -> usize {
        self.row1 + self.row2 + self.row3 + self.row4
    }

    fn record(&mut self, row: Row) {
        match row {
            Row::Row1 => self.row1 += 1,
            Row::Row2 => self.row2 += 1,
            Row::Row3 => self.row3 += 1,
            Row::Row4 => self.row4 += 1,
        }
    }
}

/// Counts offers and forwards to the inner sink.
struct Counting<'a, S: ?Sized> {
    inner: &'a mut S,
    offered: usize,
}

impl<S: UccaSink + ?Sized> Counting<'_, S> {
    fn emit(&mut self, ucca: Ucca) -> ControlFlow<()> {
        self.offered += 1;
        self.inner.accept(ucca)
    }
}

/// Enumerator for one controller team.
///
/// Constructed from a validated authority tuple; holds only the tuple, the
/// interchangeability forest, and the derived action → controllers index.
#[derive(Debug, Clone)]
pub struct Enumerator {
    authority: AuthorityTuple,
    interchangeable: InterchangeableControllers,
    action_to_controllers: ActionToControllers,
}

impl Enumerator {
    /// Validate `authority` and build the reverse index.
    pub fn new(
        authority: AuthorityTuple,
        interchangeable: InterchangeableControllers,
    ) -> Result<Self, ValidationError> {
        validate(&authority)?;
        let action_to_controllers = build_action_to_controllers(&authority);
        tracing::debug!(
            controllers = authority.controllers.len(),
            actions = authority.actions.len(),
            edges = authority.edge_count(),
            interchangeable_classes = interchangeable.classes().len(),
            "enumerator ready"
        );
        Ok(Self {
            authority,
            interchangeable,
            action_to_controllers,
        })
    }

    pub fn authority(&self) -> &AuthorityTuple {
        &self.authority
    }

    pub fn interchangeable(&self) -> &InterchangeableControllers {
        &self.interchangeable
    }

    pub fn action_to_controllers(&self) -> &ActionToControllers {
        &self.action_to_controllers
    }

    /// Emit every UCCA for all four rows.
    pub fn enumerate<S: UccaSink + ?Sized>(&self, sink: &mut S) -> EnumerationOutcome {
        self.enumerate_rows(&Row::ALL, sink)
    }

    /// Emit the UCCAs of the selected rows only, in the same order they
    /// appear in a full run.
    pub fn enumerate_rows<S: UccaSink + ?Sized>(
        &self,
        rows: &[Row],
        sink: &mut S,
    ) -> EnumerationOutcome {
        let mut out = Counting {
            inner: sink,
            offered: 0,
        };
        let flow = self.run(rows, &mut out);
        let outcome = EnumerationOutcome {
            offered: out.offered,
            stopped_early: flow.is_break(),
        };
        tracing::debug!(
            offered = outcome.offered,
            stopped_early = outcome.stopped_early,
            "enumeration finished"
        );
        outcome
    }

    /// Materialize every UCCA.
    pub fn collect(&self) -> Vec<Ucca> {
        let mut uccas = Vec::new();
        self.enumerate(&mut uccas);
        uccas
    }

    /// Per-row counts without retaining any UCCA.
    pub fn row_counts(&self) -> RowCounts {
        let mut counts = RowCounts::default();
        self.enumerate(&mut |ucca: Ucca| {
            counts.record(ucca.row());
            ControlFlow::Continue(())
        });
        counts
    }

    fn run<S: UccaSink + ?Sized>(
        &self,
        rows: &[Row],
        out: &mut Counting<'_, S>,
    ) -> ControlFlow<()> {
        let wants = |row: Row| rows.contains(&row);

        if wants(Row::Row1) || wants(Row::Row3) {
            for action in self.authority.actions.keys() {
                let other_actions: BTreeSet<Action> = self
                    .authority
                    .actions
                    .keys()
                    .filter(|other| *other != action)
                    .cloned()
                    .collect();

                if wants(Row::Row1) {
                    tracing::trace!(%action, "row 1");
                    self.team_provided(action, &other_actions, out)?;
                }
                if wants(Row::Row3) {
                    tracing::trace!(%action, "row 3");
                    self.team_temporal(action, &other_actions, out)?;
                }
            }
        }

        if wants(Row::Row2) || wants(Row::Row4) {
            for action in self.authority.actions.keys() {
                let controllers = self.controllers_of(action);
                for controller in controllers {
                    let other_controllers: BTreeSet<Controller> = controllers
                        .iter()
                        .filter(|other| *other != controller)
                        .cloned()
                        .collect();

                    if wants(Row::Row2) {
                        tracing::trace!(%action, %controller, "row 2");
                        self.controller_provided(action, controller, &other_controllers, out)?;
                    }
                    if wants(Row::Row4) {
                        tracing::trace!(%action, %controller, "row 4");
                        self.controller_temporal(action, controller, &other_controllers, out)?;
                    }
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// Row 1: all four provided combinations, even with no other actions.
    fn team_provided<S: UccaSink + ?Sized>(
        &self,
        action: &Action,
        other_actions: &BTreeSet<Action>,
        out: &mut Counting<'_, S>,
    ) -> ControlFlow<()> {
        for action_state in ProvidedActionState::ALL {
            for other_actions_state in ProvidedActionState::ALL {
                out.emit(Ucca::TeamProvided(Abstraction2a {
                    action: action.clone(),
                    other_actions: other_actions.clone(),
                    action_state,
                    other_actions_state,
                }))?;
            }
        }
        ControlFlow::Continue(())
    }

    /// Row 3: temporal combinations. An "ends" peer state needs at least one
    /// continuous peer; a "starts" peer state needs at least one peer.
    fn team_temporal<S: UccaSink + ?Sized>(
        &self,
        action: &Action,
        other_actions: &BTreeSet<Action>,
        out: &mut Counting<'_, S>,
    ) -> ControlFlow<()> {
        let other_continuous: BTreeSet<Action> = other_actions
            .iter()
            .filter(|other| self.authority.is_continuous(other))
            .cloned()
            .collect();

        for action_state in TemporalActionState::ALL {
            for other_actions_state in TemporalActionState::ALL {
                let candidates = match other_actions_state {
                    TemporalActionState::Ends => &other_continuous,
                    TemporalActionState::Starts => other_actions,
                };
                if candidates.is_empty() {
                    continue;
                }
                out.emit(Ucca::TeamTemporal(Abstraction2a {
                    action: action.clone(),
                    other_actions: candidates.clone(),
                    action_state,
                    other_actions_state,
                }))?;
            }
        }
        ControlFlow::Continue(())
    }

    /// Row 2: three of the four provided combinations.
    fn controller_provided<S: UccaSink + ?Sized>(
        &self,
        action: &Action,
        controller: &Controller,
        other_controllers: &BTreeSet<Controller>,
        out: &mut Counting<'_, S>,
    ) -> ControlFlow<()> {
        for (action_state, other_actions_state) in ROW2_STATES {
            out.emit(Ucca::ControllerProvided(Abstraction2b {
                action: action.clone(),
                controller: controller.clone(),
                other_controllers: other_controllers.clone(),
                action_state,
                other_actions_state,
            }))?;
        }
        ControlFlow::Continue(())
    }

    /// Row 4: all four temporal combinations, no continuity filtering.
    fn controller_temporal<S: UccaSink + ?Sized>(
        &self,
        action: &Action,
        controller: &Controller,
        other_controllers: &BTreeSet<Controller>,
        out: &mut Counting<'_, S>,
    ) -> ControlFlow<()> {
        for action_state in TemporalActionState::ALL {
            for other_actions_state in TemporalActionState::ALL {
                out.emit(Ucca::ControllerTemporal(Abstraction2b {
                    action: action.clone(),
                    controller: controller.clone(),
                    other_controllers: other_controllers.clone(),
                    action_state,
                    other_actions_state,
                }))?;
            }
        }
        ControlFlow::Continue(())
    }

    /// Controllers authorized for a declared action.
    ///
    /// Validation guarantees every declared action is authorized, so a miss
    /// here is a broken invariant, not bad input.
    fn controllers_of(&self, action: &Action) -> &BTreeSet<Controller> {
        self.action_to_controllers.get(action).unwrap_or_else(|| {
            panic!("contract violation: action {action} is missing from the reverse index")
        })
    }
}
