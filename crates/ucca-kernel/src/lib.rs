//! # UCCA Kernel
//!
//! Identification of unsafe combinations of control actions (UCCAs) for a
//! team of controllers that share authority over a set of control actions.
//!
//! Given an [`AuthorityTuple`] (who may issue which action, and whether each
//! action is discrete or continuous), the [`Enumerator`] walks a fixed case
//! table and pushes every structurally possible combination into a
//! [`UccaSink`].
//!
//! ## Architecture
//!
//! ```text
//! Controller / Action          ← Opaque identifiers
//!     │
//! AuthorityTuple               ← controllers → actions, actions → props
//!     │
//! validate                     ← Two passes, every violation reported
//!     │
//! ActionToControllers          ← Reverse index, built once
//!     │
//! Enumerator                   ← Rows 1-4 of the case table
//!     │
//! Ucca                         ← 2a.1-2 | 2b.1-2 | 2a.3-4 | 2b.3-4
//! ```
//!
//! [`InterchangeableControllers`] is a disjoint-set forest over controllers,
//! carried alongside the tuple.

pub mod authority;
pub mod digest;
pub mod document;
pub mod enumerate;
pub mod error;
pub mod id;
pub mod interchange;
pub mod state;
pub mod ucca;
pub mod validate;

pub use authority::{ActionProps, AuthorityTuple};
pub use digest::{DigestSink, EnumerationDigest, digest_uccas};
pub use document::{ActionEntry, AuthorityDocument, ControllerEntry};
pub use enumerate::{EnumerationOutcome, Enumerator, RowCounts, UccaSink};
pub use error::{AuthorityViolation, UccaError, ValidationError};
pub use id::{Action, Controller};
pub use interchange::InterchangeableControllers;
pub use state::{ActionState, ProvidedActionState, TemporalActionState};
pub use ucca::{Abstraction2a, Abstraction2b, AbstractionType, Row, Ucca, UccaRecord, UccaTypes};
pub use validate::{ActionToControllers, build_action_to_controllers, validate};
