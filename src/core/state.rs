//! Phase trait for engine states.
//!
//! Every engine projects its full state onto a small phase enum (wizard
//! step, form status, cart status). Phases are what the session host records
//! in its history and what the UI uses to pick a screen.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for engine phases.
///
/// All methods are pure. A phase is a coarse, comparable summary of an
/// engine state; two states in the same phase render the same screen.
///
/// # Required Traits
///
/// - `Clone`: phases are copied into history records
/// - `PartialEq`: phase changes are detected by comparison
/// - `Debug`: phases show up in logs
/// - `Serialize` + `Deserialize`: phases are part of session snapshots
///
/// # Example
///
/// ```rust
/// use careflow::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum VisitPhase {
///     Waiting,
///     InConsultation,
///     Discharged,
///     NoShow,
/// }
///
/// impl State for VisitPhase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Waiting => "Waiting",
///             Self::InConsultation => "InConsultation",
///             Self::Discharged => "Discharged",
///             Self::NoShow => "NoShow",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Discharged | Self::NoShow)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::NoShow)
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name of the phase for display and logging.
    fn name(&self) -> &str;

    /// Whether the flow is finished in this phase.
    ///
    /// A final phase accepts no further input except an explicit reset.
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether this phase reports a failure to the user.
    ///
    /// Error phases are recoverable in this crate; they are not necessarily
    /// final. Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}
