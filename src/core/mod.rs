//! Core engine types and logic.
//!
//! This module contains the pure functional core shared by every engine:
//! - Phase definitions via the `State` trait
//! - Guard predicates for transition gating
//! - Immutable phase history
//! - The `Reducer` contract
//!
//! Nothing here performs I/O or reads the clock.

mod guard;
mod history;
mod reducer;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use reducer::Reducer;
pub use state::State;
