//! Careflow: pure state engines for a telehealth portal
//!
//! Careflow holds the interactive logic behind a telehealth site's symptom
//! checker, booking and contact forms, and pharmacy cart. Each engine is a
//! pure reducer over a plain, serializable state value; effects (delivering a
//! form, reading the clock, logging) live in a thin shell around them.
//!
//! # Core Concepts
//!
//! - **Reducer**: `(state, event) -> state`, never failing; inapplicable
//!   events return an equal state
//! - **Phase**: a coarse summary of a state via the `State` trait
//! - **Guards**: pure predicates gating wizard steps
//! - **Schema**: ordered field rules, first failure per field wins
//! - **Session**: hosts an engine, records phase history, snapshots to a
//!   checkpoint
//!
//! # Example
//!
//! ```rust
//! use careflow::cart::{CartEngine, CartEvent, ProductId};
//! use careflow::config::EngineConfig;
//! use careflow::effects::Session;
//! use rust_decimal::Decimal;
//!
//! let config = EngineConfig::default();
//! let mut cart = Session::new(CartEngine::from_config(&config.pharmacy).unwrap());
//!
//! cart.dispatch(CartEvent::Add(ProductId::from("omega-3")));
//! cart.dispatch(CartEvent::Add(ProductId::from("paracetamol-500")));
//!
//! assert_eq!(cart.state().total(), Decimal::new(2098, 2));
//! assert!(!cart.engine().qualifies_for_free_delivery(cart.state()));
//! ```

pub mod cart;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod effects;
pub mod form;
mod macros;
pub mod schema;
pub mod wizard;

// Re-export commonly used types
pub use core::{Guard, Reducer, State, StateHistory, StateTransition};
pub use effects::Session;
