//! Schema-validated forms.
//!
//! One generic engine, [`FormEngine`], drives every form. A form kind
//! supplies the typed record its values turn into; the schema supplies the
//! rules. Two kinds ship with the crate: [`Appointment`] and [`Contact`].
//!
//! # Example
//!
//! ```rust
//! use careflow::core::Reducer;
//! use careflow::form::{Contact, FormEvent};
//!
//! let engine = Contact::engine().unwrap();
//! let state = engine.reduce(&engine.initial(), FormEvent::set("email", "not-an-email"));
//! let state = engine.reduce(&state, FormEvent::Validate);
//!
//! assert_eq!(state.error("email"), Some("Invalid email address"));
//! assert_eq!(state.error("name"), Some("Name is required"));
//! ```

mod appointment;
mod contact;
mod engine;
mod kind;
mod state;

pub use appointment::{Appointment, AppointmentRecord, ConsultationType};
pub use contact::{Contact, ContactRecord};
pub use engine::{
    FormEngine, FormEvent, PendingSubmission, SubmitTicket, UNPROCESSABLE_MESSAGE,
};
pub use kind::FormKind;
pub use state::{FormState, FormStatus};
