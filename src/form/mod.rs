//! Form collection
//!
//! The guided form is a fixed, statically typed schema ([`FormField`]) whose
//! answers live in a per-run [`Session`]. Nothing is validated until the
//! analysis is triggered, at which point [`FormState::validate`] either yields
//! a [`Reflection`] or a [`ValidationError`] naming the missing fields.

mod fields;
mod prompt;
mod reflection;
mod session;

pub use fields::{FormField, SUB_ENTRY_COUNT};
pub use prompt::prompt_form;
pub use reflection::{LinkType, ParseLinkTypeError, Reflection, SubEntry};
pub use session::{FormError, FormState, Session, SessionId, SubForm, ValidationError};
