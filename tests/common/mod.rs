//! Common test utilities for the desires integration tests

pub mod reflections;

pub use reflections::{filled_form, session, TempTable};
