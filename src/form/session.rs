//! Session-scoped form state

use super::fields::{FormField, SUB_ENTRY_COUNT};
use super::reflection::{LinkType, ParseLinkTypeError, Reflection, SubEntry};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised while collecting a form
#[derive(Debug, Error)]
pub enum FormError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid answers file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    LinkType(#[from] ParseLinkTypeError),

    #[error("No sub-desire slot {0} (the form has {})", SUB_ENTRY_COUNT)]
    NoSuchSlot(usize),
}

/// Required fields were empty when the analysis was triggered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all fields before analyzing (missing: {})", join_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<FormField>,
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(FormField::column)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unique identifier for a form session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Answers for one sub-desire slot, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubForm {
    pub sub_desire: String,
    pub outcome: String,
    pub link_type: LinkType,
}

/// Raw, unvalidated answers of the guided form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub name: String,
    pub main_desire: String,
    pub subs: [SubForm; SUB_ENTRY_COUNT],
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load answers from a JSON file shaped like the serialized `FormState`
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn slot_mut(&mut self, slot: usize) -> Result<&mut SubForm, FormError> {
        self.subs.get_mut(slot).ok_or(FormError::NoSuchSlot(slot))
    }

    /// Set a field from its textual answer
    ///
    /// Free-text fields are stored verbatim. Link fields must parse as a
    /// [`LinkType`].
    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        match field {
            FormField::Name => self.name = value.to_string(),
            FormField::MainDesire => self.main_desire = value.to_string(),
            FormField::SubDesire(slot) => self.slot_mut(slot)?.sub_desire = value.to_string(),
            FormField::Outcome(slot) => self.slot_mut(slot)?.outcome = value.to_string(),
            FormField::LinkType(slot) => self.slot_mut(slot)?.link_type = value.parse()?,
        }
        Ok(())
    }

    pub fn set_link(&mut self, slot: usize, link_type: LinkType) -> Result<(), FormError> {
        self.slot_mut(slot)?.link_type = link_type;
        Ok(())
    }

    /// Current textual value of a field, `None` for a slot the form lacks
    pub fn get(&self, field: FormField) -> Option<String> {
        let value = match field {
            FormField::Name => self.name.clone(),
            FormField::MainDesire => self.main_desire.clone(),
            FormField::SubDesire(slot) => self.subs.get(slot)?.sub_desire.clone(),
            FormField::Outcome(slot) => self.subs.get(slot)?.outcome.clone(),
            FormField::LinkType(slot) => self.subs.get(slot)?.link_type.to_string(),
        };
        Some(value)
    }

    fn is_blank(&self, field: FormField) -> bool {
        self.get(field).map_or(true, |value| value.trim().is_empty())
    }

    /// Outcome fields left empty. They do not block the analysis but are
    /// surfaced to the user.
    pub fn empty_outcomes(&self) -> Vec<FormField> {
        (0..SUB_ENTRY_COUNT)
            .map(FormField::Outcome)
            .filter(|field| self.is_blank(*field))
            .collect()
    }

    /// Check required fields and build the submission
    pub fn validate(&self) -> Result<Reflection, ValidationError> {
        let missing: Vec<FormField> = FormField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.is_blank(*field))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        let entries = self
            .subs
            .clone()
            .map(|sub| SubEntry::new(sub.sub_desire, sub.outcome, sub.link_type));
        Ok(Reflection::new(self.name.clone(), self.main_desire.clone(), entries))
    }
}

/// One user's in-memory run through the form
///
/// Passed explicitly through the pipeline; nothing about the form lives in
/// process-wide state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub id: SessionId,
    pub form: FormState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: FormState) -> Self {
        Self {
            id: SessionId::new(),
            form,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> FormState {
        let mut form = FormState::new();
        form.name = "Alice".into();
        form.main_desire = "Financial freedom".into();
        for (slot, sub) in form.subs.iter_mut().enumerate() {
            sub.sub_desire = format!("sub {}", slot + 1);
            sub.outcome = format!("outcome {}", slot + 1);
        }
        form
    }

    #[test]
    fn filled_form_validates() {
        let mut form = filled_form();
        form.set_link(1, LinkType::Spurious).unwrap();

        let reflection = form.validate().unwrap();
        assert_eq!(reflection.name, "Alice");
        assert_eq!(reflection.main_desire, "Financial freedom");
        assert_eq!(reflection.entries[0].sub_desire, "sub 1");
        assert_eq!(reflection.entries[1].link_type, LinkType::Spurious);
        assert_eq!(reflection.entries[2].outcome, "outcome 3");
    }

    #[test]
    fn empty_main_desire_is_rejected() {
        let mut form = filled_form();
        form.main_desire.clear();

        let err = form.validate().unwrap_err();
        assert_eq!(err.missing, vec![FormField::MainDesire]);
        assert!(err.to_string().starts_with("Please fill in all fields"));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut form = filled_form();
        form.name = "   ".into();
        form.subs[2].sub_desire = "\t".into();

        let err = form.validate().unwrap_err();
        assert_eq!(err.missing, vec![FormField::Name, FormField::SubDesire(2)]);
    }

    #[test]
    fn empty_outcomes_do_not_block_validation() {
        let mut form = filled_form();
        form.subs[0].outcome.clear();
        form.subs[2].outcome.clear();

        assert!(form.validate().is_ok());
        assert_eq!(
            form.empty_outcomes(),
            vec![FormField::Outcome(0), FormField::Outcome(2)]
        );
    }

    #[test]
    fn set_parses_link_fields() {
        let mut form = FormState::new();
        form.set(FormField::LinkType(2), "unclear").unwrap();
        assert_eq!(form.subs[2].link_type, LinkType::Unclear);

        assert!(form.set(FormField::LinkType(0), "nope").is_err());
        assert_eq!(form.subs[0].link_type, LinkType::Real);
    }

    #[test]
    fn out_of_range_slot_is_an_error() {
        let mut form = FormState::new();

        let err = form.set(FormField::SubDesire(SUB_ENTRY_COUNT), "x").unwrap_err();
        assert!(matches!(err, FormError::NoSuchSlot(3)));
        assert!(form.set_link(7, LinkType::Unclear).is_err());
        assert_eq!(form.get(FormField::Outcome(SUB_ENTRY_COUNT)), None);
        assert_eq!(form, FormState::new());
    }

    #[test]
    fn answers_file_may_omit_fields() {
        let json = r#"{ "name": "Bo", "subs": [{ "sub_desire": "a", "link_type": "Unclear" }, {}, {}] }"#;
        let form: FormState = serde_json::from_str(json).unwrap();
        assert_eq!(form.name, "Bo");
        assert_eq!(form.main_desire, "");
        assert_eq!(form.subs[0].link_type, LinkType::Unclear);
        assert_eq!(form.subs[1].link_type, LinkType::Real);
    }
}
