//! Static form schema

use std::fmt;

/// Number of sub-desire branches collected per reflection
pub const SUB_ENTRY_COUNT: usize = 3;

/// One input of the guided form
///
/// Indexed variants carry the zero-based sub-desire slot (`0..SUB_ENTRY_COUNT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    MainDesire,
    SubDesire(usize),
    Outcome(usize),
    LinkType(usize),
}

impl FormField {
    /// Every field in prompt order, which is also the table column order.
    pub const ALL: [FormField; 2 + 3 * SUB_ENTRY_COUNT] = [
        FormField::Name,
        FormField::MainDesire,
        FormField::SubDesire(0),
        FormField::Outcome(0),
        FormField::LinkType(0),
        FormField::SubDesire(1),
        FormField::Outcome(1),
        FormField::LinkType(1),
        FormField::SubDesire(2),
        FormField::Outcome(2),
        FormField::LinkType(2),
    ];

    /// Whether an empty answer blocks the analysis
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FormField::Name | FormField::MainDesire | FormField::SubDesire(_)
        )
    }

    /// Whether the field is a categorical choice rather than free text
    pub fn is_choice(&self) -> bool {
        matches!(self, FormField::LinkType(_))
    }

    /// The question shown to the user
    pub fn prompt(&self) -> String {
        match self {
            FormField::Name => "What is your name?".to_string(),
            FormField::MainDesire => "What is your main desire?".to_string(),
            FormField::SubDesire(slot) => format!("Sub-Desire {}", slot + 1),
            FormField::Outcome(slot) => {
                format!("What do you hope to get from Sub-Desire {}?", slot + 1)
            }
            FormField::LinkType(_) => {
                "Is this link to your main desire Real, Spurious, or Unclear?".to_string()
            }
        }
    }

    /// Column header used by the reflection table
    pub fn column(&self) -> String {
        match self {
            FormField::Name => "Name".to_string(),
            FormField::MainDesire => "Main Desire".to_string(),
            FormField::SubDesire(slot) => format!("Sub-Desire {}", slot + 1),
            FormField::Outcome(slot) => format!("Outcome {}", slot + 1),
            FormField::LinkType(slot) => format!("Link Type {}", slot + 1),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_prompt_order() {
        let columns: Vec<String> = FormField::ALL.iter().map(FormField::column).collect();
        assert_eq!(
            columns,
            vec![
                "Name",
                "Main Desire",
                "Sub-Desire 1",
                "Outcome 1",
                "Link Type 1",
                "Sub-Desire 2",
                "Outcome 2",
                "Link Type 2",
                "Sub-Desire 3",
                "Outcome 3",
                "Link Type 3",
            ]
        );
    }

    #[test]
    fn only_name_main_and_sub_desires_are_required() {
        let required: Vec<FormField> = FormField::ALL
            .into_iter()
            .filter(FormField::is_required)
            .collect();
        assert_eq!(
            required,
            vec![
                FormField::Name,
                FormField::MainDesire,
                FormField::SubDesire(0),
                FormField::SubDesire(1),
                FormField::SubDesire(2),
            ]
        );
    }
}
