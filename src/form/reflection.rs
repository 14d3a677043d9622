//! The validated submission and its link classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::fields::SUB_ENTRY_COUNT;

/// How a sub-desire relates to the main desire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LinkType {
    #[default]
    Real,
    Spurious,
    Unclear,
}

impl LinkType {
    /// All link types, in the order they are offered to the user
    pub const ALL: [LinkType; 3] = [LinkType::Real, LinkType::Spurious, LinkType::Unclear];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Real => "Real",
            LinkType::Spurious => "Spurious",
            LinkType::Unclear => "Unclear",
        }
    }

    /// Parse an interactive answer: either a name or its 1-based position in [`LinkType::ALL`].
    pub fn from_choice(answer: &str) -> Option<Self> {
        let answer = answer.trim();
        if let Ok(position) = answer.parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|idx| Self::ALL.get(idx).copied());
        }
        answer.parse().ok()
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown link type '{0}' (expected Real, Spurious, or Unclear)")]
pub struct ParseLinkTypeError(pub String);

impl FromStr for LinkType {
    type Err = ParseLinkTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|lt| lt.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLinkTypeError(s.to_string()))
    }
}

/// One sub-desire, what the user hopes to get from it, and how it links back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubEntry {
    pub sub_desire: String,
    pub outcome: String,
    pub link_type: LinkType,
}

impl SubEntry {
    pub fn new(sub_desire: impl Into<String>, outcome: impl Into<String>, link_type: LinkType) -> Self {
        Self {
            sub_desire: sub_desire.into(),
            outcome: outcome.into(),
            link_type,
        }
    }
}

/// A complete submission: one row of the reflection table
///
/// Built from a validated form, or read back from storage. Name, main desire
/// and every sub-desire are non-empty when produced by
/// [`FormState::validate`](super::FormState::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub name: String,
    pub main_desire: String,
    pub entries: [SubEntry; SUB_ENTRY_COUNT],
}

impl Reflection {
    pub fn new(
        name: impl Into<String>,
        main_desire: impl Into<String>,
        entries: [SubEntry; SUB_ENTRY_COUNT],
    ) -> Self {
        Self {
            name: name.into(),
            main_desire: main_desire.into(),
            entries,
        }
    }
}
