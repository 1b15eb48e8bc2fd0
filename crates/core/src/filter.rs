//! Derives the working subset of cards from the current selection.

use std::fmt;
use std::str::FromStr;

use crate::model::{Card, ChapterId, StrongTopics, Subject, SubjectId, parent_subject};

/// Which cards to keep relative to the strong-topic set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StrengthFilter {
    #[default]
    All,
    Strong,
    Weak,
}

impl StrengthFilter {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StrengthFilter::All => "all",
            StrengthFilter::Strong => "strong",
            StrengthFilter::Weak => "weak",
        }
    }

    #[must_use]
    pub fn admits(self, card: &Card, strong: &StrongTopics) -> bool {
        match self {
            StrengthFilter::All => true,
            StrengthFilter::Strong => strong.contains(&card.id),
            StrengthFilter::Weak => !strong.contains(&card.id),
        }
    }
}

impl fmt::Display for StrengthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a strength filter name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strength filter: {0} (expected all, strong or weak)")]
pub struct ParseStrengthError(String);

impl FromStr for StrengthFilter {
    type Err = ParseStrengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "strong" => Ok(Self::Strong),
            "weak" => Ok(Self::Weak),
            other => Err(ParseStrengthError(other.to_string())),
        }
    }
}

/// The user's current (subject, chapter, strength) selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSelection {
    pub subject_id: Option<SubjectId>,
    pub chapter_id: Option<ChapterId>,
    pub strength: StrengthFilter,
}

impl CardSelection {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strength(mut self, strength: StrengthFilter) -> Self {
        self.strength = strength;
        self
    }

    /// Select a subject (or "All Subjects" with `None`). Clears any chapter so
    /// every card of the subject is visible.
    pub fn select_subject(&mut self, subject_id: Option<SubjectId>) {
        self.subject_id = subject_id;
        self.chapter_id = None;
    }

    /// Select a chapter, pulling in its parent subject when it can be found.
    pub fn select_chapter(&mut self, subjects: &[Subject], chapter_id: ChapterId) {
        if let Some(parent) = parent_subject(subjects, &chapter_id) {
            self.subject_id = Some(parent.id.clone());
        }
        self.chapter_id = Some(chapter_id);
    }

    #[must_use]
    pub fn matches(&self, card: &Card, strong: &StrongTopics) -> bool {
        let subject_ok = self
            .subject_id
            .as_ref()
            .is_none_or(|subject| &card.subject_id == subject);
        let chapter_ok = self
            .chapter_id
            .as_ref()
            .is_none_or(|chapter| &card.chapter_id == chapter);
        subject_ok && chapter_ok && self.strength.admits(card, strong)
    }

    /// Informational message to show when the selection matches nothing.
    #[must_use]
    pub fn empty_hint(&self) -> String {
        if self.strength != StrengthFilter::All {
            return format!("No {} topics found. Try a different filter.", self.strength);
        }
        if self.subject_id.is_some() || self.chapter_id.is_some() {
            return "Try selecting a different subject or chapter".to_string();
        }
        "Create your first flashcard to get started".to_string()
    }
}

/// Ordered subsequence of `cards` that satisfy `selection`.
#[must_use]
pub fn filter_cards(cards: &[Card], selection: &CardSelection, strong: &StrongTopics) -> Vec<Card> {
    cards
        .iter()
        .filter(|card| selection.matches(card, strong))
        .cloned()
        .collect()
}
