use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CardId, ChapterId, SubjectId};
use crate::model::subject::{Subject, find_subject};

//
// ─── CARD TYPES ────────────────────────────────────────────────────────────────
//

/// User input for the create-flashcard flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub question: String,
    pub answer: String,
    pub subject_id: SubjectId,
    pub chapter_id: ChapterId,
}

impl CardDraft {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        subject_id: SubjectId,
        chapter_id: ChapterId,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            subject_id,
            chapter_id,
        }
    }

    /// Validate the draft against the current subject tree.
    ///
    /// The chapter must belong to the subject at creation time; this is not
    /// re-checked later.
    ///
    /// # Errors
    ///
    /// Returns `CardError::EmptyQuestion` / `CardError::EmptyAnswer` for blank text,
    /// `CardError::UnknownSubject` if the subject is missing, and
    /// `CardError::ChapterNotInSubject` if the chapter belongs elsewhere.
    pub fn validate(self, subjects: &[Subject]) -> Result<ValidatedCard, CardError> {
        if self.question.trim().is_empty() {
            return Err(CardError::EmptyQuestion);
        }
        if self.answer.trim().is_empty() {
            return Err(CardError::EmptyAnswer);
        }

        let subject = find_subject(subjects, &self.subject_id)
            .ok_or_else(|| CardError::UnknownSubject(self.subject_id.clone()))?;
        if !subject.has_chapter(&self.chapter_id) {
            return Err(CardError::ChapterNotInSubject {
                chapter: self.chapter_id,
                subject: self.subject_id,
            });
        }

        Ok(ValidatedCard {
            question: self.question,
            answer: self.answer,
            subject_id: self.subject_id,
            chapter_id: self.chapter_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCard {
    pub question: String,
    pub answer: String,
    pub subject_id: SubjectId,
    pub chapter_id: ChapterId,
}

impl ValidatedCard {
    /// Turn the validated draft into a brand-new, not-yet-known card.
    #[must_use]
    pub fn assign_id(self, id: CardId) -> Card {
        Card {
            id,
            question: self.question,
            answer: self.answer,
            known: false,
            subject_id: self.subject_id,
            chapter_id: self.chapter_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub known: bool,
    pub subject_id: SubjectId,
    pub chapter_id: ChapterId,
}

impl Card {
    #[must_use]
    pub fn new(
        id: CardId,
        question: impl Into<String>,
        answer: impl Into<String>,
        subject_id: SubjectId,
        chapter_id: ChapterId,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
            known: false,
            subject_id,
            chapter_id,
        }
    }

    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }
}

//
// ─── CARD ERRORS ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("question cannot be empty")]
    EmptyQuestion,

    #[error("answer cannot be empty")]
    EmptyAnswer,

    #[error("unknown subject: {0}")]
    UnknownSubject(SubjectId),

    #[error("chapter {chapter} does not belong to subject {subject}")]
    ChapterNotInSubject {
        chapter: ChapterId,
        subject: SubjectId,
    },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects() -> Vec<Subject> {
        vec![
            Subject::new(SubjectId::new("math"), "Mathematics")
                .with_chapter(ChapterId::new("algebra"), "Algebra"),
            Subject::new(SubjectId::new("science"), "Science")
                .with_chapter(ChapterId::new("physics"), "Physics"),
        ]
    }

    fn draft(question: &str, answer: &str, subject: &str, chapter: &str) -> CardDraft {
        CardDraft::new(
            question,
            answer,
            SubjectId::new(subject),
            ChapterId::new(chapter),
        )
    }

    #[test]
    fn card_fails_if_question_blank() {
        let err = draft("   ", "x", "math", "algebra")
            .validate(&subjects())
            .unwrap_err();
        assert_eq!(err, CardError::EmptyQuestion);
    }

    #[test]
    fn card_fails_if_answer_blank() {
        let err = draft("2+2", "", "math", "algebra")
            .validate(&subjects())
            .unwrap_err();
        assert_eq!(err, CardError::EmptyAnswer);
    }

    #[test]
    fn card_fails_for_unknown_subject() {
        let err = draft("q", "a", "art", "algebra")
            .validate(&subjects())
            .unwrap_err();
        assert!(matches!(err, CardError::UnknownSubject(_)));
    }

    #[test]
    fn chapter_must_belong_to_subject() {
        let err = draft("q", "a", "math", "physics")
            .validate(&subjects())
            .unwrap_err();
        assert!(matches!(err, CardError::ChapterNotInSubject { .. }));
    }

    #[test]
    fn valid_card_starts_unknown() {
        let card = draft("2+2", "4", "math", "algebra")
            .validate(&subjects())
            .unwrap()
            .assign_id(CardId::new("c1"));
        assert_eq!(card.id(), &CardId::new("c1"));
        assert!(!card.known);
        assert_eq!(card.chapter_id, ChapterId::new("algebra"));
    }

    #[test]
    fn card_reads_persisted_json_shape() {
        let json = r#"{"id":"1","question":"q","answer":"a","known":true,"subjectId":"math","chapterId":"algebra"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert!(card.known);
        assert_eq!(card.subject_id, SubjectId::new("math"));
    }
}
