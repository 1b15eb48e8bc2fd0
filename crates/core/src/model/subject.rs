use serde::{Deserialize, Serialize};

use crate::model::ids::{ChapterId, SubjectId};

/// A chapter inside a subject. Carries a back-reference to its subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ChapterId,
    pub name: String,
    pub subject_id: SubjectId,
}

impl Chapter {
    #[must_use]
    pub fn new(id: ChapterId, name: impl Into<String>, subject_id: SubjectId) -> Self {
        Self {
            id,
            name: name.into(),
            subject_id,
        }
    }
}

/// A subject with its ordered chapters.
///
/// Subjects are static configuration loaded at startup; nothing in the quiz
/// or study flows mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub chapters: Vec<Chapter>,
}

impl Subject {
    #[must_use]
    pub fn new(id: SubjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            chapters: Vec::new(),
        }
    }

    /// Append a chapter, wiring its back-reference to this subject.
    #[must_use]
    pub fn with_chapter(mut self, id: ChapterId, name: impl Into<String>) -> Self {
        let chapter = Chapter::new(id, name, self.id.clone());
        self.chapters.push(chapter);
        self
    }

    #[must_use]
    pub fn chapter(&self, id: &ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn has_chapter(&self, id: &ChapterId) -> bool {
        self.chapter(id).is_some()
    }
}

/// Look up a subject by id.
#[must_use]
pub fn find_subject<'a>(subjects: &'a [Subject], id: &SubjectId) -> Option<&'a Subject> {
    subjects.iter().find(|s| &s.id == id)
}

/// Find the subject owning the given chapter.
#[must_use]
pub fn parent_subject<'a>(subjects: &'a [Subject], chapter: &ChapterId) -> Option<&'a Subject> {
    subjects.iter().find(|s| s.has_chapter(chapter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn math() -> Subject {
        Subject::new(SubjectId::new("math"), "Mathematics")
            .with_chapter(ChapterId::new("algebra"), "Algebra")
            .with_chapter(ChapterId::new("geometry"), "Geometry")
    }

    #[test]
    fn chapters_point_back_to_subject() {
        let subject = math();
        assert!(subject.chapters.iter().all(|c| c.subject_id == subject.id));
        assert_eq!(subject.chapters[1].name, "Geometry");
    }

    #[test]
    fn parent_subject_resolves_chapter_owner() {
        let subjects = vec![
            math(),
            Subject::new(SubjectId::new("science"), "Science")
                .with_chapter(ChapterId::new("physics"), "Physics"),
        ];
        let parent = parent_subject(&subjects, &ChapterId::new("physics")).unwrap();
        assert_eq!(parent.id, SubjectId::new("science"));
        assert!(parent_subject(&subjects, &ChapterId::new("poetry")).is_none());
    }

    #[test]
    fn subject_json_uses_camel_case_back_reference() {
        let json = serde_json::to_value(math()).unwrap();
        assert_eq!(json["chapters"][0]["subjectId"], "math");
    }
}
