//! Built-in starter content used when nothing (or nothing readable) is persisted.

use crate::model::{Card, CardId, ChapterId, Library, StrongTopics, Subject, SubjectId};

#[must_use]
pub fn default_subjects() -> Vec<Subject> {
    vec![
        Subject::new(SubjectId::new("math"), "Mathematics")
            .with_chapter(ChapterId::new("algebra"), "Algebra")
            .with_chapter(ChapterId::new("geometry"), "Geometry")
            .with_chapter(ChapterId::new("calculus"), "Calculus"),
        Subject::new(SubjectId::new("science"), "Science")
            .with_chapter(ChapterId::new("physics"), "Physics")
            .with_chapter(ChapterId::new("chemistry"), "Chemistry")
            .with_chapter(ChapterId::new("biology"), "Biology"),
        Subject::new(SubjectId::new("history"), "History")
            .with_chapter(ChapterId::new("ancient"), "Ancient History")
            .with_chapter(ChapterId::new("medieval"), "Medieval History")
            .with_chapter(ChapterId::new("modern"), "Modern History"),
    ]
}

const DEFAULT_CARDS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "1",
        "math",
        "geometry",
        "What is the Pythagorean theorem?",
        "In a right triangle, the square of the length of the hypotenuse equals the sum of the squares of the lengths of the other two sides. (a² + b² = c²)",
    ),
    (
        "2",
        "math",
        "algebra",
        "What is the quadratic formula?",
        "For a quadratic equation ax² + bx + c = 0, the solutions are x = (-b ± √(b² - 4ac)) / 2a",
    ),
    (
        "3",
        "math",
        "calculus",
        "What is the derivative of sin(x)?",
        "The derivative of sin(x) is cos(x)",
    ),
    (
        "4",
        "science",
        "physics",
        "What is Newton's First Law of Motion?",
        "An object at rest stays at rest and an object in motion stays in motion with the same speed and direction unless acted upon by an unbalanced force.",
    ),
    (
        "5",
        "science",
        "chemistry",
        "What is the periodic table?",
        "A tabular arrangement of chemical elements, organized by atomic number, electron configuration, and recurring chemical properties.",
    ),
    (
        "6",
        "science",
        "biology",
        "What is photosynthesis?",
        "The process by which green plants and some other organisms use sunlight to synthesize foods with carbon dioxide and water.",
    ),
    (
        "7",
        "history",
        "ancient",
        "When was the Great Pyramid of Giza built?",
        "Around 2560 BCE during Egypt's Old Kingdom period.",
    ),
    (
        "8",
        "history",
        "medieval",
        "What was the Magna Carta?",
        "A charter of rights agreed to by King John of England in 1215 CE, limiting the monarch's power and establishing that everyone is subject to the law.",
    ),
    (
        "9",
        "history",
        "modern",
        "When did World War II end?",
        "World War II ended in 1945 with the surrender of Germany in May and Japan in September.",
    ),
];

#[must_use]
pub fn default_cards() -> Vec<Card> {
    DEFAULT_CARDS
        .iter()
        .map(|&(id, subject, chapter, question, answer)| {
            Card::new(
                CardId::new(id),
                question,
                answer,
                SubjectId::new(subject),
                ChapterId::new(chapter),
            )
        })
        .collect()
}

#[must_use]
pub fn default_library() -> Library {
    Library::new(default_cards(), default_subjects(), StrongTopics::new())
}
