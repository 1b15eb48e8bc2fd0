mod card;
mod ids;
mod library;
mod strong;
mod subject;

pub use ids::{CardId, ChapterId, ParseIdError, SubjectId};

pub use card::{Card, CardDraft, CardError, ValidatedCard};
pub use library::{Library, TopicCounts};
pub use strong::StrongTopics;
pub use subject::{Chapter, Subject, find_subject, parent_subject};
