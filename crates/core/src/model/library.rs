use crate::model::card::Card;
use crate::model::ids::CardId;
use crate::model::strong::StrongTopics;
use crate::model::subject::Subject;

/// Everything the application persists: the card collection, the subject tree
/// and the strong-topic set. Loaded wholesale at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    pub cards: Vec<Card>,
    pub subjects: Vec<Subject>,
    pub strong_topics: StrongTopics,
}

/// Strong/weak badge counts shown next to the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicCounts {
    pub strong: usize,
    pub weak: usize,
}

impl Library {
    #[must_use]
    pub fn new(cards: Vec<Card>, subjects: Vec<Subject>, strong_topics: StrongTopics) -> Self {
        Self {
            cards,
            subjects,
            strong_topics,
        }
    }

    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Set the known flag on a card. Returns `None` if the card does not exist,
    /// otherwise whether the flag changed.
    pub fn set_known(&mut self, id: &CardId, known: bool) -> Option<bool> {
        let card = self.cards.iter_mut().find(|c| &c.id == id)?;
        let changed = card.known != known;
        card.known = known;
        Some(changed)
    }

    /// Weak is counted as total cards minus strong ids, saturating at zero, so
    /// stale strong ids lower the weak count.
    #[must_use]
    pub fn topic_counts(&self) -> TopicCounts {
        let strong = self.strong_topics.len();
        TopicCounts {
            strong,
            weak: self.cards.len().saturating_sub(strong),
        }
    }
}
