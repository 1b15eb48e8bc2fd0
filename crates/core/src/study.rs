//! Flip-card study mode: self-assessed Know / Don't Know over a filtered deck.

use crate::model::{Card, CardId, Library};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyAction {
    Flip,
    Know,
    DontKnow,
    MarkStrong,
    Next,
    Previous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyOutcome {
    Flipped {
        showing_answer: bool,
    },
    Assessed {
        card_id: CardId,
        known: bool,
        known_changed: bool,
        strong_changed: bool,
    },
    MarkedStrong {
        card_id: CardId,
        changed: bool,
    },
    Moved {
        position: usize,
    },
    /// Nothing to study.
    Empty,
}

impl StudyOutcome {
    #[must_use]
    pub fn cards_changed(&self) -> bool {
        matches!(self, StudyOutcome::Assessed { known_changed: true, .. })
    }

    #[must_use]
    pub fn strong_topics_changed(&self) -> bool {
        matches!(
            self,
            StudyOutcome::Assessed {
                strong_changed: true,
                ..
            } | StudyOutcome::MarkedStrong { changed: true, .. }
        )
    }
}

/// Cursor over a fixed, unshuffled deck with wrap-around navigation.
///
/// "Know" sets the known flag and adds the card to strong topics. "Don't know"
/// clears the known flag but never removes a strong topic.
#[derive(Debug, Clone)]
pub struct StudySession {
    cards: Vec<Card>,
    cursor: usize,
    showing_answer: bool,
}

impl StudySession {
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            cursor: 0,
            showing_answer: false,
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Card> {
        self.cards.get(self.cursor)
    }

    /// 1-based position, 0 when empty.
    #[must_use]
    pub fn position(&self) -> usize {
        if self.cards.is_empty() { 0 } else { self.cursor + 1 }
    }

    #[must_use]
    pub fn showing_answer(&self) -> bool {
        self.showing_answer
    }

    pub fn apply(&mut self, action: StudyAction, library: &mut Library) -> StudyOutcome {
        let Some(card_id) = self.current().map(|card| card.id.clone()) else {
            return StudyOutcome::Empty;
        };

        match action {
            StudyAction::Flip => {
                self.showing_answer = !self.showing_answer;
                StudyOutcome::Flipped {
                    showing_answer: self.showing_answer,
                }
            }
            StudyAction::Know => {
                let outcome = self.assess(&card_id, true, library);
                self.step_forward();
                outcome
            }
            StudyAction::DontKnow => {
                let outcome = self.assess(&card_id, false, library);
                self.step_forward();
                outcome
            }
            StudyAction::MarkStrong => {
                let changed = library.strong_topics.mark(&card_id, true);
                StudyOutcome::MarkedStrong { card_id, changed }
            }
            StudyAction::Next => {
                self.step_forward();
                StudyOutcome::Moved {
                    position: self.position(),
                }
            }
            StudyAction::Previous => {
                self.step_back();
                StudyOutcome::Moved {
                    position: self.position(),
                }
            }
        }
    }

    fn assess(&mut self, card_id: &CardId, known: bool, library: &mut Library) -> StudyOutcome {
        let known_changed = library.set_known(card_id, known).unwrap_or(false);
        if let Some(card) = self.cards.get_mut(self.cursor) {
            card.known = known;
        }
        let strong_changed = known && library.strong_topics.mark(card_id, true);
        StudyOutcome::Assessed {
            card_id: card_id.clone(),
            known,
            known_changed,
            strong_changed,
        }
    }

    fn step_forward(&mut self) {
        self.showing_answer = false;
        self.cursor = if self.cursor + 1 < self.cards.len() {
            self.cursor + 1
        } else {
            0
        };
    }

    fn step_back(&mut self) {
        self.showing_answer = false;
        self.cursor = if self.cursor > 0 {
            self.cursor - 1
        } else {
            self.cards.len().saturating_sub(1)
        };
    }
}
