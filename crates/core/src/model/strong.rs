use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::ids::CardId;

/// Set of card ids last assessed as known ("strong").
///
/// Absence means "weak". Ids may go stale when a card disappears; there is no
/// cleanup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrongTopics(BTreeSet<CardId>);

impl StrongTopics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.0.contains(id)
    }

    /// Add or remove a card id. Returns true if the set changed.
    pub fn mark(&mut self, id: &CardId, strong: bool) -> bool {
        if strong {
            self.0.insert(id.clone())
        } else {
            self.0.remove(id)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardId> {
        self.0.iter()
    }
}

impl FromIterator<CardId> for StrongTopics {
    fn from_iter<I: IntoIterator<Item = CardId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_reports_changes() {
        let mut strong = StrongTopics::new();
        let id = CardId::new("1");
        assert!(strong.mark(&id, true));
        assert!(!strong.mark(&id, true));
        assert!(strong.contains(&id));
        assert!(strong.mark(&id, false));
        assert!(!strong.mark(&id, false));
        assert!(strong.is_empty());
    }

    #[test]
    fn persists_as_json_array() {
        let strong: StrongTopics = ["b", "a"].into_iter().map(CardId::new).collect();
        let json = serde_json::to_string(&strong).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
        let back: StrongTopics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, strong);
    }
}
