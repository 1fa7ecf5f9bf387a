use crate::ingredient::{IngredientKey, NO_CHOICE};
use ahash::AHashMap;
use itertools::Itertools;

/// The user's accumulated ingredient choices for one round.
///
/// This is the only mutable record the interaction surface writes into. The
/// store performs no sequence validation; gating what is reachable is the
/// flow controller's concern.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    choices: AHashMap<IngredientKey, String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records or overwrites the choice for `key`.
    ///
    /// Empty and whitespace-only labels normalize to [`NO_CHOICE`] at this
    /// boundary, so the evaluator only ever sees canonical labels. Matching
    /// stays exact otherwise: labels are stored verbatim.
    pub fn set_choice(&mut self, key: IngredientKey, label: impl Into<String>) {
        let label = label.into();
        let canonical = if label.trim().is_empty() {
            NO_CHOICE.to_string()
        } else {
            label
        };
        self.choices.insert(key, canonical);
    }

    /// The stored label for `key`, or [`NO_CHOICE`] when the key was never
    /// set. A missing key and a declined key are indistinguishable here.
    pub fn choice(&self, key: IngredientKey) -> &str {
        self.choices.get(&key).map(String::as_str).unwrap_or(NO_CHOICE)
    }

    /// Whether an explicit choice (including an explicit decline) was made.
    pub fn is_set(&self, key: IngredientKey) -> bool {
        self.choices.contains_key(&key)
    }

    /// Number of keys with an explicit choice.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Clears every choice back to the initial state.
    pub fn reset(&mut self) {
        self.choices.clear();
    }

    /// One-line listing in step order, for the served-drink card.
    pub fn summary(&self) -> String {
        IngredientKey::ALL
            .iter()
            .map(|key| format!("{}: {}", key, self.choice(*key)))
            .join(", ")
    }
}
