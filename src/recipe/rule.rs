use crate::ingredient::{IngredientKey, NO_CHOICE};
use crate::selection::SelectionSet;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The narrative payload attached to a matched (or failed) drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Customer satisfaction, 0 through 3 stars.
    pub stars: u8,
    /// Display name of the drink.
    pub name: String,
    /// Identifier of the illustration shown with the result.
    pub image: String,
    /// What the customer says when handed the drink.
    pub dialogue: String,
}

impl Outcome {
    pub fn new(stars: u8, name: &str, image: &str, dialogue: &str) -> Self {
        Self {
            stars,
            name: name.to_string(),
            image: image.to_string(),
            dialogue: dialogue.to_string(),
        }
    }
}

/// One fixed reference combination of required choices mapped to an outcome.
///
/// Rules are immutable configuration data; nothing mutates them at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRule {
    /// The exact label required per key. A [`NO_CHOICE`] entry requires the
    /// user to have declined (or never reached) that key.
    pub requires: AHashMap<IngredientKey, String>,
    pub outcome: Outcome,
}

impl RecipeRule {
    /// Builds a rule from the six required labels in step order.
    pub fn from_labels(labels: [&str; 6], outcome: Outcome) -> Self {
        let requires = IngredientKey::ALL
            .iter()
            .copied()
            .zip(labels)
            .map(|(key, label)| (key, label.to_string()))
            .collect();
        Self { requires, outcome }
    }

    /// Whether every required choice is matched exactly by `selection`.
    ///
    /// Comparison is case- and whitespace-sensitive string equality over all
    /// six keys; there is no partial credit.
    pub fn matches(&self, selection: &SelectionSet) -> bool {
        IngredientKey::ALL.iter().all(|key| {
            let required = self.requires.get(key).map(String::as_str).unwrap_or(NO_CHOICE);
            required == selection.choice(*key)
        })
    }
}
