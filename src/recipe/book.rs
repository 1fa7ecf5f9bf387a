use super::rule::{Outcome, RecipeRule};
use crate::error::RecipeLoadError;
use crate::ingredient::IngredientKey;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;

/// An ordered rule table plus the fallback outcome returned when nothing
/// matches.
///
/// Declared order is priority order: the evaluator stops at the first rule
/// whose six required choices all match. The table is never sorted or
/// deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeBook {
    pub rules: Vec<RecipeRule>,
    pub fallback: Outcome,
}

impl RecipeBook {
    pub fn new(rules: Vec<RecipeRule>, fallback: Outcome) -> Self {
        Self { rules, fallback }
    }

    /// The built-in nine-drink table of the house menu.
    pub fn house() -> Self {
        let rules = vec![
            RecipeRule::from_labels(
                ["rum-family", "citrus-juice", "soda", "mint", "citrus-wedge", "chilled"],
                Outcome::new(
                    3,
                    "Mojito",
                    "mojito-result",
                    "Perfect — this is exactly the taste I was hoping for!",
                ),
            ),
            RecipeRule::from_labels(
                ["gin-family", "citrus-juice", "soda", "none", "citrus-wedge", "chilled"],
                Outcome::new(
                    2,
                    "Gin Fizz",
                    "gin-fizz-result",
                    "Close, but it seems to be missing a cool herbal note..",
                ),
            ),
            RecipeRule::from_labels(
                ["rum-family", "citrus-juice", "soda", "honey", "none", "chilled"],
                Outcome::new(
                    2,
                    "Canchanchara",
                    "canchanchara-result",
                    "There is a pleasant touch of honey, but a cool herbal note is missing.",
                ),
            ),
            RecipeRule::from_labels(
                ["gin-family", "citrus-juice", "none", "mint", "none", "chilled"],
                Outcome::new(
                    2,
                    "Southside",
                    "southside-result",
                    "Tart with a minty nose, but it could use some fizz.",
                ),
            ),
            RecipeRule::from_labels(
                ["gin-family", "none", "tonic", "none", "citrus-wedge", "chilled"],
                Outcome::new(
                    1,
                    "Gin & Tonic",
                    "gin-tonic-result",
                    "The bubbles are pleasant, but it is not tart enough.",
                ),
            ),
            RecipeRule::from_labels(
                ["rum-family", "citrus-juice", "none", "none", "citrus-wedge", "chilled"],
                Outcome::new(
                    1,
                    "Daiquiri",
                    "daiquiri-result",
                    "It is missing a cool herbal note, and there is no fizz at all.",
                ),
            ),
            RecipeRule::from_labels(
                ["gin-family", "citrus-juice", "none", "honey", "none", "chilled"],
                Outcome::new(
                    1,
                    "Bee's Knees",
                    "bees-knees-result",
                    "It is missing a cool herbal note, and there is no fizz at all.",
                ),
            ),
            RecipeRule::from_labels(
                ["gin-family", "citrus-juice", "none", "orange-liqueur", "none", "chilled"],
                Outcome::new(
                    1,
                    "White Lady",
                    "white-lady-result",
                    "It is missing a cool herbal note, and there is no fizz at all.",
                ),
            ),
            RecipeRule::from_labels(
                ["rum-family", "citrus-juice", "none", "none", "citrus-wedge", "blended"],
                Outcome::new(
                    1,
                    "Frozen Daiquiri",
                    "frozen-daiquiri-result",
                    "Blended ice drowns the fizz, and a cool herbal note is missing too.",
                ),
            ),
        ];

        let fallback = Outcome::new(
            0,
            "Unknown Drink",
            "angry-customer",
            "You threw in whatever you liked, and the customer stormed out!",
        );

        Self::new(rules, fallback)
    }

    /// Loads an external rule table from JSON, verifying that every rule
    /// specifies a required label for all six keys.
    pub fn from_json(json: &str) -> Result<Self, RecipeLoadError> {
        let book: RecipeBook = serde_json::from_str(json)?;
        book.validate()?;
        Ok(book)
    }

    /// Saves the book as a bincode artifact.
    pub fn save(&self, path: &str) -> Result<(), RecipeLoadError> {
        let bytes = encode_to_vec(self, standard())
            .map_err(|e| RecipeLoadError::Io(format!("Serialization failed: {}", e)))?;
        fs::write(path, bytes)
            .map_err(|e| RecipeLoadError::Io(format!("Could not write file '{}': {}", path, e)))
    }

    /// Loads a book from a bincode artifact.
    pub fn from_file(path: &str) -> Result<Self, RecipeLoadError> {
        let bytes = fs::read(path)
            .map_err(|e| RecipeLoadError::Io(format!("Could not read file '{}': {}", path, e)))?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes a book from a bincode artifact byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecipeLoadError> {
        let (book, _): (RecipeBook, usize) = decode_from_slice(bytes, standard())
            .map_err(|e| RecipeLoadError::Io(format!("Deserialization failed: {}", e)))?;
        book.validate()?;
        Ok(book)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn validate(&self) -> Result<(), RecipeLoadError> {
        for rule in &self.rules {
            for key in IngredientKey::ALL {
                if !rule.requires.contains_key(&key) {
                    return Err(RecipeLoadError::IncompleteRule {
                        rule_name: rule.outcome.name.clone(),
                        missing_key: key,
                    });
                }
            }
        }
        Ok(())
    }
}
