use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical label for a declined or not-yet-made choice.
///
/// Both interaction modes funnel into this single representation: a key that
/// was never set and a key explicitly declined compare equal during
/// evaluation.
pub const NO_CHOICE: &str = "none";

/// The six fixed ingredient decisions, in mixing-step order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IngredientKey {
    Base,
    Acidity,
    Carbonation,
    Flavor,
    Garnish,
    Ice,
}

impl IngredientKey {
    /// All keys in the order their steps are presented.
    pub const ALL: [IngredientKey; 6] = [
        IngredientKey::Base,
        IngredientKey::Acidity,
        IngredientKey::Carbonation,
        IngredientKey::Flavor,
        IngredientKey::Garnish,
        IngredientKey::Ice,
    ];

    /// The 0-based step at which this key is offered.
    pub fn step_index(&self) -> usize {
        match self {
            IngredientKey::Base => 0,
            IngredientKey::Acidity => 1,
            IngredientKey::Carbonation => 2,
            IngredientKey::Flavor => 3,
            IngredientKey::Garnish => 4,
            IngredientKey::Ice => 5,
        }
    }

    /// The key offered at `step`, if the step exists.
    pub fn from_step(step: usize) -> Option<IngredientKey> {
        Self::ALL.get(step).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientKey::Base => "base",
            IngredientKey::Acidity => "acidity",
            IngredientKey::Carbonation => "carbonation",
            IngredientKey::Flavor => "flavor",
            IngredientKey::Garnish => "garnish",
            IngredientKey::Ice => "ice",
        }
    }

    /// Parses the kebab-case key name used by external surfaces.
    pub fn parse(name: &str) -> Option<IngredientKey> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }

    /// The fixed option labels offered for this key, [`NO_CHOICE`] included
    /// where declining is allowed.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            IngredientKey::Base => &["gin-family", "rum-family"],
            IngredientKey::Acidity => &["citrus-juice", NO_CHOICE],
            IngredientKey::Carbonation => &["soda", "tonic", NO_CHOICE],
            IngredientKey::Flavor => &["honey", "mint", "orange-liqueur", NO_CHOICE],
            IngredientKey::Garnish => &["citrus-wedge", NO_CHOICE],
            IngredientKey::Ice => &["chilled", "blended"],
        }
    }
}

impl fmt::Display for IngredientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
