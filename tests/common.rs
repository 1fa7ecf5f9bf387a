//! Common test utilities for building selections and sessions.
use barkeep::prelude::*;

/// Builds a selection set from six labels in step order.
#[allow(dead_code)]
pub fn selection(labels: [&str; 6]) -> SelectionSet {
    let mut set = SelectionSet::new();
    for (key, label) in IngredientKey::ALL.iter().zip(labels) {
        set.set_choice(*key, label);
    }
    set
}

/// The exact Mojito combination from the house menu.
#[allow(dead_code)]
pub fn mojito_labels() -> [&'static str; 6] {
    ["rum-family", "citrus-juice", "soda", "mint", "citrus-wedge", "chilled"]
}

/// The exact Gin Fizz combination from the house menu.
#[allow(dead_code)]
pub fn gin_fizz_labels() -> [&'static str; 6] {
    ["gin-family", "citrus-juice", "soda", "none", "citrus-wedge", "chilled"]
}

/// A session driven through a full sequential round up to `Served`, with the
/// Mojito combination.
#[allow(dead_code)]
pub fn served_mojito_session(user_id: &str) -> Session {
    let evaluator = Evaluator::house();
    let mut session = Session::new();
    session.identify(user_id).expect("identify");
    for label in mojito_labels() {
        session.choose(label).expect("choose");
    }
    session.serve(&evaluator).expect("serve");
    session
}

/// A two-rule book where both rules match the same selection, to probe
/// priority ordering.
#[allow(dead_code)]
pub fn overlapping_book() -> RecipeBook {
    let labels = ["gin-family", "none", "none", "none", "none", "chilled"];
    RecipeBook::new(
        vec![
            RecipeRule::from_labels(labels, Outcome::new(1, "First", "first", "First one.")),
            RecipeRule::from_labels(labels, Outcome::new(3, "Second", "second", "Second one.")),
        ],
        Outcome::new(0, "Nothing", "nothing", "No match."),
    )
}
