use crate::recipe::{Outcome, RecipeBook};
use crate::selection::SelectionSet;

/// The result of matching a selection set against the recipe book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: Outcome,
    /// Index of the matched rule in declared order, `None` for the fallback.
    pub matched_rule: Option<usize>,
}

/// Matches completed selection sets against an ordered recipe table.
///
/// Evaluation is pure, deterministic and total: every selection set maps to
/// exactly one outcome, falling back to the zero-star unknown drink when no
/// rule's six required choices all match. The book's declared order is the
/// priority order; the first full match wins and later rules are not
/// consulted.
pub struct Evaluator {
    book: RecipeBook,
}

impl Evaluator {
    pub fn new(book: RecipeBook) -> Self {
        Self { book }
    }

    /// An evaluator over the built-in house menu.
    pub fn house() -> Self {
        Self::new(RecipeBook::house())
    }

    /// Walks the rules in declared order and returns the first full match,
    /// or the fallback outcome after exhausting the table.
    pub fn eval(&self, selection: &SelectionSet) -> Evaluation {
        match self
            .book
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(selection))
        {
            Some((index, rule)) => Evaluation {
                outcome: rule.outcome.clone(),
                matched_rule: Some(index),
            },
            None => Evaluation {
                outcome: self.book.fallback.clone(),
                matched_rule: None,
            },
        }
    }

    pub fn book(&self) -> &RecipeBook {
        &self.book
    }
}
