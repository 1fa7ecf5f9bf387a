//! # Barkeep - Recipe-Matching and Session Engine
//!
//! **Barkeep** is the engine behind an interactive drink-mixing game: a user
//! answers a fixed sequence of flavor questions (or places ingredients
//! freely into the glass), the accumulated choices are matched against an
//! ordered table of known recipes, and a star-rated outcome with narrative
//! feedback is produced. Finished rounds are relayed fire-and-forget to an
//! external collection sink, and an optional image-recognition loop lets the
//! user confirm the drink they made.
//!
//! ## Core Workflow
//!
//! 1.  **Identify**: a [`session::Session`] starts once a non-empty user
//!     identifier is provided.
//! 2.  **Collect**: each choice (or placement) lands in the
//!     [`selection::SelectionSet`]; the session tracks the step pointer and
//!     gates what is reachable.
//! 3.  **Serve**: the explicit confirmation runs the
//!     [`evaluator::Evaluator`] — a pure, total, first-match-wins walk over
//!     the [`recipe::RecipeBook`] — and carries the result into the served
//!     phase.
//! 4.  **Report**: the [`report::SessionReporter`] posts the flattened
//!     session to the external form sink without ever blocking or failing a
//!     transition.
//!
//! ## Quick Start
//!
//! ```rust
//! use barkeep::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let evaluator = Evaluator::house();
//!
//!     let mut session = Session::new();
//!     session.identify("001")?;
//!     session.choose("rum-family")?;
//!     session.choose("citrus-juice")?;
//!     session.choose("soda")?;
//!     session.choose("mint")?;
//!     session.choose("citrus-wedge")?;
//!     session.choose("chilled")?;
//!
//!     let evaluation = session.serve(&evaluator)?;
//!     assert_eq!(evaluation.outcome.name, "Mojito");
//!     assert_eq!(evaluation.outcome.stars, 3);
//!
//!     session.reset();
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod evaluator;
pub mod ingredient;
pub mod prelude;
pub mod recipe;
pub mod report;
pub mod selection;
pub mod session;
pub mod vision;
