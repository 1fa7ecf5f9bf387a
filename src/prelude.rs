//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the barkeep
//! crate. Import this module to get access to the core functionality without
//! having to import each type individually.
//!
//! # Example
//!
//! ```rust
//! use barkeep::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let evaluator = Evaluator::house();
//!
//! let mut session = Session::new();
//! session.identify("001")?;
//! for key in IngredientKey::ALL {
//!     session.choose(key.options()[0])?;
//! }
//! let evaluation = session.serve(&evaluator)?;
//! println!("{} ({} stars)", evaluation.outcome.name, evaluation.outcome.stars);
//! # Ok(())
//! # }
//! ```

// Core evaluation
pub use crate::evaluator::{Evaluation, Evaluator};
pub use crate::recipe::{Outcome, RecipeBook, RecipeRule};

// Selection state and flow control
pub use crate::ingredient::{IngredientKey, NO_CHOICE};
pub use crate::selection::SelectionSet;
pub use crate::session::{Phase, Session};

// Side channels
pub use crate::report::{ReportConfig, SessionReporter, form_fields};
pub use crate::vision::{
    CaptureDevice, Classifier, Frame, ModelLoader, Prediction, RecognitionOutcome,
    RecognitionSession, RecognitionTask,
};

// Error types
pub use crate::error::{FlowError, RecipeLoadError, ReportError, VisionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
