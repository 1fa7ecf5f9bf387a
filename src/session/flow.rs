use crate::error::FlowError;
use crate::evaluator::{Evaluation, Evaluator};
use crate::ingredient::IngredientKey;
use crate::selection::SelectionSet;
use crate::vision::RecognitionOutcome;
use std::fmt;
use tracing::debug;

/// Which screen of the round is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for a user identifier.
    #[default]
    Unidentified,
    /// Collecting ingredient choices; `step` is the current step pointer.
    Collecting { step: usize },
    /// All choices made; waiting for the explicit serve confirmation.
    Finalizing,
    /// The drink has been evaluated and handed over. Terminal for the round.
    Served,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Unidentified => "unidentified",
            Phase::Collecting { .. } => "collecting",
            Phase::Finalizing => "finalizing",
            Phase::Served => "served",
        };
        write!(f, "{}", name)
    }
}

/// One round of the game as an explicit value.
///
/// Every transition is a `&mut self` handler returning a `Result`; a rejected
/// transition never mutates state. There are no ambient globals, so the flow
/// is fully testable without a rendering surface.
#[derive(Debug, Clone, Default)]
pub struct Session {
    phase: Phase,
    user_id: Option<String>,
    selection: SelectionSet,
    evaluation: Option<Evaluation>,
    recognition: Option<RecognitionOutcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn recognition(&self) -> Option<&RecognitionOutcome> {
        self.recognition.as_ref()
    }

    /// The key offered at the current step, while collecting.
    pub fn current_key(&self) -> Option<IngredientKey> {
        match self.phase {
            Phase::Collecting { step } => IngredientKey::from_step(step),
            _ => None,
        }
    }

    /// Starts the round. The identifier is trimmed; an empty or
    /// whitespace-only identifier is rejected without a state change.
    pub fn identify(&mut self, user_id: &str) -> Result<(), FlowError> {
        if self.phase != Phase::Unidentified {
            return Err(self.out_of_phase("identify"));
        }
        let trimmed = user_id.trim();
        if trimmed.is_empty() {
            return Err(FlowError::EmptyUserId);
        }
        self.user_id = Some(trimmed.to_string());
        self.phase = Phase::Collecting { step: 0 };
        debug!(user_id = trimmed, "session identified");
        Ok(())
    }

    /// Sequential variant: records `label` for the current step's key and
    /// advances exactly one step. After the last key the session moves to
    /// [`Phase::Finalizing`].
    pub fn choose(&mut self, label: &str) -> Result<(), FlowError> {
        let Phase::Collecting { step } = self.phase else {
            return Err(self.out_of_phase("choose"));
        };
        let Some(key) = IngredientKey::from_step(step) else {
            return Err(self.out_of_phase("choose"));
        };
        self.selection.set_choice(key, label);
        self.advance_to(step + 1);
        Ok(())
    }

    /// Assembly variant: places `label` for an arbitrary key, provided the
    /// key's step has not been passed yet. Accepting a key moves the step
    /// pointer to `max(step, key_step + 1)`; a key below the pointer is
    /// rejected with [`FlowError::SequenceViolation`] and no mutation.
    pub fn place(&mut self, key: IngredientKey, label: &str) -> Result<(), FlowError> {
        let Phase::Collecting { step } = self.phase else {
            return Err(self.out_of_phase("place"));
        };
        let key_step = key.step_index();
        if key_step < step {
            return Err(FlowError::SequenceViolation {
                key,
                key_step,
                current_step: step,
            });
        }
        self.selection.set_choice(key, label);
        self.advance_to(step.max(key_step + 1));
        Ok(())
    }

    /// Assembly variant: pours the glass out. Clears every choice and
    /// returns the step pointer to 0 while remaining in collection.
    pub fn pour_out(&mut self) -> Result<(), FlowError> {
        let Phase::Collecting { .. } = self.phase else {
            return Err(self.out_of_phase("pour_out"));
        };
        self.selection.reset();
        self.phase = Phase::Collecting { step: 0 };
        debug!("glass poured out, starting over");
        Ok(())
    }

    /// The explicit serve confirmation: evaluates the selection and moves to
    /// [`Phase::Served`], carrying the computed result.
    pub fn serve(&mut self, evaluator: &Evaluator) -> Result<&Evaluation, FlowError> {
        if self.phase != Phase::Finalizing {
            return Err(self.out_of_phase("serve"));
        }
        let evaluation = evaluator.eval(&self.selection);
        debug!(
            drink = %evaluation.outcome.name,
            stars = evaluation.outcome.stars,
            "drink served"
        );
        self.phase = Phase::Served;
        Ok(self.evaluation.insert(evaluation))
    }

    /// Attaches the confirmed recognition result to a served session. The
    /// computed drink result is never altered by this.
    pub fn attach_recognition(&mut self, outcome: RecognitionOutcome) -> Result<(), FlowError> {
        if self.phase != Phase::Served {
            return Err(self.out_of_phase("attach_recognition"));
        }
        debug!(label = %outcome.label, "recognition outcome attached");
        self.recognition = Some(outcome);
        Ok(())
    }

    /// The explicit restart: reverts every field to its initial value,
    /// regardless of the current phase.
    pub fn reset(&mut self) {
        self.phase = Phase::Unidentified;
        self.user_id = None;
        self.selection.reset();
        self.evaluation = None;
        self.recognition = None;
        debug!("session reset");
    }

    fn advance_to(&mut self, step: usize) {
        self.phase = if step >= IngredientKey::ALL.len() {
            Phase::Finalizing
        } else {
            Phase::Collecting { step }
        };
    }

    fn out_of_phase(&self, action: &'static str) -> FlowError {
        FlowError::OutOfPhase {
            action,
            phase: self.phase.to_string(),
        }
    }
}
