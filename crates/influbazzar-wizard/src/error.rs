//! Error types for wizard transitions.

/// Errors returned by wizard transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// A wizard needs at least one step.
    #[error("Wizard has no steps.")]
    NoSteps,

    /// The step blocking the transition has failing validators.
    #[error("Step '{step}' is incomplete: {}", .errors.join("; "))]
    InvalidStep { step: String, errors: Vec<String> },

    /// `back` was called on the first step.
    #[error("Already at the first step.")]
    AtFirstStep,

    /// `next` was called on the last step.
    #[error("Already at the last step; submit instead.")]
    AtLastStep,

    /// `submit` was called before reaching the last step.
    #[error("Submit is only available on the last step.")]
    NotAtLastStep,

    /// `go_to` named a step that does not exist.
    #[error("Step {step} is out of range (1..={count}).")]
    StepOutOfRange { step: usize, count: usize },

    /// The wizard was already submitted.
    #[error("Form was already submitted.")]
    AlreadySubmitted,
}

impl WizardError {
    /// Create an invalid-step error.
    pub fn invalid(step: impl Into<String>, errors: Vec<String>) -> Self {
        Self::InvalidStep {
            step: step.into(),
            errors,
        }
    }
}

/// Result type for wizard transitions.
pub type Result<T> = std::result::Result<T, WizardError>;
