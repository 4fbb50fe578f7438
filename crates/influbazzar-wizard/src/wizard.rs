//! The wizard state machine.

use std::fmt;

use tracing::{debug, info};

use crate::error::{Result, WizardError};
use crate::step::Step;

/// Builder for a [`Wizard`].
pub struct WizardBuilder<F> {
    steps: Vec<Step<F>>,
}

impl<F> WizardBuilder<F> {
    /// Append a step.
    pub fn step(mut self, step: Step<F>) -> Self {
        self.steps.push(step);
        self
    }

    /// Start the wizard on its first step with an initial form.
    ///
    /// Returns [`WizardError::NoSteps`] if no step was added.
    pub fn start(self, form: F) -> Result<Wizard<F>> {
        if self.steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        Ok(Wizard {
            steps: self.steps,
            current: 0,
            form,
            submitted: false,
        })
    }
}

/// A linear multi-step form.
///
/// The wizard holds the accumulated form `F` and a cursor over its steps.
/// Moving forward requires the current step to be valid; moving back is
/// always allowed except from the first step. Submission happens on the
/// last step, requires every step to be valid, and ends the wizard: every
/// later transition or edit fails with [`WizardError::AlreadySubmitted`].
///
/// Step numbers in the public API are 1-based.
///
/// # Example
///
/// ```
/// use influbazzar_wizard::{Step, Wizard, WizardError};
///
/// #[derive(Default)]
/// struct Signup {
///     email: String,
///     otp: String,
/// }
///
/// let mut wizard = Wizard::builder()
///     .step(Step::new("Account").require(|f: &Signup| f.email.contains('@'), "Email required"))
///     .step(Step::new("Verification").require(|f: &Signup| f.otp.len() == 6, "Enter the 6-digit code"))
///     .start(Signup::default())
///     .unwrap();
///
/// assert!(matches!(wizard.next(), Err(WizardError::InvalidStep { .. })));
///
/// wizard.form_mut().unwrap().email = "sneha@example.com".into();
/// wizard.next().unwrap();
/// assert_eq!(wizard.step_name(), "Verification");
///
/// wizard.form_mut().unwrap().otp = "123456".into();
/// wizard.submit().unwrap();
/// assert!(wizard.is_submitted());
/// ```
pub struct Wizard<F> {
    steps: Vec<Step<F>>,
    current: usize,
    form: F,
    submitted: bool,
}

impl<F> Wizard<F> {
    /// Start building a wizard.
    pub fn builder() -> WizardBuilder<F> {
        WizardBuilder { steps: Vec::new() }
    }

    // ========================================================================
    // State
    // ========================================================================

    /// The accumulated form.
    pub fn form(&self) -> &F {
        &self.form
    }

    /// Mutable access to the form for editing the current step's fields.
    pub fn form_mut(&mut self) -> Result<&mut F> {
        self.ensure_open()?;
        Ok(&mut self.form)
    }

    /// Consume the wizard and return the form.
    pub fn into_form(self) -> F {
        self.form
    }

    /// The current step number (1-based).
    pub fn step_number(&self) -> usize {
        self.current + 1
    }

    /// Total number of steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// The current step's name.
    pub fn step_name(&self) -> &str {
        self.steps[self.current].name()
    }

    /// Names of every step, in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    /// Whether the cursor is on the first step.
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    /// Whether the cursor is on the last step.
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    /// Whether the form has been submitted.
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Percentage of the flow reached, for progress bars.
    ///
    /// Step 2 of 4 reports 50; a submitted wizard reports 100.
    pub fn progress(&self) -> u8 {
        if self.submitted {
            return 100;
        }
        let percent = self.step_number() * 100 / self.steps.len();
        u8::try_from(percent).unwrap_or(100)
    }

    /// Failing validator messages for the current step.
    pub fn errors(&self) -> Vec<String> {
        self.steps[self.current].errors(&self.form)
    }

    /// Whether the current step's validators all pass.
    pub fn is_current_valid(&self) -> bool {
        self.steps[self.current].is_valid(&self.form)
    }

    /// Whether a given step (1-based) is valid against the current form.
    pub fn is_step_valid(&self, step: usize) -> Result<bool> {
        let index = self.index_of(step)?;
        Ok(self.steps[index].is_valid(&self.form))
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Advance to the next step if the current one is valid.
    ///
    /// Returns the new step number.
    pub fn next(&mut self) -> Result<usize> {
        self.ensure_open()?;
        if self.is_last() {
            return Err(WizardError::AtLastStep);
        }
        self.check(self.current)?;
        self.current += 1;
        debug!(step = self.step_number(), name = self.step_name(), "wizard advanced");
        Ok(self.step_number())
    }

    /// Return to the previous step. No validation is applied.
    ///
    /// Returns the new step number.
    pub fn back(&mut self) -> Result<usize> {
        self.ensure_open()?;
        if self.is_first() {
            return Err(WizardError::AtFirstStep);
        }
        self.current -= 1;
        debug!(step = self.step_number(), name = self.step_name(), "wizard went back");
        Ok(self.step_number())
    }

    /// Jump to a step (1-based).
    ///
    /// Backward jumps are free. Forward jumps require every step before the
    /// target to be valid; the first invalid one is reported.
    pub fn go_to(&mut self, step: usize) -> Result<usize> {
        self.ensure_open()?;
        let target = self.index_of(step)?;
        if target > self.current {
            for index in 0..target {
                self.check(index)?;
            }
        }
        self.current = target;
        debug!(step = self.step_number(), name = self.step_name(), "wizard jumped");
        Ok(self.step_number())
    }

    /// Submit the form from the last step.
    ///
    /// Every step must be valid. Submission is terminal.
    pub fn submit(&mut self) -> Result<&F> {
        self.ensure_open()?;
        if !self.is_last() {
            return Err(WizardError::NotAtLastStep);
        }
        for index in 0..self.steps.len() {
            self.check(index)?;
        }
        self.submitted = true;
        info!(steps = self.steps.len(), "wizard submitted");
        Ok(&self.form)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.submitted {
            Err(WizardError::AlreadySubmitted)
        } else {
            Ok(())
        }
    }

    fn check(&self, index: usize) -> Result<()> {
        let step = &self.steps[index];
        let errors = step.errors(&self.form);
        if errors.is_empty() {
            Ok(())
        } else {
            debug!(step = index + 1, name = step.name(), ?errors, "step blocked");
            Err(WizardError::invalid(step.name(), errors))
        }
    }

    fn index_of(&self, step: usize) -> Result<usize> {
        if step == 0 || step > self.steps.len() {
            return Err(WizardError::StepOutOfRange {
                step,
                count: self.steps.len(),
            });
        }
        Ok(step - 1)
    }
}

impl<F: fmt::Debug> fmt::Debug for Wizard<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("steps", &self.step_names())
            .field("current", &self.step_number())
            .field("submitted", &self.submitted)
            .field("form", &self.form)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct CampaignForm {
        title: String,
        budget: u64,
        deliverables: Vec<String>,
    }

    fn wizard() -> Wizard<CampaignForm> {
        Wizard::builder()
            .step(Step::new("Basics").require(|f: &CampaignForm| !f.title.is_empty(), "Title is required"))
            .step(Step::new("Budget").require(|f: &CampaignForm| f.budget >= 5000, "Budget must be at least 5000"))
            .step(
                Step::new("Requirements")
                    .require(|f: &CampaignForm| !f.deliverables.is_empty(), "Add a deliverable"),
            )
            .step(Step::new("Review"))
            .start(CampaignForm::default())
            .unwrap()
    }

    fn fill(wizard: &mut Wizard<CampaignForm>) {
        let form = wizard.form_mut().unwrap();
        form.title = "Summer Glow".into();
        form.budget = 50000;
        form.deliverables = vec!["1 reel".into()];
    }

    #[test]
    fn no_steps_is_rejected() {
        let result = Wizard::<CampaignForm>::builder().start(CampaignForm::default());
        assert_eq!(result.err(), Some(WizardError::NoSteps));
    }

    #[test]
    fn starts_on_first_step() {
        let wizard = wizard();
        assert_eq!(wizard.step_number(), 1);
        assert_eq!(wizard.step_name(), "Basics");
        assert_eq!(wizard.step_count(), 4);
        assert_eq!(wizard.progress(), 25);
        assert!(wizard.is_first());
    }

    #[test]
    fn next_is_gated_by_validity() {
        let mut wizard = wizard();
        assert_eq!(
            wizard.next(),
            Err(WizardError::invalid("Basics", vec!["Title is required".into()]))
        );
        assert_eq!(wizard.step_number(), 1);

        wizard.form_mut().unwrap().title = "Summer Glow".into();
        assert_eq!(wizard.next(), Ok(2));
        assert_eq!(wizard.errors(), vec!["Budget must be at least 5000".to_string()]);
    }

    #[test]
    fn back_is_free_but_not_before_first() {
        let mut wizard = wizard();
        assert_eq!(wizard.back(), Err(WizardError::AtFirstStep));

        wizard.form_mut().unwrap().title = "Summer Glow".into();
        wizard.next().unwrap();
        wizard.form_mut().unwrap().title.clear();
        assert_eq!(wizard.back(), Ok(1));
    }

    #[test]
    fn next_on_last_step_asks_for_submit() {
        let mut wizard = wizard();
        fill(&mut wizard);
        wizard.go_to(4).unwrap();
        assert_eq!(wizard.next(), Err(WizardError::AtLastStep));
    }

    #[test]
    fn go_to_forward_checks_earlier_steps() {
        let mut wizard = wizard();
        wizard.form_mut().unwrap().title = "Summer Glow".into();
        assert_eq!(
            wizard.go_to(4),
            Err(WizardError::invalid(
                "Budget",
                vec!["Budget must be at least 5000".into()]
            ))
        );
        assert_eq!(wizard.go_to(2), Ok(2));
        assert_eq!(wizard.go_to(1), Ok(1));
        assert_eq!(
            wizard.go_to(9),
            Err(WizardError::StepOutOfRange { step: 9, count: 4 })
        );
        assert_eq!(
            wizard.go_to(0),
            Err(WizardError::StepOutOfRange { step: 0, count: 4 })
        );
    }

    #[test]
    fn submit_only_from_last_step() {
        let mut wizard = wizard();
        fill(&mut wizard);
        assert_eq!(wizard.submit().err(), Some(WizardError::NotAtLastStep));
    }

    #[test]
    fn submit_revalidates_every_step() {
        let mut wizard = wizard();
        fill(&mut wizard);
        wizard.go_to(4).unwrap();
        wizard.form_mut().unwrap().budget = 100;
        assert_eq!(
            wizard.submit().err(),
            Some(WizardError::invalid(
                "Budget",
                vec!["Budget must be at least 5000".into()]
            ))
        );
    }

    #[test]
    fn submit_is_terminal() {
        let mut wizard = wizard();
        fill(&mut wizard);
        for _ in 0..3 {
            wizard.next().unwrap();
        }
        let form = wizard.submit().unwrap().clone();
        assert_eq!(form.title, "Summer Glow");
        assert!(wizard.is_submitted());
        assert_eq!(wizard.progress(), 100);

        assert_eq!(wizard.submit().err(), Some(WizardError::AlreadySubmitted));
        assert_eq!(wizard.back(), Err(WizardError::AlreadySubmitted));
        assert_eq!(wizard.next(), Err(WizardError::AlreadySubmitted));
        assert_eq!(wizard.go_to(1), Err(WizardError::AlreadySubmitted));
        assert!(wizard.form_mut().is_err());
        assert_eq!(wizard.into_form(), form);
    }

    #[test]
    fn step_validity_lookup() {
        let mut wizard = wizard();
        assert_eq!(wizard.is_step_valid(4), Ok(true));
        assert_eq!(wizard.is_step_valid(1), Ok(false));
        wizard.form_mut().unwrap().title = "x".into();
        assert!(wizard.is_current_valid());
        assert!(wizard.is_step_valid(5).is_err());
    }

    #[test]
    fn error_message_joins_reasons() {
        let err = WizardError::invalid("Account", vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Step 'Account' is incomplete: a; b");
    }
}
