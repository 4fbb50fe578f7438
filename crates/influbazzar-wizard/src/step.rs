//! A named wizard step and its validators.

use std::fmt;

/// Validator function type.
type CheckFn<F> = Box<dyn Fn(&F) -> Result<(), String> + Send + Sync>;

/// One step of a wizard.
///
/// A step is valid when every validator passes against the accumulated
/// form. Validators run in the order they were added.
///
/// # Example
///
/// ```
/// use influbazzar_wizard::Step;
///
/// struct Basics {
///     title: String,
/// }
///
/// let step = Step::new("Basics")
///     .require(|f: &Basics| !f.title.trim().is_empty(), "Title is required");
///
/// assert!(!step.is_valid(&Basics { title: " ".into() }));
/// assert!(step.is_valid(&Basics { title: "Summer Glow".into() }));
/// ```
pub struct Step<F> {
    name: String,
    checks: Vec<CheckFn<F>>,
}

impl<F> Step<F> {
    /// Create a step with no validators (always valid).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checks: Vec::new(),
        }
    }

    /// Add a predicate that must hold, with the message shown when it doesn't.
    pub fn require<P>(mut self, predicate: P, message: impl Into<String>) -> Self
    where
        P: Fn(&F) -> bool + Send + Sync + 'static,
    {
        let message = message.into();
        self.checks.push(Box::new(move |form| {
            if predicate(form) {
                Ok(())
            } else {
                Err(message.clone())
            }
        }));
        self
    }

    /// Add a check that returns its own error message.
    pub fn validate_with<C>(mut self, check: C) -> Self
    where
        C: Fn(&F) -> Result<(), String> + Send + Sync + 'static,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// The step's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Messages of every failing validator.
    pub fn errors(&self, form: &F) -> Vec<String> {
        self.checks
            .iter()
            .filter_map(|check| check(form).err())
            .collect()
    }

    /// Whether every validator passes.
    pub fn is_valid(&self, form: &F) -> bool {
        self.checks.iter().all(|check| check(form).is_ok())
    }
}

impl<F> fmt::Debug for Step<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("validators", &self.checks.len())
            .finish()
    }
}
