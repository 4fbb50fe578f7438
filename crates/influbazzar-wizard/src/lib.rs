//! Linear multi-step forms.
//!
//! Campaign creation and creator signup are both walked as a fixed sequence
//! of steps over one accumulated form. This crate models that flow as a
//! small state machine: each [`Step`] carries validators, and the
//! [`Wizard`] only moves forward or submits when they pass.
//!
//! ```text
//! Step 1 ──next──▶ Step 2 ──next──▶ … ──next──▶ Step N ──submit──▶ Submitted
//!        ◀──back──        ◀──back──
//! ```
//!
//! - `next` requires the current step to be valid
//! - `back` is always allowed, except from the first step
//! - `go_to` jumps backward freely, forward only over valid steps
//! - `submit` requires every step to be valid and is terminal
//!
//! Nothing is persisted: the form lives in the wizard until it is taken out
//! with [`Wizard::into_form`].

mod error;
mod step;
mod wizard;

pub use error::{Result, WizardError};
pub use step::Step;
pub use wizard::{Wizard, WizardBuilder};
