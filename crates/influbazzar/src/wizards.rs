//! The campaign-creation and creator-signup forms.
//!
//! Each form is a plain struct filled in step by step; the step validators
//! below decide when the user may move on. [`replay`] drives a filled-in
//! form through its wizard the way a user pressing "Next" would, which is
//! what the `wizard` command reports on.

use chrono::NaiveDate;
use influbazzar_wizard::{Step, Wizard, WizardBuilder, WizardError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::actions::{self, ActionError, Receipt};

/// Smallest campaign budget accepted, in rupees.
pub const MIN_BUDGET: u64 = 5_000;

/// Longest creator bio accepted, in characters.
pub const MAX_BIO_LEN: usize = 300;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn present(s: &str) -> bool {
    !s.trim().is_empty()
}

// ============================================================================
// Campaign creation
// ============================================================================

/// The brand's "create campaign" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignForm {
    pub title: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    /// Budget in rupees.
    pub budget: u64,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`, after the start date.
    pub deadline: String,
    pub platforms: Vec<String>,
    pub deliverables: String,
    pub min_followers: u64,
    pub accept_terms: bool,
}

/// Steps of the campaign form: Basics, Budget & Timeline, Requirements, Review.
pub fn campaign_steps() -> Vec<Step<CampaignForm>> {
    vec![
        Step::new("Basics")
            .require(|f: &CampaignForm| present(&f.title), "Campaign title is required")
            .require(|f: &CampaignForm| present(&f.brand), "Brand name is required")
            .require(|f: &CampaignForm| present(&f.category), "Category is required")
            .require(
                |f: &CampaignForm| present(&f.description),
                "Description is required",
            ),
        Step::new("Budget & Timeline")
            .validate_with(|f: &CampaignForm| {
                if f.budget >= MIN_BUDGET {
                    Ok(())
                } else {
                    Err(format!("Budget must be at least ₹{}", MIN_BUDGET))
                }
            })
            .require(
                |f: &CampaignForm| parse_date(&f.start_date).is_some(),
                "Start date must be YYYY-MM-DD",
            )
            .require(
                |f: &CampaignForm| parse_date(&f.deadline).is_some(),
                "Deadline must be YYYY-MM-DD",
            )
            .validate_with(|f: &CampaignForm| {
                match (parse_date(&f.start_date), parse_date(&f.deadline)) {
                    (Some(start), Some(deadline)) if deadline <= start => {
                        Err("Deadline must be after the start date".to_string())
                    }
                    _ => Ok(()),
                }
            }),
        Step::new("Requirements")
            .require(
                |f: &CampaignForm| f.platforms.iter().any(|p| present(p)),
                "Select at least one platform",
            )
            .require(
                |f: &CampaignForm| present(&f.deliverables),
                "Deliverables are required",
            ),
        Step::new("Review").require(
            |f: &CampaignForm| f.accept_terms,
            "Accept the terms to publish",
        ),
    ]
}

/// Starts the campaign wizard on a form.
pub fn campaign_wizard(form: CampaignForm) -> Result<Wizard<CampaignForm>, WizardError> {
    with_steps(campaign_steps()).start(form)
}

// ============================================================================
// Creator signup
// ============================================================================

/// The creator signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    /// Ten-digit mobile number.
    pub phone: String,
    /// Code entered on the verification step.
    pub otp: String,
    pub category: String,
    pub location: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
}

/// Steps of the signup form: Account, Verification, Profile, Social.
///
/// With `expected_otp` set the verification step checks the entered code
/// against it; otherwise only its shape is checked.
pub fn signup_steps(expected_otp: Option<String>) -> Vec<Step<SignupForm>> {
    vec![
        Step::new("Account")
            .require(|f: &SignupForm| present(&f.name), "Full name is required")
            .require(
                |f: &SignupForm| EMAIL.is_match(f.email.trim()),
                "Enter a valid email address",
            )
            .require(
                |f: &SignupForm| is_digits(f.phone.trim(), 10),
                "Phone number must be 10 digits",
            ),
        Step::new("Verification").validate_with(move |f: &SignupForm| {
            let checked = match &expected_otp {
                Some(expected) => actions::verify_otp(expected, &f.otp).map(|_| ()),
                None if actions::is_otp(f.otp.trim()) => Ok(()),
                None => Err(ActionError::MalformedOtp),
            };
            checked.map_err(|e| e.to_string())
        }),
        Step::new("Profile")
            .require(|f: &SignupForm| present(&f.category), "Category is required")
            .require(|f: &SignupForm| present(&f.location), "Location is required")
            .validate_with(|f: &SignupForm| {
                let len = f.bio.chars().count();
                if len <= MAX_BIO_LEN {
                    Ok(())
                } else {
                    Err(format!(
                        "Bio is {} characters, the limit is {}",
                        len, MAX_BIO_LEN
                    ))
                }
            }),
        Step::new("Social").require(
            |f: &SignupForm| {
                [&f.instagram, &f.youtube]
                    .into_iter()
                    .flatten()
                    .any(|handle| present(handle))
            },
            "Link at least one social account",
        ),
    ]
}

/// Starts the signup wizard on a form.
pub fn signup_wizard(
    form: SignupForm,
    expected_otp: Option<String>,
) -> Result<Wizard<SignupForm>, WizardError> {
    with_steps(signup_steps(expected_otp)).start(form)
}

/// Receipt for a completed signup.
pub fn complete_signup(form: &SignupForm) -> Receipt {
    Receipt {
        reference: format!("creator-{}", actions::slug(&form.name)),
        message: format!("Welcome to Influbazzar, {}!", form.name.trim()),
    }
}

fn with_steps<F>(steps: Vec<Step<F>>) -> WizardBuilder<F> {
    steps
        .into_iter()
        .fold(Wizard::builder(), |builder, step| builder.step(step))
}

// ============================================================================
// Replay
// ============================================================================

/// Outcome of driving a filled-in form through a wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub wizard: String,
    pub steps: Vec<String>,
    /// 1-based number of the step the replay stopped on.
    pub reached: usize,
    pub step: String,
    pub progress: u8,
    pub submitted: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<Receipt>,
}

impl ReplayReport {
    /// Plain-text summary.
    pub fn to_text(&self) -> String {
        let mut lines = vec![format!(
            "{} wizard: step {} of {} ({}), {}% complete",
            self.wizard,
            self.reached,
            self.steps.len(),
            self.step,
            self.progress
        )];
        if self.submitted {
            lines.push("Submitted.".to_string());
        }
        lines.extend(self.errors.iter().map(|e| format!("  - {}", e)));
        if let Some(receipt) = &self.receipt {
            lines.push(format!("{} [{}]", receipt.message, receipt.reference));
        }
        lines.join("\n")
    }
}

/// Presses "Next" until a step blocks or the last step is reached, then
/// submits and runs `on_submit` on the accepted form.
pub fn replay<F, A>(name: &str, mut wizard: Wizard<F>, on_submit: A) -> ReplayReport
where
    A: FnOnce(&F) -> Result<Receipt, ActionError>,
{
    let mut errors = Vec::new();
    let mut receipt = None;

    while !wizard.is_last() {
        if let Err(err) = wizard.next() {
            debug!(wizard = name, %err, "replay stopped");
            errors = blocking_errors(err);
            break;
        }
    }

    if errors.is_empty() {
        match wizard.submit() {
            Ok(form) => match on_submit(form) {
                Ok(r) => {
                    info!(wizard = name, reference = %r.reference, "form submitted");
                    receipt = Some(r);
                }
                Err(err) => errors.push(err.to_string()),
            },
            Err(err) => errors = blocking_errors(err),
        }
    }

    ReplayReport {
        wizard: name.to_string(),
        steps: wizard.step_names().into_iter().map(String::from).collect(),
        reached: wizard.step_number(),
        step: wizard.step_name().to_string(),
        progress: wizard.progress(),
        submitted: wizard.is_submitted(),
        errors,
        receipt,
    }
}

fn blocking_errors(err: WizardError) -> Vec<String> {
    match err {
        WizardError::InvalidStep { errors, .. } => errors,
        other => vec![other.to_string()],
    }
}
