//! Simulated platform actions.
//!
//! Publishing a campaign, checking an OTP and requesting a payout have no
//! backend here. Each action validates its input and returns a [`Receipt`]
//! or an [`ActionError`] immediately.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::wizards::{campaign_steps, CampaignForm};

/// Smallest payout a creator can request, in rupees.
pub const MIN_WITHDRAWAL: u64 = 500;

/// Confirmation of a completed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub reference: String,
    pub message: String,
}

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Campaign form is incomplete: {}", .0.join("; "))]
    InvalidForm(Vec<String>),

    #[error("OTP must be 6 digits")]
    MalformedOtp,

    #[error("OTP does not match")]
    OtpMismatch,

    #[error("Minimum withdrawal is ₹{minimum}, requested ₹{requested}")]
    BelowMinimum { minimum: u64, requested: u64 },

    #[error("Requested ₹{requested} exceeds the available balance of ₹{available}")]
    InsufficientBalance { available: u64, requested: u64 },
}

/// Publishes a campaign draft.
///
/// Every step of the campaign form must pass; all failures are reported
/// together.
pub fn submit_campaign(form: &CampaignForm) -> Result<Receipt, ActionError> {
    let errors: Vec<String> = campaign_steps()
        .iter()
        .flat_map(|step| step.errors(form))
        .collect();
    if !errors.is_empty() {
        return Err(ActionError::InvalidForm(errors));
    }
    let reference = format!("draft-{}", slug(&form.title));
    info!(%reference, brand = %form.brand, "campaign submitted");
    Ok(Receipt {
        reference,
        message: format!("Campaign \"{}\" saved as draft", form.title.trim()),
    })
}

/// Whether `code` has the shape of an OTP: exactly six ASCII digits.
pub fn is_otp(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

/// Checks an entered OTP against the one that was sent.
pub fn verify_otp(expected: &str, entered: &str) -> Result<Receipt, ActionError> {
    let entered = entered.trim();
    if !is_otp(entered) {
        return Err(ActionError::MalformedOtp);
    }
    if entered != expected.trim() {
        return Err(ActionError::OtpMismatch);
    }
    Ok(Receipt {
        reference: "otp-verified".to_string(),
        message: "Phone number verified".to_string(),
    })
}

/// Requests a payout from the available balance.
pub fn request_withdrawal(available: u64, amount: u64) -> Result<Receipt, ActionError> {
    if amount < MIN_WITHDRAWAL {
        return Err(ActionError::BelowMinimum {
            minimum: MIN_WITHDRAWAL,
            requested: amount,
        });
    }
    if amount > available {
        return Err(ActionError::InsufficientBalance {
            available,
            requested: amount,
        });
    }
    info!(amount, available, "withdrawal requested");
    Ok(Receipt {
        reference: format!("wd-{}", amount),
        message: format!(
            "Withdrawal of ₹{} requested, ₹{} remains available",
            amount,
            available - amount
        ),
    })
}

/// Lower-cased, dash-separated form of a title, e.g. `summer-glow-launch`.
pub fn slug(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
