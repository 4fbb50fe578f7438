use std::fmt;

use influbazzar_macros::Record;
use influbazzar_query::RecordEnum;
use serde::{Deserialize, Serialize};

/// Payout state of an earnings entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Processing,
    Paid,
}

impl RecordEnum for PaymentStatus {
    fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Processing => "Processing",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of a creator's earnings history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct EarningsEntry {
    #[record(Number, sort)]
    pub id: u32,

    #[record(String, search, sort)]
    pub campaign: String,

    #[record(String, search, filter)]
    pub brand: String,

    /// Amount in rupees.
    #[record(Number, sort)]
    pub amount: u64,

    #[record(String, sort)]
    pub date: String,

    #[record(Enum, filter, sort)]
    pub status: PaymentStatus,
}

/// Sums the amounts that are paid out and those still on the way.
pub fn balance(entries: &[EarningsEntry]) -> Balance {
    entries
        .iter()
        .fold(Balance::default(), |mut balance, entry| {
            match entry.status {
                PaymentStatus::Paid => balance.available += entry.amount,
                PaymentStatus::Pending | PaymentStatus::Processing => {
                    balance.pending += entry.amount
                }
            }
            balance
        })
}

/// Available and pending totals in rupees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub available: u64,
    pub pending: u64,
}
