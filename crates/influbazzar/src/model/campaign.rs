use std::fmt;

use influbazzar_macros::Record;
use influbazzar_query::RecordEnum;
use serde::{Deserialize, Serialize};

/// Lifecycle of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

impl RecordEnum for CampaignStatus {
    fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "Draft",
            CampaignStatus::Active => "Active",
            CampaignStatus::Paused => "Paused",
            CampaignStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A brand campaign open to creators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct Campaign {
    #[record(Number, sort)]
    pub id: u32,

    #[record(String, search, sort)]
    pub title: String,

    #[record(String, search, filter)]
    pub brand: String,

    #[record(String, filter)]
    pub category: String,

    #[record(Enum, filter, sort)]
    pub status: CampaignStatus,

    /// Total budget in rupees.
    #[record(Number, sort)]
    pub budget: u64,

    /// ISO date (`YYYY-MM-DD`), so text order is date order.
    #[record(String, sort)]
    pub deadline: String,

    #[record(List, filter)]
    #[serde(default)]
    pub platforms: Vec<String>,

    #[record(Number, sort)]
    #[serde(default)]
    pub applicants: u32,

    #[record(String, search)]
    #[serde(default)]
    pub description: String,
}
