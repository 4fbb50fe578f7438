use influbazzar_macros::Record;
use serde::{Deserialize, Serialize};

/// A creator profile as shown on the discovery page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct Creator {
    #[record(Number, sort)]
    pub id: u32,

    #[record(String, search, sort)]
    pub name: String,

    #[record(String, search)]
    pub handle: String,

    #[record(String, search, filter)]
    pub category: String,

    #[record(String, filter)]
    pub location: String,

    #[record(Number, sort)]
    pub followers: u64,

    /// Engagement rate in percent.
    #[record(Number, sort)]
    pub engagement: f64,

    #[record(List, filter)]
    #[serde(default)]
    pub platforms: Vec<String>,

    /// Price per post in rupees.
    #[record(Number, sort)]
    pub rate: u32,

    #[record(Number, optional, sort)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[record(Bool, filter)]
    #[serde(default)]
    pub verified: bool,

    #[record(Nested)]
    #[serde(default)]
    pub audience: AudienceStats,
}

/// Audience breakdown, queried with dotted paths such as `audience.top_city`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct AudienceStats {
    #[record(String)]
    pub top_city: String,

    #[record(String)]
    pub age_band: String,

    /// Share of female followers in percent.
    #[record(Number)]
    pub female_share: f64,
}
