//! Marketplace entities and the list pages that show them.
//!
//! Each entity declares its searchable, filterable and sortable fields once
//! through `#[derive(Record)]`; [`Listing`] adds what the CLI needs to print
//! a page of them.

mod campaign;
mod creator;
mod earnings;
mod faq;

use std::fmt;

use clap::ValueEnum;
use influbazzar_query::Record;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub use campaign::{Campaign, CampaignStatus};
pub use creator::{AudienceStats, Creator};
pub use earnings::{balance, Balance, EarningsEntry, PaymentStatus};
pub use faq::Faq;

/// A record type with a list page.
pub trait Listing: Record + Serialize + DeserializeOwned {
    /// Plural name used in headings, e.g. `"creators"`.
    const PLURAL: &'static str;

    /// Fields shown as table columns in text output.
    const COLUMNS: &'static [&'static str];
}

impl Listing for Creator {
    const PLURAL: &'static str = "creators";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "handle",
        "category",
        "location",
        "followers",
        "engagement",
        "rate",
    ];
}

impl Listing for Campaign {
    const PLURAL: &'static str = "campaigns";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "brand",
        "category",
        "status",
        "budget",
        "deadline",
        "applicants",
    ];
}

impl Listing for EarningsEntry {
    const PLURAL: &'static str = "earnings";
    const COLUMNS: &'static [&'static str] =
        &["id", "date", "campaign", "brand", "amount", "status"];
}

impl Listing for Faq {
    const PLURAL: &'static str = "faqs";
    const COLUMNS: &'static [&'static str] = &["id", "category", "question"];
}

/// The collections the CLI can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Creators,
    Campaigns,
    Earnings,
    Faqs,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Creators => <Creator as Listing>::PLURAL,
            Collection::Campaigns => <Campaign as Listing>::PLURAL,
            Collection::Earnings => <EarningsEntry as Listing>::PLURAL,
            Collection::Faqs => <Faq as Listing>::PLURAL,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
