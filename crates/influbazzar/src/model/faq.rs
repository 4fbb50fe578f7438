use influbazzar_macros::Record;
use serde::{Deserialize, Serialize};

/// A help-center question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
pub struct Faq {
    #[record(Number, sort)]
    pub id: u32,

    #[record(String, search, sort)]
    pub question: String,

    #[record(String, search)]
    pub answer: String,

    #[record(String, filter)]
    pub category: String,
}
