//! # Influbazzar
//!
//! The list pages, forms and simulated actions of an influencer marketplace,
//! with a command-line front end.
//!
//! - [`model`]: creators, campaigns, earnings and FAQs, each declaring its
//!   searchable, filterable and sortable fields with `#[derive(Record)]`
//! - [`catalog`]: loading record files (JSON or YAML)
//! - [`wizards`]: the campaign-creation and creator-signup forms
//! - [`actions`]: publishing, OTP checks and withdrawals, with defined outcomes
//! - [`config`]: default page size and named query presets
//! - [`output`]: text tables and JSON / YAML / CSV serialization
//! - [`cli`]: the `influbazzar` command
//!
//! Querying itself lives in [`influbazzar_query`]; the step state machine in
//! [`influbazzar_wizard`].

pub mod actions;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod wizards;

pub use error::{AppError, Result};
