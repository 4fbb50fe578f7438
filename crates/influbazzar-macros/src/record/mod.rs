//! Implementation of the `#[derive(Record)]` macro.
//!
//! This module generates field accessors, field name constants and the
//! search/filter/sort schema from struct annotations.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
