//! rhc - Reach Higher curriculum search.
//!
//! Ranks curriculum units against a free-text query using exact token
//! overlap, fuzzy string similarity, and (in the advanced variant) dense
//! embedding similarity.

pub mod app;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod search;

pub use error::{Result, RhcError};
