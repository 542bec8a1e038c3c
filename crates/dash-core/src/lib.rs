//! Core domain types for the Bee Cycle sales dashboard.
//!
//! Holds the typed sales record, the month bucket used by time-grouped
//! aggregation, the filter stage, the workspace-wide error type, CLI
//! settings, and display formatting helpers.

pub mod dates;
pub mod error;
pub mod filters;
pub mod formatting;
pub mod models;
pub mod settings;
