//! Terminal presentation layer for the Bee Cycle dashboard.
//!
//! Renders the overview page (metric cards, monthly trend, category/region
//! breakdowns), the forecast placeholder page, and drives the synchronous
//! keyboard event loop.

pub mod app;
pub mod chart_view;
pub mod components;
pub mod forecast_view;
pub mod themes;

pub use dash_core as core;
pub use dash_runtime as runtime;
