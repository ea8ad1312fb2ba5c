//! Weather provider integration: client, response model, and report text.

pub mod client;
pub mod model;
pub mod report;

pub use client::ForecastClient;
pub use model::ForecastSnapshot;
pub use report::{render, ReportMode};
