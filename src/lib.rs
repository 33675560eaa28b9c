//! Core library for the `benchload` CLI.
//!
//! The binary parses arguments, then hands a validated [`args::RunSettings`]
//! to [`app::run_load`], which dispatches the requests, folds every outcome
//! into a [`metrics::RunAggregate`], and prints the summary and charts.
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod payload;
pub mod report;

#[cfg(test)]
mod test_support;
