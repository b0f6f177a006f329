//! agentlens - Analytics core for agentic AI task-performance datasets
//!
//! This library normalizes raw CSV records into typed rows and computes the
//! figures behind a performance dashboard: grouped averages, Tukey boxplot
//! summaries, an ordinary least squares accuracy model, and top-N model
//! rankings.

pub mod aggregate;
pub mod boxplot;
pub mod bubble;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod dashboard;
pub mod filter;
pub mod ingest;
pub mod json_output;
pub mod ranking;
pub mod record;
pub mod regression;
pub mod stats;
