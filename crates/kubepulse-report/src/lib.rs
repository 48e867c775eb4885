//! Cluster reporting for kubepulse
//!
//! This crate runs the sweep of cluster queries, renders the results into
//! report lines, and drives the fixed-interval poll loop.

mod config;
mod render;
mod reporter;
mod snapshot;

pub use config::ReportConfig;
pub use render::{SEPARATOR, humanize_duration, render};
pub use reporter::Reporter;
pub use snapshot::Snapshot;

// Re-export types used in our public API
pub use kubepulse_k8s::{ApiError, ClusterApi};
pub use kubepulse_types::Finding;
