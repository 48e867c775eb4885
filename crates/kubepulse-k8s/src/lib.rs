//! Kubernetes client for kubepulse
//!
//! This crate provides the read-only view of the cluster that the reporter
//! sweeps: listing pods, namespaces, nodes, events and claims, and fetching
//! a single pod.

mod api;
mod client;
mod error;

pub use api::ClusterApi;
pub use client::KubeClient;
pub use error::ApiError;

// Re-export types that are used in our public API
pub use kubepulse_types::{
    ClaimInfo, ClaimPhase, EventInfo, NamespaceInfo, NodeInfo, PodInfo, PodStatus,
};
