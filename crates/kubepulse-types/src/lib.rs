//! Shared types for kubepulse
//!
//! This crate contains the read-only views of cluster objects that the
//! reporter counts and inspects, plus the findings it reports about them.

use chrono::{DateTime, Utc};
use std::fmt;

// ============================================================================
// Kubernetes Resource Types
// ============================================================================

/// Namespace information
#[derive(Clone, Debug)]
pub struct NamespaceInfo {
    pub name: String,
    pub status: String,
}

impl NamespaceInfo {
    pub fn new(name: String, status: String) -> Self {
        Self { name, status }
    }
}

/// Node information
#[derive(Clone, Debug)]
pub struct NodeInfo {
    pub name: String,
}

impl NodeInfo {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

/// Pod information
#[derive(Clone, Debug)]
pub struct PodInfo {
    pub name: String,
    pub namespace: String,
    /// `None` when the pod reports no phase yet
    pub status: Option<PodStatus>,
    pub node_name: Option<String>,
    pub pod_ip: Option<String>,
}

impl PodInfo {
    pub fn new(name: String, namespace: String) -> Self {
        Self {
            name,
            namespace,
            status: None,
            node_name: None,
            pod_ip: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PodStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl PodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<&str> for PodStatus {
    fn from(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Running" => Self::Running,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cluster event information
#[derive(Clone, Debug)]
pub struct EventInfo {
    pub name: String,
    pub namespace: String,

    /// Most recent of eventTime, lastTimestamp and creationTimestamp
    pub timestamp: Option<DateTime<Utc>>,
}

impl EventInfo {
    pub fn new(name: String, namespace: String) -> Self {
        Self {
            name,
            namespace,
            timestamp: None,
        }
    }

    /// Whether the event happened at or after `since`.
    /// Events without any timestamp are never considered recent.
    pub fn is_since(&self, since: DateTime<Utc>) -> bool {
        self.timestamp.is_some_and(|ts| ts >= since)
    }
}

/// PersistentVolumeClaim information
#[derive(Clone, Debug)]
pub struct ClaimInfo {
    pub name: String,
    pub namespace: String,
    pub phase: ClaimPhase,
}

impl ClaimInfo {
    pub fn new(name: String, namespace: String, phase: ClaimPhase) -> Self {
        Self {
            name,
            namespace,
            phase,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClaimPhase {
    Pending,
    Bound,
    Lost,
    Unknown,
}

impl ClaimPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Bound => "Bound",
            Self::Lost => "Lost",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<&str> for ClaimPhase {
    fn from(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Bound" => Self::Bound,
            "Lost" => Self::Lost,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ClaimPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Findings
// ============================================================================

/// A policy observation about the cluster.
///
/// Findings are expected outcomes of a sweep, not failures of it; their
/// display text is the line printed in the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Finding {
    NoNodes,
    ClaimNotInPhase { name: String, expected: ClaimPhase },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoNodes => f.write_str("There are no nodes in the Kubernetes cluster"),
            Self::ClaimNotInPhase { name, expected } => write!(
                f,
                "PersistentVolumeClaim {} is not in expected phase {}",
                name, expected
            ),
        }
    }
}

impl Finding {
    /// Check a claim against the phase every claim is expected to reach
    pub fn check_claim(claim: &ClaimInfo, expected: ClaimPhase) -> Option<Self> {
        (claim.phase != expected).then(|| Self::ClaimNotInPhase {
            name: claim.name.clone(),
            expected,
        })
    }
}
