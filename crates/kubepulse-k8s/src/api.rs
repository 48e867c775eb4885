use async_trait::async_trait;

use crate::ApiError;
use kubepulse_types::{ClaimInfo, EventInfo, NamespaceInfo, NodeInfo, PodInfo};

/// Read-only access to the cluster, as consumed by the reporter.
///
/// List operations span all namespaces and return every item the server
/// holds; implementations are responsible for exhausting pagination.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    async fn list_pods(&self) -> Result<Vec<PodInfo>, ApiError>;

    async fn list_namespaces(&self) -> Result<Vec<NamespaceInfo>, ApiError>;

    async fn list_nodes(&self) -> Result<Vec<NodeInfo>, ApiError>;

    async fn list_events(&self) -> Result<Vec<EventInfo>, ApiError>;

    async fn list_claims(&self) -> Result<Vec<ClaimInfo>, ApiError>;

    /// Fetch a single pod by exact identity
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<PodInfo, ApiError>;
}
