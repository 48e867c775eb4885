use tracing::{debug, warn};

use kubepulse_k8s::{ApiError, ClusterApi};
use kubepulse_types::{ClaimInfo, EventInfo, NamespaceInfo, NodeInfo, PodInfo};

use crate::ReportConfig;

/// Results of one sweep over the cluster.
///
/// Every query keeps its own outcome, so one failure never hides the others.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub pods: Result<Vec<PodInfo>, ApiError>,
    pub namespaces: Result<Vec<NamespaceInfo>, ApiError>,
    pub nodes: Result<Vec<NodeInfo>, ApiError>,
    pub events: Result<Vec<EventInfo>, ApiError>,
    pub claims: Result<Vec<ClaimInfo>, ApiError>,

    /// The pod named in the config
    pub target: Result<PodInfo, ApiError>,
}

impl Snapshot {
    /// Run every query in order, one at a time
    pub async fn collect<A>(api: &A, config: &ReportConfig) -> Self
    where
        A: ClusterApi + ?Sized,
    {
        let pods = logged("pods", api.list_pods().await);
        let namespaces = logged("namespaces", api.list_namespaces().await);
        let nodes = logged("nodes", api.list_nodes().await);
        let events = logged("events", api.list_events().await);
        let claims = logged("persistent volume claims", api.list_claims().await);

        let target = api.get_pod(&config.namespace, &config.pod_name).await;
        if let Err(e) = &target {
            debug!(
                namespace = %config.namespace,
                pod = %config.pod_name,
                error = %e,
                "Pod lookup failed"
            );
        }

        Self {
            pods,
            namespaces,
            nodes,
            events,
            claims,
            target,
        }
    }
}

fn logged<T>(kind: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        warn!(kind, error = %e, "Failed to list resources");
    }
    result
}
