//! Kubernetes client for kubepulse

use std::fmt::Debug;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Event, Namespace, Node, PersistentVolumeClaim, Pod};
use kube::Api;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use serde::de::DeserializeOwned;

use crate::{ApiError, ClusterApi};
use kubepulse_types::{
    ClaimInfo, ClaimPhase, EventInfo, NamespaceInfo, NodeInfo, PodInfo, PodStatus,
};

/// Items requested per list call; the continue token is followed until exhausted
const PAGE_SIZE: u32 = 500;

/// Kubernetes client wrapper
pub struct KubeClient {
    client: kube::Client,
}

impl KubeClient {
    /// Create a new KubeClient.
    ///
    /// With an explicit kubeconfig path its current context is used; without
    /// one the configuration is inferred (KUBECONFIG, ~/.kube/config, in-cluster).
    pub async fn new(kubeconfig: Option<&Path>) -> Result<Self> {
        let config = match kubeconfig {
            Some(path) => {
                let kubeconfig = Kubeconfig::read_from(path).with_context(|| {
                    format!("Failed to read kubeconfig from {}", path.display())
                })?;

                kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                    .await
                    .context(format!(
                        "Failed to create config from kubeconfig {}",
                        path.display()
                    ))?
            }
            None => kube::Config::infer()
                .await
                .context("Failed to load Kubernetes config. Is kubectl configured?")?,
        };

        tracing::debug!(cluster_url = %config.cluster_url, "Using Kubernetes API server");

        let client = kube::Client::try_from(config).context("Failed to create client")?;

        Ok(Self { client })
    }

    /// List every object of a kind, following continue tokens
    async fn list_all<K>(&self, api: Api<K>) -> Result<Vec<K>, ApiError>
    where
        K: Clone + DeserializeOwned + Debug,
    {
        let mut items = Vec::new();
        let mut params = ListParams::default().limit(PAGE_SIZE);

        loop {
            let page = api.list(&params).await?;
            items.extend(page.items);

            match page.metadata.continue_ {
                Some(token) if !token.is_empty() => {
                    tracing::debug!(fetched = items.len(), "Fetching next list page");
                    params = params.continue_token(&token);
                }
                _ => break,
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl ClusterApi for KubeClient {
    async fn list_pods(&self) -> Result<Vec<PodInfo>, ApiError> {
        let pods: Api<Pod> = Api::all(self.client.clone());
        let list = self.list_all(pods).await?;
        tracing::debug!(count = list.len(), "Listed pods");

        Ok(list.into_iter().map(pod_to_info).collect())
    }

    async fn list_namespaces(&self) -> Result<Vec<NamespaceInfo>, ApiError> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let list = self.list_all(namespaces).await?;
        tracing::debug!(count = list.len(), "Listed namespaces");

        Ok(list
            .into_iter()
            .map(|ns| {
                let name = ns.metadata.name.unwrap_or_default();
                let status = ns
                    .status
                    .and_then(|s| s.phase)
                    .unwrap_or_else(|| "Unknown".to_string());
                NamespaceInfo::new(name, status)
            })
            .collect())
    }

    async fn list_nodes(&self) -> Result<Vec<NodeInfo>, ApiError> {
        let nodes: Api<Node> = Api::all(self.client.clone());
        let list = self.list_all(nodes).await?;
        tracing::debug!(count = list.len(), "Listed nodes");

        Ok(list
            .into_iter()
            .map(|node| NodeInfo::new(node.metadata.name.unwrap_or_default()))
            .collect())
    }

    async fn list_events(&self) -> Result<Vec<EventInfo>, ApiError> {
        let events: Api<Event> = Api::all(self.client.clone());
        let list = self.list_all(events).await?;
        tracing::debug!(count = list.len(), "Listed events");

        Ok(list.into_iter().map(event_to_info).collect())
    }

    async fn list_claims(&self) -> Result<Vec<ClaimInfo>, ApiError> {
        let claims: Api<PersistentVolumeClaim> = Api::all(self.client.clone());
        let list = self.list_all(claims).await?;
        tracing::debug!(count = list.len(), "Listed persistent volume claims");

        Ok(list.into_iter().map(claim_to_info).collect())
    }

    async fn get_pod(&self, namespace: &str, name: &str) -> Result<PodInfo, ApiError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let pod = pods.get(name).await?;

        Ok(pod_to_info(pod))
    }
}

/// Convert a k8s Pod to PodInfo
fn pod_to_info(pod: Pod) -> PodInfo {
    let name = pod.metadata.name.unwrap_or_default();
    let namespace = pod.metadata.namespace.unwrap_or_default();
    let mut info = PodInfo::new(name, namespace);

    if let Some(spec) = pod.spec {
        info.node_name = spec.node_name;
    }

    if let Some(status) = pod.status {
        info.pod_ip = status.pod_ip;
        info.status = status.phase.as_deref().map(PodStatus::from);
    }

    info
}

/// Convert a k8s Event to EventInfo, keeping its most recent timestamp
fn event_to_info(event: Event) -> EventInfo {
    let timestamp = [
        event.event_time.map(|t| t.0),
        event.last_timestamp.map(|t| t.0),
        event.metadata.creation_timestamp.map(|t| t.0),
    ]
    .into_iter()
    .flatten()
    .max();

    let mut info = EventInfo::new(
        event.metadata.name.unwrap_or_default(),
        event.metadata.namespace.unwrap_or_default(),
    );
    info.timestamp = timestamp;
    info
}

/// Convert a k8s PersistentVolumeClaim to ClaimInfo
fn claim_to_info(claim: PersistentVolumeClaim) -> ClaimInfo {
    let phase = claim
        .status
        .and_then(|s| s.phase)
        .as_deref()
        .map(ClaimPhase::from)
        .unwrap_or(ClaimPhase::Unknown);

    ClaimInfo::new(
        claim.metadata.name.unwrap_or_default(),
        claim.metadata.namespace.unwrap_or_default(),
        phase,
    )
}
