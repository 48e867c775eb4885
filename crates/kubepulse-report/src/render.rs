//! Report rendering
//!
//! Turns a [`Snapshot`] into the text lines printed for one iteration.
//! Nothing here touches the network or the clock.

use std::time::Duration;

use chrono::{DateTime, Utc};

use kubepulse_k8s::ApiError;
use kubepulse_types::{ClaimInfo, ClaimPhase, EventInfo, Finding, NodeInfo, PodInfo};

use crate::{ReportConfig, Snapshot};

/// Printed after every report
pub const SEPARATOR: &str = "-----------------------------------";

/// Every claim is expected to settle in this phase
const EXPECTED_CLAIM_PHASE: ClaimPhase = ClaimPhase::Bound;

/// Render one iteration's report.
///
/// `now` anchors the event window, if one is configured.
pub fn render(snapshot: &Snapshot, config: &ReportConfig, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec!["Cluster status:".to_string()];

    lines.push(count_line(&snapshot.pods, "pods"));
    lines.push(count_line(&snapshot.namespaces, "namespaces"));
    lines.push(node_line(&snapshot.nodes));
    lines.push(event_line(&snapshot.events, config.event_window, now));
    lines.extend(claim_lines(&snapshot.claims));

    lines.push(String::new());
    lines.push("Detailed pod check:".to_string());
    lines.extend(pod_lines(&snapshot.target, &config.namespace, &config.pod_name));

    lines.push(String::new());
    lines.push(SEPARATOR.to_string());
    lines
}

/// Format a duration compactly, e.g. `1h`, `15m`, `90s`
pub fn humanize_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs > 0 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs > 0 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

fn error_line(kind: &str, error: &ApiError) -> String {
    format!("Error listing {}: {}", kind, error)
}

fn count_line<T>(result: &Result<Vec<T>, ApiError>, kind: &str) -> String {
    match result {
        Ok(items) => format!("There are {} {} in the cluster", items.len(), kind),
        Err(e) => error_line(kind, e),
    }
}

fn node_line(result: &Result<Vec<NodeInfo>, ApiError>) -> String {
    match result {
        Ok(nodes) if nodes.is_empty() => Finding::NoNodes.to_string(),
        Ok(nodes) => format!("There are {} nodes in the cluster", nodes.len()),
        Err(e) => error_line("nodes", e),
    }
}

fn event_line(
    result: &Result<Vec<EventInfo>, ApiError>,
    window: Option<Duration>,
    now: DateTime<Utc>,
) -> String {
    let events = match result {
        Ok(events) => events,
        Err(e) => return error_line("events", e),
    };

    match window {
        None => format!("There are {} events in the cluster", events.len()),
        Some(window) => {
            let since = chrono::Duration::from_std(window)
                .ok()
                .and_then(|w| now.checked_sub_signed(w))
                .unwrap_or(DateTime::<Utc>::MIN_UTC);
            let recent = events.iter().filter(|e| e.is_since(since)).count();

            format!(
                "There were {} events in the last {}",
                recent,
                humanize_duration(window)
            )
        }
    }
}

fn claim_lines(result: &Result<Vec<ClaimInfo>, ApiError>) -> Vec<String> {
    let claims = match result {
        Ok(claims) => claims,
        Err(e) => return vec![error_line("PersistentVolumeClaims", e)],
    };

    let mut lines = vec![format!(
        "There are {} PersistentVolumeClaims in the cluster",
        claims.len()
    )];
    lines.extend(
        claims
            .iter()
            .filter_map(|claim| Finding::check_claim(claim, EXPECTED_CLAIM_PHASE))
            .map(|finding| finding.to_string()),
    );
    lines
}

fn pod_lines(result: &Result<PodInfo, ApiError>, namespace: &str, name: &str) -> Vec<String> {
    match result {
        Ok(pod) => vec![
            format!("Found pod {} in namespace {}", name, namespace),
            format!(
                "Pod phase: {}",
                pod.status.map(|s| s.as_str()).unwrap_or_default()
            ),
            format!("Pod IP: {}", pod.pod_ip.as_deref().unwrap_or_default()),
            format!("Node: {}", pod.node_name.as_deref().unwrap_or_default()),
        ],
        Err(ApiError::NotFound) => {
            vec![format!("Pod {} not found in namespace {}", name, namespace)]
        }
        Err(ApiError::Api { message, .. }) => vec![format!(
            "Error getting pod {} in namespace {}: {}",
            name, namespace, message
        )],
        Err(ApiError::Transport(cause)) => vec![format!("Error getting pod info: {}", cause)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kubepulse_types::PodStatus;

    fn claim(name: &str, phase: ClaimPhase) -> ClaimInfo {
        ClaimInfo::new(name.to_string(), "default".to_string(), phase)
    }

    fn nodes(count: usize) -> Vec<NodeInfo> {
        (0..count)
            .map(|i| NodeInfo::new(format!("node-{i}")))
            .collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_count_line_reports_exact_length() {
        for n in [0usize, 1, 7, 1200] {
            let pods: Vec<PodInfo> = (0..n)
                .map(|i| PodInfo::new(format!("pod-{i}"), "default".to_string()))
                .collect();
            assert_eq!(
                count_line(&Ok(pods), "pods"),
                format!("There are {n} pods in the cluster")
            );
        }
    }

    #[test]
    fn test_count_line_error() {
        let result: Result<Vec<PodInfo>, ApiError> =
            Err(ApiError::Transport("connection refused".to_string()));
        assert_eq!(
            count_line(&result, "pods"),
            "Error listing pods: connection refused"
        );
    }

    #[test]
    fn test_node_line() {
        assert_eq!(
            node_line(&Ok(nodes(0))),
            "There are no nodes in the Kubernetes cluster"
        );
        assert_eq!(node_line(&Ok(nodes(1))), "There are 1 nodes in the cluster");
        assert_eq!(node_line(&Ok(nodes(3))), "There are 3 nodes in the cluster");
    }

    #[test]
    fn test_claim_lines_only_flag_unbound() {
        let claims = vec![
            claim("a", ClaimPhase::Bound),
            claim("b", ClaimPhase::Pending),
            claim("c", ClaimPhase::Bound),
            claim("d", ClaimPhase::Lost),
            claim("e", ClaimPhase::Unknown),
        ];

        let lines = claim_lines(&Ok(claims));
        assert_eq!(lines[0], "There are 5 PersistentVolumeClaims in the cluster");
        assert_eq!(
            lines[1..],
            [
                "PersistentVolumeClaim b is not in expected phase Bound",
                "PersistentVolumeClaim d is not in expected phase Bound",
                "PersistentVolumeClaim e is not in expected phase Bound",
            ]
        );
    }

    #[test]
    fn test_claim_lines_all_bound() {
        let lines = claim_lines(&Ok(vec![claim("a", ClaimPhase::Bound)]));
        assert_eq!(lines, ["There are 1 PersistentVolumeClaims in the cluster"]);
    }

    #[test]
    fn test_event_line_unfiltered() {
        let events = vec![
            EventInfo::new("a".to_string(), "default".to_string()),
            EventInfo::new("b".to_string(), "default".to_string()),
        ];
        assert_eq!(
            event_line(&Ok(events), None, now()),
            "There are 2 events in the cluster"
        );
    }

    #[test]
    fn test_event_line_windowed() {
        let at = |minutes_ago: i64| {
            let mut event = EventInfo::new("e".to_string(), "default".to_string());
            event.timestamp = Some(now() - chrono::Duration::minutes(minutes_ago));
            event
        };
        let events = vec![
            at(5),
            at(59),
            at(61),
            at(600),
            EventInfo::new("no-time".to_string(), "default".to_string()),
        ];

        assert_eq!(
            event_line(&Ok(events), Some(Duration::from_secs(3600)), now()),
            "There were 2 events in the last 1h"
        );
    }

    #[test]
    fn test_humanize_duration() {
        assert_eq!(humanize_duration(Duration::from_secs(3600)), "1h");
        assert_eq!(humanize_duration(Duration::from_secs(900)), "15m");
        assert_eq!(humanize_duration(Duration::from_secs(90)), "90s");
        assert_eq!(humanize_duration(Duration::from_secs(0)), "0s");
    }

    #[test]
    fn test_pod_lines_found() {
        let mut pod = PodInfo::new("web".to_string(), "shop".to_string());
        pod.status = Some(PodStatus::Running);
        pod.pod_ip = Some("10.1.2.3".to_string());
        pod.node_name = Some("worker-2".to_string());

        assert_eq!(
            pod_lines(&Ok(pod), "shop", "web"),
            [
                "Found pod web in namespace shop",
                "Pod phase: Running",
                "Pod IP: 10.1.2.3",
                "Node: worker-2",
            ]
        );
    }

    #[test]
    fn test_pod_lines_missing_fields_render_empty() {
        let pod = PodInfo::new("web".to_string(), "shop".to_string());

        assert_eq!(
            pod_lines(&Ok(pod), "shop", "web"),
            [
                "Found pod web in namespace shop",
                "Pod phase: ",
                "Pod IP: ",
                "Node: ",
            ]
        );
    }

    #[test]
    fn test_pod_lines_not_found() {
        assert_eq!(
            pod_lines(&Err(ApiError::NotFound), "shop", "web"),
            ["Pod web not found in namespace shop"]
        );
    }

    #[test]
    fn test_pod_lines_api_error_embeds_message() {
        let error = ApiError::Api {
            code: 403,
            message: "pods \"web\" is forbidden".to_string(),
        };
        assert_eq!(
            pod_lines(&Err(error), "shop", "web"),
            ["Error getting pod web in namespace shop: pods \"web\" is forbidden"]
        );
    }

    #[test]
    fn test_pod_lines_transport_error() {
        let error = ApiError::Transport("tls handshake eof".to_string());
        assert_eq!(
            pod_lines(&Err(error), "shop", "web"),
            ["Error getting pod info: tls handshake eof"]
        );
    }

    #[test]
    fn test_render_layout() {
        let snapshot = Snapshot {
            pods: Ok(vec![]),
            namespaces: Err(ApiError::Transport("timeout".to_string())),
            nodes: Ok(nodes(2)),
            events: Ok(vec![]),
            claims: Ok(vec![]),
            target: Err(ApiError::NotFound),
        };
        let config = ReportConfig {
            namespace: "ns".to_string(),
            pod_name: "p".to_string(),
            ..Default::default()
        };

        assert_eq!(
            render(&snapshot, &config, now()),
            [
                "Cluster status:",
                "There are 0 pods in the cluster",
                "Error listing namespaces: timeout",
                "There are 2 nodes in the cluster",
                "There are 0 events in the cluster",
                "There are 0 PersistentVolumeClaims in the cluster",
                "",
                "Detailed pod check:",
                "Pod p not found in namespace ns",
                "",
                SEPARATOR,
            ]
        );
    }
}
