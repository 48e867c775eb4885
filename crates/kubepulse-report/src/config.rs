use std::time::Duration;

/// Namespace of the pod inspected in detail each sweep
const DEFAULT_NAMESPACE: &str = "default";

/// Pod inspected in detail each sweep
const DEFAULT_POD_NAME: &str = "alpine-deployment-548dbddc9b-dnq9r";

/// Pause between sweeps
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Reporter configuration, fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Namespace of the inspected pod
    pub namespace: String,
    /// Name of the inspected pod
    pub pod_name: String,
    /// Sleep between iterations
    pub poll_interval: Duration,
    /// Only count events newer than this; `None` counts every retained event
    pub event_window: Option<Duration>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            pod_name: DEFAULT_POD_NAME.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            event_window: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_config_default() {
        let config = ReportConfig::default();
        assert_eq!(config.namespace, "default");
        assert_eq!(config.pod_name, "alpine-deployment-548dbddc9b-dnq9r");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert!(config.event_window.is_none());
    }
}
