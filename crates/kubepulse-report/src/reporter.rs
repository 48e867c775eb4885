//! Poll loop
//!
//! Sweeps the cluster, prints the report, sleeps and repeats. There is no
//! shutdown path; the process is expected to be stopped by a signal.

use std::io::{self, Write};

use chrono::Utc;
use tokio::time::Instant;
use tracing::{debug, info};

use kubepulse_k8s::ClusterApi;

use crate::{ReportConfig, Snapshot, render};

/// Periodic cluster reporter
pub struct Reporter<A> {
    /// Cluster access
    api: A,
    /// Configuration
    config: ReportConfig,
    /// Completed iterations
    iteration: u64,
}

impl<A: ClusterApi> Reporter<A> {
    pub fn new(api: A, config: ReportConfig) -> Self {
        Self {
            api,
            config,
            iteration: 0,
        }
    }

    /// Number of iterations completed so far
    pub fn iterations(&self) -> u64 {
        self.iteration
    }

    /// Run a single iteration and write its report
    pub async fn tick<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let start = Instant::now();

        let snapshot = Snapshot::collect(&self.api, &self.config).await;
        for line in render(&snapshot, &self.config, Utc::now()) {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;

        self.iteration += 1;
        debug!(
            iteration = self.iteration,
            elapsed_ms = start.elapsed().as_millis(),
            "Sweep complete"
        );

        Ok(())
    }

    /// Report forever, sleeping `poll_interval` between iterations.
    ///
    /// Only returns if writing the report fails.
    pub async fn run<W: Write>(mut self, mut out: W) -> io::Result<()> {
        info!(
            namespace = %self.config.namespace,
            pod = %self.config.pod_name,
            interval_secs = self.config.poll_interval.as_secs(),
            "Starting cluster reporter"
        );

        loop {
            self.tick(&mut out).await?;
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}
