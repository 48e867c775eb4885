use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use kubepulse_k8s::KubeClient;
use kubepulse_report::Reporter;

mod config;

use config::Settings;

/// Kubepulse - periodically reports Kubernetes cluster status
#[derive(Parser, Debug)]
#[command(name = "kubepulse")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Absolute path to the kubeconfig file (defaults to ~/.kube/config)
    #[arg(long, value_name = "PATH")]
    kubeconfig: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Diagnostics go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run_app(args).await;

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

async fn run_app(args: Args) -> Result<()> {
    let settings = match Settings::default_path() {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    let config = settings.into_report_config();

    let kubeconfig = args.kubeconfig.or_else(default_kubeconfig);
    let client = KubeClient::new(kubeconfig.as_deref()).await?;

    Reporter::new(client, config)
        .run(std::io::stdout())
        .await
        .context("Failed to write report")
}

/// ~/.kube/config, if present
fn default_kubeconfig() -> Option<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".kube").join("config"))
        .filter(|path| path.exists())
}
