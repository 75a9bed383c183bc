// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use std::env;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use connect_lifecycle::config::Config;
use connect_lifecycle::lifecycle::{load_template, CleanupRegistry, Lifecycle};
use connect_lifecycle::types::KafkaConnect;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting KafkaConnect lifecycle");

    // Load configuration
    let config = Config::from_env()?;
    let name = env::var("CONNECT_NAME").context("CONNECT_NAME must be set")?;
    let cluster = env::var("CONNECT_CLUSTER").unwrap_or_else(|_| name.clone());
    let replicas: u32 = match env::var("CONNECT_REPLICAS") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("Invalid value '{}' for CONNECT_REPLICAS", raw))?,
        Err(_) => 1,
    };
    let with_metrics = match env::var("CONNECT_METRICS") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("Invalid value '{}' for CONNECT_METRICS", raw))?,
        Err(_) => false,
    };

    // Create Kubernetes client
    let client = Client::try_default().await?;
    let namespace = config
        .namespace
        .clone()
        .unwrap_or_else(|| client.default_namespace().to_string());
    info!("Connected to Kubernetes cluster, using namespace {}", namespace);

    let registry = Arc::new(CleanupRegistry::new());
    let lifecycle: Lifecycle<KafkaConnect> =
        Lifecycle::new(client, namespace, config.lifecycle(), registry.clone());

    let template_path = if with_metrics {
        &config.kafka_connect_metrics_template
    } else {
        &config.kafka_connect_template
    };
    let template: KafkaConnect = load_template(template_path)?;
    let connect = lifecycle
        .kafka_connect_builder(&config.kafka_version)
        .build(&template, &name, &cluster, replicas)?;

    let deployed = lifecycle.deploy(connect).await;
    match &deployed {
        Ok(handle) => {
            info!("{} is running, press Ctrl-C to tear down", handle.identity());
            tokio::signal::ctrl_c().await?;
        }
        Err(e) => error!("Deployment failed: {}", e),
    }

    // Whatever was created gets removed, even after a failed deploy
    info!("Cleaning up {} resource(s)", registry.len().await);
    registry.drain().await?;

    deployed?;
    Ok(())
}
