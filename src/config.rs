// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace resources are created in; the client default when unset
    pub namespace: Option<String>,
    pub kafka_version: String,
    /// When true, every submitted resource first gets an allow-policy
    pub default_to_deny_network_policies: bool,
    pub poll_interval_for_resource_creation: Duration,
    pub timeout_for_cr_creation: Duration,
    pub poll_interval_for_resource_readiness: Duration,
    pub timeout_for_resource_readiness: Duration,
    pub kafka_connect_template: PathBuf,
    pub kafka_connect_metrics_template: PathBuf,
}

/// Timing and policy knobs handed to the submitter and the readiness waiter
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    pub network_policies_enabled: bool,
    pub creation_poll_interval: Duration,
    pub creation_timeout: Duration,
    pub readiness_poll_interval: Duration,
    pub readiness_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let millis = |key: &str, default: u64| -> Result<Duration> {
            Ok(Duration::from_millis(parse_or(&lookup, key, default)?))
        };

        Ok(Config {
            namespace: lookup("NAMESPACE").filter(|ns| !ns.is_empty()),
            kafka_version: lookup("KAFKA_VERSION")
                .unwrap_or_else(|| defaults::KAFKA_VERSION.to_string()),
            default_to_deny_network_policies: parse_or(
                &lookup,
                "DEFAULT_TO_DENY_NETWORK_POLICIES",
                false,
            )?,
            poll_interval_for_resource_creation: millis(
                "POLL_INTERVAL_FOR_RESOURCE_CREATION_MS",
                defaults::POLL_INTERVAL_FOR_RESOURCE_CREATION_MS,
            )?,
            timeout_for_cr_creation: millis(
                "TIMEOUT_FOR_CR_CREATION_MS",
                defaults::TIMEOUT_FOR_CR_CREATION_MS,
            )?,
            poll_interval_for_resource_readiness: millis(
                "POLL_INTERVAL_FOR_RESOURCE_READINESS_MS",
                defaults::POLL_INTERVAL_FOR_RESOURCE_READINESS_MS,
            )?,
            timeout_for_resource_readiness: millis(
                "TIMEOUT_FOR_RESOURCE_READINESS_MS",
                defaults::TIMEOUT_FOR_RESOURCE_READINESS_MS,
            )?,
            kafka_connect_template: lookup("KAFKA_CONNECT_TEMPLATE")
                .unwrap_or_else(|| defaults::KAFKA_CONNECT_TEMPLATE.to_string())
                .into(),
            kafka_connect_metrics_template: lookup("KAFKA_CONNECT_METRICS_TEMPLATE")
                .unwrap_or_else(|| defaults::KAFKA_CONNECT_METRICS_TEMPLATE.to_string())
                .into(),
        })
    }

    pub fn lifecycle(&self) -> LifecycleConfig {
        LifecycleConfig {
            network_policies_enabled: self.default_to_deny_network_policies,
            creation_poll_interval: self.poll_interval_for_resource_creation,
            creation_timeout: self.timeout_for_cr_creation,
            readiness_poll_interval: self.poll_interval_for_resource_readiness,
            readiness_timeout: self.timeout_for_resource_readiness,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value '{}' for {}", raw, key)),
        None => Ok(default),
    }
}
