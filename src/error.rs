// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::ResourceIdentity;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load template: {0}")]
    TemplateError(String),

    #[error("Replica count {0} is out of range")]
    InvalidReplicas(u32),

    #[error("Network policy setup failed: {0}")]
    NetworkPolicyError(String),

    /// The target object stayed mid-deletion for the whole creation timeout.
    #[error("{identity} still being deleted after {attempts} attempts in {timeout:?}")]
    RetryExhausted {
        identity: ResourceIdentity,
        attempts: u32,
        timeout: Duration,
    },

    #[error("Failed to submit {identity}: {source}")]
    UnrecoverableError {
        identity: ResourceIdentity,
        #[source]
        source: kube::Error,
    },

    #[error("{identity} not ready after {timeout:?}")]
    Timeout {
        identity: ResourceIdentity,
        timeout: Duration,
    },

    #[error("Cleanup failed for {} resource(s): {}", .0.len(), format_failures(.0))]
    CleanupAggregateError(Vec<CleanupFailure>),
}

/// A single deletion that failed while draining the cleanup registry
#[derive(Debug)]
pub struct CleanupFailure {
    pub identity: ResourceIdentity,
    pub error: kube::Error,
}

fn format_failures(failures: &[CleanupFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.identity, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// How the submit loop treats an orchestrator error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A prior instance with the same identity is mid-deletion; retry later
    TransientConflict,
    Unrecoverable,
}

pub type Result<T> = std::result::Result<T, LifecycleError>;
