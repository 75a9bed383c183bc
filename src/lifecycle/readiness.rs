// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Polls a resource until its readiness condition holds

use crate::error::{LifecycleError, Result};
use crate::types::{ManagedResource, ResourceIdentity};
use kube::Api;
use kube_runtime::wait::Condition;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, instrument, warn};

/// Readiness derived from a single observation of the live object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    Pending,
    Ready,
}

impl ReadinessState {
    /// An absent object is always pending, whatever the condition says
    pub fn observe<K, C: Condition<K>>(resource: Option<&K>, condition: &C) -> Self {
        match resource {
            Some(obj) if condition.matches_object(Some(obj)) => ReadinessState::Ready,
            _ => ReadinessState::Pending,
        }
    }
}

/// Condition matching objects the orchestrator reports as ready
pub fn is_ready<K: ManagedResource>(resource: Option<&K>) -> bool {
    resource.is_some_and(|obj| obj.is_ready())
}

/// Poll `identity` every `poll_interval` until `condition` holds.
///
/// There is no failure state: anything short of ready before `timeout` is a
/// `Timeout`. Read errors are logged and treated as pending.
#[instrument(skip(api, condition), fields(resource = %identity))]
pub async fn wait_until_ready<K, C>(
    api: &Api<K>,
    identity: &ResourceIdentity,
    condition: C,
    poll_interval: Duration,
    timeout: Duration,
) -> Result<K>
where
    K: ManagedResource,
    C: Condition<K>,
{
    let start = Instant::now();

    loop {
        let observed = match api.get_opt(&identity.name).await {
            Ok(observed) => observed,
            Err(e) => {
                warn!("Failed to read {}, will retry: {}", identity, e);
                None
            }
        };

        match (ReadinessState::observe(observed.as_ref(), &condition), observed) {
            (ReadinessState::Ready, Some(ready)) => return Ok(ready),
            (_, None) => debug!("{} does not exist yet", identity),
            _ => debug!("{} is not ready yet", identity),
        }

        if start.elapsed() >= timeout {
            return Err(LifecycleError::Timeout {
                identity: identity.clone(),
                timeout,
            });
        }

        sleep(poll_interval).await;
    }
}
