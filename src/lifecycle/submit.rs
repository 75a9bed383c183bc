// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-or-replace with retries while a previous instance is terminating

use crate::error::{ErrorClass, LifecycleError, Result};
use crate::kubernetes::create_or_replace;
use crate::types::{ManagedResource, ResourceIdentity};
use kube::Api;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument};

/// Decides whether an orchestrator error is worth retrying
pub type Classifier = fn(&kube::Error) -> ErrorClass;

/// Submit `resource`, retrying only while `classify` reports a transient conflict.
///
/// Any other error fails the call after the attempt that produced it. When the
/// conflict outlasts `timeout` the call fails with `RetryExhausted`.
#[instrument(skip(api, resource, classify), fields(resource = %ResourceIdentity::of(resource)))]
pub async fn submit_create_or_replace<K: ManagedResource>(
    api: &Api<K>,
    resource: &K,
    poll_interval: Duration,
    timeout: Duration,
    classify: Classifier,
) -> Result<K> {
    let identity = ResourceIdentity::of(resource);
    let start = Instant::now();
    let mut attempts = 0u32;

    loop {
        attempts += 1;

        let error = match create_or_replace(api, resource).await {
            Ok(submitted) => {
                info!("Submitted {} after {} attempt(s)", identity, attempts);
                return Ok(submitted);
            }
            Err(e) => e,
        };

        if classify(&error) == ErrorClass::Unrecoverable {
            return Err(LifecycleError::UnrecoverableError {
                identity,
                source: error,
            });
        }

        if start.elapsed() + poll_interval > timeout {
            return Err(LifecycleError::RetryExhausted {
                identity,
                attempts,
                timeout,
            });
        }

        debug!(
            "{} is still being deleted, retrying in {:?}: {}",
            identity, poll_interval, error
        );
        sleep(poll_interval).await;
    }
}
