// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deferred deletion of everything the lifecycle created

use crate::error::{CleanupFailure, LifecycleError, Result};
use crate::kubernetes::delete_if_exists;
use crate::types::{ManagedResource, ResourceIdentity};
use futures::future::BoxFuture;
use futures::FutureExt;
use kube::Api;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

type Deleter = Box<dyn FnOnce() -> BoxFuture<'static, std::result::Result<(), kube::Error>> + Send>;

/// A created resource and the means to delete it
pub struct CleanupEntry {
    pub identity: ResourceIdentity,
    delete: Deleter,
}

impl std::fmt::Debug for CleanupEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupEntry")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Ordered record of created resources, deleted last-created-first on `drain`
#[derive(Debug, Default)]
pub struct CleanupRegistry {
    entries: Mutex<Vec<CleanupEntry>>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a resource for deletion through its typed API handle.
    ///
    /// Returns false when the identity is already tracked.
    pub async fn register<K: ManagedResource>(&self, api: &Api<K>, identity: ResourceIdentity) -> bool {
        let api = api.clone();
        let name = identity.name.clone();
        self.register_with(identity, move || {
            async move { delete_if_exists(&api, &name).await }.boxed()
        })
        .await
    }

    /// Track a resource with an arbitrary delete action
    pub async fn register_with<F>(&self, identity: ResourceIdentity, delete: F) -> bool
    where
        F: FnOnce() -> BoxFuture<'static, std::result::Result<(), kube::Error>> + Send + 'static,
    {
        let mut entries = self.entries.lock().await;

        if entries.iter().any(|e| e.identity == identity) {
            debug!("{} is already registered for cleanup", identity);
            return false;
        }

        debug!("Registering {} for cleanup", identity);
        entries.push(CleanupEntry {
            identity,
            delete: Box::new(delete),
        });
        true
    }

    /// Stop tracking a resource that was deleted some other way
    pub async fn forget(&self, identity: &ResourceIdentity) -> bool {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|e| &e.identity != identity);
        entries.len() != before
    }

    pub async fn contains(&self, identity: &ResourceIdentity) -> bool {
        self.entries
            .lock()
            .await
            .iter()
            .any(|e| &e.identity == identity)
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Delete every registered resource, newest first.
    ///
    /// Each entry leaves the registry before its delete runs, so a second call
    /// never repeats a deletion. Failures do not stop the traversal; they are
    /// returned together once all entries were attempted.
    #[instrument(skip(self))]
    pub async fn drain(&self) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let mut failures = Vec::new();

        while let Some(entry) = entries.pop() {
            info!("Deleting {}", entry.identity);

            if let Err(e) = (entry.delete)().await {
                error!("Failed to delete {}: {}", entry.identity, e);
                failures.push(CleanupFailure {
                    identity: entry.identity,
                    error: e,
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LifecycleError::CleanupAggregateError(failures))
        }
    }
}
