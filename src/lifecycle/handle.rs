// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::Result;
use crate::kubernetes::delete_if_exists;
use crate::lifecycle::cleanup::CleanupRegistry;
use crate::types::{ManagedResource, ResourceIdentity};
use kube::{api::PostParams, Api};
use std::sync::Weak;
use tracing::{info, instrument};

/// A submitted resource, owned by the caller.
///
/// The registry is only referenced weakly; dropping the handle never deletes
/// anything and dropping the registry does not invalidate the handle.
pub struct LifecycleHandle<K: ManagedResource> {
    api: Api<K>,
    resource: K,
    identity: ResourceIdentity,
    registry: Weak<CleanupRegistry>,
}

impl<K: ManagedResource> std::fmt::Debug for LifecycleHandle<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleHandle")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<K: ManagedResource> LifecycleHandle<K> {
    pub(crate) fn new(api: Api<K>, resource: K, registry: Weak<CleanupRegistry>) -> Self {
        let identity = ResourceIdentity::of(&resource);
        Self {
            api,
            resource,
            identity,
            registry,
        }
    }

    /// The last version of the object seen by this handle
    pub fn resource(&self) -> &K {
        &self.resource
    }

    pub fn identity(&self) -> &ResourceIdentity {
        &self.identity
    }

    pub fn api(&self) -> &Api<K> {
        &self.api
    }

    pub fn into_resource(self) -> K {
        self.resource
    }

    pub(crate) fn observe(&mut self, resource: K) {
        self.resource = resource;
    }

    /// Re-read the live object
    pub async fn refresh(&mut self) -> Result<&K> {
        self.resource = self.api.get(&self.identity.name).await?;
        Ok(&self.resource)
    }

    /// Fetch the live object, apply `editor` and replace it
    #[instrument(skip(self, editor), fields(resource = %self.identity))]
    pub async fn replace<F>(&mut self, editor: F) -> Result<&K>
    where
        F: FnOnce(&mut K),
    {
        let mut live = self.api.get(&self.identity.name).await?;
        editor(&mut live);

        // Keep the identity stable whatever the editor touched
        live.meta_mut().name = Some(self.identity.name.clone());
        live.meta_mut().namespace = Some(self.identity.namespace.clone());

        info!("Replacing {}", self.identity);
        self.resource = self
            .api
            .replace(&self.identity.name, &PostParams::default(), &live)
            .await?;
        Ok(&self.resource)
    }

    /// Delete the resource now and stop tracking it for cleanup
    #[instrument(skip(self), fields(resource = %self.identity))]
    pub async fn delete(self) -> Result<()> {
        info!("Deleting {}", self.identity);
        delete_if_exists(&self.api, &self.identity.name).await?;

        if let Some(registry) = self.registry.upgrade() {
            registry.forget(&self.identity).await;
        }
        Ok(())
    }
}
