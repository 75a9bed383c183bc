// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Submit, register and wait, as explicit steps the caller composes

use crate::config::LifecycleConfig;
use crate::error::Result;
use crate::kubernetes::{
    classify_kube_error, create_or_replace, delete_if_exists, ensure_allow_network_policy,
    resource_api,
};
use crate::lifecycle::builder::KafkaConnectBuilder;
use crate::lifecycle::cleanup::CleanupRegistry;
use crate::lifecycle::handle::LifecycleHandle;
use crate::lifecycle::readiness::{is_ready, wait_until_ready};
use crate::lifecycle::submit::{submit_create_or_replace, Classifier};
use crate::types::{KafkaConnect, ManagedResource, ResourceIdentity};
use kube::{Api, Client, ResourceExt};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{info, instrument};

/// Lifecycle operations for one resource kind in one namespace
pub struct Lifecycle<K: ManagedResource> {
    client: Client,
    namespace: String,
    config: LifecycleConfig,
    classify: Classifier,
    registry: Arc<CleanupRegistry>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ManagedResource> Lifecycle<K> {
    pub fn new(
        client: Client,
        namespace: impl Into<String>,
        config: LifecycleConfig,
        registry: Arc<CleanupRegistry>,
    ) -> Self {
        Self {
            client,
            namespace: namespace.into(),
            config,
            classify: classify_kube_error,
            registry,
            _kind: PhantomData,
        }
    }

    /// Replace the default "object is being deleted" error classifier
    pub fn with_classifier(mut self, classify: Classifier) -> Self {
        self.classify = classify;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn registry(&self) -> &Arc<CleanupRegistry> {
        &self.registry
    }

    /// Typed API handle for this kind in the session namespace
    pub fn api(&self) -> Api<K> {
        resource_api(&self.client, &self.namespace)
    }

    /// Create or replace `resource`, retrying while a predecessor terminates
    #[instrument(skip(self, resource), fields(resource = %resource.name_any()))]
    pub async fn submit(&self, mut resource: K) -> Result<LifecycleHandle<K>> {
        if resource.namespace().is_none() {
            resource.meta_mut().namespace = Some(self.namespace.clone());
        }

        if self.config.network_policies_enabled {
            ensure_allow_network_policy(&self.client, &resource, &resource.workload_name()).await?;
        }

        let api = self.api();
        let submitted = submit_create_or_replace(
            &api,
            &resource,
            self.config.creation_poll_interval,
            self.config.creation_timeout,
            self.classify,
        )
        .await?;

        Ok(LifecycleHandle::new(api, submitted, Arc::downgrade(&self.registry)))
    }

    /// Track a submitted resource for deletion at teardown
    pub async fn register(&self, handle: &LifecycleHandle<K>) -> bool {
        self.registry
            .register(handle.api(), handle.identity().clone())
            .await
    }

    /// Block until the orchestrator reports `identity` ready.
    ///
    /// Polls the namespace named by `identity`, which need not be the
    /// session namespace.
    pub async fn wait_until_ready(&self, identity: &ResourceIdentity) -> Result<K> {
        info!("Waiting for {} {}", identity.kind, identity.name);
        let ready = wait_until_ready(
            &resource_api(&self.client, &identity.namespace),
            identity,
            is_ready::<K>,
            self.config.readiness_poll_interval,
            self.config.readiness_timeout,
        )
        .await?;
        info!("{} {} is ready", identity.kind, identity.name);
        Ok(ready)
    }

    /// Submit, register for cleanup, then wait for readiness.
    ///
    /// A resource that never becomes ready stays registered.
    pub async fn deploy(&self, resource: K) -> Result<LifecycleHandle<K>> {
        let mut handle = self.submit(resource).await?;
        self.register(&handle).await;

        let ready = self.wait_until_ready(handle.identity()).await?;
        handle.observe(ready);
        Ok(handle)
    }

    /// Single create-or-replace: no retry, no registration, no wait
    pub async fn submit_without_wait(&self, resource: &K) -> Result<K> {
        Ok(create_or_replace(&self.api(), resource).await?)
    }

    /// Single delete, bypassing the registry
    pub async fn delete_without_wait(&self, resource: &K) -> Result<()> {
        Ok(delete_if_exists(&self.api(), &resource.name_any()).await?)
    }
}

impl Lifecycle<KafkaConnect> {
    /// Builder stamping this lifecycle's namespace onto KafkaConnect templates
    pub fn kafka_connect_builder(&self, kafka_version: &str) -> KafkaConnectBuilder {
        KafkaConnectBuilder::new(self.namespace.clone(), kafka_version)
    }
}
