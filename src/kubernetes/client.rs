// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed resource access and create-or-replace against the API server

use crate::constants::OBJECT_BEING_DELETED;
use crate::error::ErrorClass;
use crate::types::ManagedResource;
use kube::{
    api::{DeleteParams, PostParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, instrument};

/// Typed handle for one resource kind bound to a namespace
pub fn resource_api<K: ManagedResource>(client: &Client, namespace: &str) -> Api<K> {
    Api::namespaced(client.clone(), namespace)
}

/// Create the object, or replace it when an object with the same name exists.
///
/// A conflict caused by a terminating predecessor is returned as-is so the
/// caller can decide whether to retry.
#[instrument(skip(api, resource), fields(name = %resource.name_any()))]
pub async fn create_or_replace<K: ManagedResource>(
    api: &Api<K>,
    resource: &K,
) -> Result<K, kube::Error> {
    match api.create(&PostParams::default(), resource).await {
        Ok(created) => Ok(created),
        Err(kube::Error::Api(err))
            if err.code == 409
                && err.reason == "AlreadyExists"
                && !err.message.contains(OBJECT_BEING_DELETED) =>
        {
            let name = resource.name_any();
            debug!("{} {} already exists, replacing", K::kind(&()), name);

            let existing = api.get(&name).await?;
            let mut replacement = resource.clone();
            replacement.meta_mut().resource_version = existing.resource_version();
            api.replace(&name, &PostParams::default(), &replacement).await
        }
        Err(e) => Err(e),
    }
}

/// Delete by name, treating an already absent object as deleted
#[instrument(skip(api))]
pub async fn delete_if_exists<K: ManagedResource>(
    api: &Api<K>,
    name: &str,
) -> Result<(), kube::Error> {
    match api.delete(name, &DeleteParams::default()).await {
        Ok(_) => Ok(()),
        Err(kube::Error::Api(err)) if err.code == 404 => {
            debug!("{} {} already gone", K::kind(&()), name);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Default classifier: only the "being deleted" conflict is worth retrying
pub fn classify_kube_error(error: &kube::Error) -> ErrorClass {
    match error {
        kube::Error::Api(err) if err.message.contains(OBJECT_BEING_DELETED) => {
            ErrorClass::TransientConflict
        }
        _ => ErrorClass::Unrecoverable,
    }
}
