// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::{Resource, ResourceExt};
use kube::core::NamespaceResourceScope;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// A namespaced custom resource the lifecycle can submit, wait on and clean up.
pub trait ManagedResource:
    Resource<DynamicType = (), Scope = NamespaceResourceScope>
    + Clone
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Name of the workload the orchestrator generates for this resource
    fn workload_name(&self) -> String;

    /// Ports other pods use to reach the workload
    fn exposed_ports(&self) -> Vec<i32>;

    /// Whether the orchestrator reports this object as ready
    fn is_ready(&self) -> bool;
}

/// `(kind, namespace, name)`, unique within a cluster
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentity {
    pub kind: String,
    pub namespace: String,
    pub name: String,
}

impl ResourceIdentity {
    pub fn new(
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn of<K: ManagedResource>(resource: &K) -> Self {
        Self::new(
            K::kind(&()),
            resource.namespace().unwrap_or_default(),
            resource.name_any(),
        )
    }
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.kind, self.namespace, self.name)
    }
}
