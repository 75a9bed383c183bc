// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Allow-policies for resources deployed into default-deny namespaces

use crate::constants::{labels, OPERATOR_NAME};
use crate::error::{LifecycleError, Result};
use crate::types::ManagedResource;
use k8s_openapi::api::networking::v1::{
    NetworkPolicy, NetworkPolicyIngressRule, NetworkPolicyPeer, NetworkPolicyPort,
    NetworkPolicySpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::{
    api::{ObjectMeta, Patch, PatchParams},
    Api, Client, ResourceExt,
};
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Name of the allow-policy generated for a resource
pub fn allow_policy_name(resource_name: &str) -> String {
    format!("{}-allow", resource_name)
}

/// Ensure a NetworkPolicy lets client pods reach the resource's workload.
///
/// Uses server-side apply, so repeated calls converge on the same object.
#[instrument(skip(client, resource), fields(resource = %resource.name_any()))]
pub async fn ensure_allow_network_policy<K: ManagedResource>(
    client: &Client,
    resource: &K,
    workload_name: &str,
) -> Result<()> {
    let namespace = resource.namespace().unwrap_or_default();
    let policy = allow_network_policy(resource, workload_name);
    let name = policy.name_any();
    let policies: Api<NetworkPolicy> = Api::namespaced(client.clone(), &namespace);

    info!(
        "Applying network policy {}/{} for workload {}",
        namespace, name, workload_name
    );

    let pp = PatchParams::apply(OPERATOR_NAME).force();
    policies
        .patch(&name, &pp, &Patch::Apply(&policy))
        .await
        .map_err(|e| {
            LifecycleError::NetworkPolicyError(format!(
                "Failed to apply network policy {}/{}: {}",
                namespace, name, e
            ))
        })?;

    Ok(())
}

fn allow_network_policy<K: ManagedResource>(resource: &K, workload_name: &str) -> NetworkPolicy {
    let resource_name = resource.name_any();
    let pod_labels = BTreeMap::from([
        (labels::CLUSTER.to_string(), resource_name.clone()),
        (labels::KIND.to_string(), K::kind(&()).to_string()),
        (labels::NAME.to_string(), workload_name.to_string()),
    ]);
    let client_labels = BTreeMap::from([(
        labels::KAFKA_CLIENTS_KEY.to_string(),
        labels::KAFKA_CLIENTS_VALUE.to_string(),
    )]);

    let ports = resource
        .exposed_ports()
        .into_iter()
        .map(|port| NetworkPolicyPort {
            port: Some(IntOrString::Int(port)),
            protocol: Some("TCP".to_string()),
            ..Default::default()
        })
        .collect();

    NetworkPolicy {
        metadata: ObjectMeta {
            name: Some(allow_policy_name(&resource_name)),
            namespace: resource.namespace(),
            ..Default::default()
        },
        spec: Some(NetworkPolicySpec {
            pod_selector: LabelSelector {
                match_labels: Some(pod_labels),
                match_expressions: None,
            },
            ingress: Some(vec![NetworkPolicyIngressRule {
                from: Some(vec![NetworkPolicyPeer {
                    pod_selector: Some(LabelSelector {
                        match_labels: Some(client_labels),
                        match_expressions: None,
                    }),
                    ..Default::default()
                }]),
                ports: Some(ports),
            }]),
            policy_types: Some(vec!["Ingress".to_string()]),
            ..Default::default()
        }),
        ..Default::default()
    }
}
