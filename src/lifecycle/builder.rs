// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fills a loaded KafkaConnect template with identity, connection and logging settings.

use crate::constants::{connect_config, labels};
use crate::error::{LifecycleError, Result};
use crate::types::kafka_connect::{CertSecretSource, ClientTls, Logging};
use crate::types::KafkaConnect;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;

/// TLS bootstrap address of a Kafka cluster
pub fn tls_bootstrap_address(cluster: &str) -> String {
    format!("{}-kafka-bootstrap:9093", cluster)
}

/// Name of the Deployment generated for a Connect cluster
pub fn deployment_name(cluster: &str) -> String {
    format!("{}-connect", cluster)
}

pub fn offsets_topic(cluster: &str) -> String {
    format!("{}-connect-offsets", cluster)
}

pub fn config_topic(cluster: &str) -> String {
    format!("{}-connect-config", cluster)
}

pub fn status_topic(cluster: &str) -> String {
    format!("{}-connect-status", cluster)
}

/// Secret holding the cluster CA certificate clients must trust
pub fn cluster_ca_cert_secret(cluster: &str) -> String {
    format!("{}-cluster-ca-cert", cluster)
}

/// Builds submittable KafkaConnect objects for one namespace and Kafka version
#[derive(Debug, Clone)]
pub struct KafkaConnectBuilder {
    namespace: String,
    version: String,
}

impl KafkaConnectBuilder {
    pub fn new(namespace: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            version: version.into(),
        }
    }

    /// Build a KafkaConnect owned by a cluster of the same name
    pub fn build_default(&self, template: &KafkaConnect, name: &str, replicas: u32) -> Result<KafkaConnect> {
        self.build(template, name, name, replicas)
    }

    /// Overlay identity and connection settings onto a copy of `template`.
    ///
    /// Metadata is replaced wholesale. Template spec fields that are not
    /// derived from `owner_cluster_name` are kept, and derived config keys are
    /// added to whatever config the template already carries. A replica count
    /// the resource cannot represent is rejected.
    pub fn build(
        &self,
        template: &KafkaConnect,
        name: &str,
        owner_cluster_name: &str,
        replicas: u32,
    ) -> Result<KafkaConnect> {
        let replicas = i32::try_from(replicas).map_err(|_| LifecycleError::InvalidReplicas(replicas))?;
        let mut connect = template.clone();

        connect.metadata = ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(self.namespace.clone()),
            labels: Some(BTreeMap::from([
                (labels::CLUSTER.to_string(), owner_cluster_name.to_string()),
                (labels::TYPE.to_string(), labels::TYPE_KAFKA_CONNECT.to_string()),
            ])),
            ..Default::default()
        };
        connect.status = None;

        let spec = &mut connect.spec;
        spec.version = Some(self.version.clone());
        spec.bootstrap_servers = Some(tls_bootstrap_address(owner_cluster_name));
        spec.replicas = Some(replicas);
        spec.tls = Some(ClientTls {
            trusted_certificates: vec![CertSecretSource {
                secret_name: cluster_ca_cert_secret(owner_cluster_name),
                certificate: connect_config::CA_CERTIFICATE.to_string(),
            }],
        });

        for (key, value) in [
            (connect_config::GROUP_ID, deployment_name(owner_cluster_name)),
            (connect_config::OFFSET_STORAGE_TOPIC, offsets_topic(owner_cluster_name)),
            (connect_config::CONFIG_STORAGE_TOPIC, config_topic(owner_cluster_name)),
            (connect_config::STATUS_STORAGE_TOPIC, status_topic(owner_cluster_name)),
        ] {
            spec.config.insert(key.to_string(), value.into());
        }

        spec.logging = Some(Logging::inline(BTreeMap::from([(
            connect_config::ROOT_LOGGER.to_string(),
            connect_config::DEFAULT_LOG_LEVEL.to_string(),
        )])));

        Ok(connect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::template::template_from_str;
    use crate::types::ManagedResource;
    use kube::ResourceExt;

    const TEMPLATE: &str = r#"
apiVersion: kafka.strimzi.io/v1beta2
kind: KafkaConnect
metadata:
  name: my-connect-cluster
  labels:
    from-template: "true"
spec:
  version: 3.0.0
  replicas: 3
  bootstrapServers: my-cluster-kafka-bootstrap:9093
  config:
    group.id: connect-cluster
    key.converter: org.apache.kafka.connect.json.JsonConverter
  logging:
    type: inline
    loggers:
      connect.root.logger.level: INFO
"#;

    fn template() -> KafkaConnect {
        template_from_str(TEMPLATE).unwrap()
    }

    fn builder() -> KafkaConnectBuilder {
        KafkaConnectBuilder::new("kafka", "3.7.0")
    }

    #[test]
    fn test_naming_functions() {
        assert_eq!(tls_bootstrap_address("my-cluster"), "my-cluster-kafka-bootstrap:9093");
        assert_eq!(deployment_name("my-cluster"), "my-cluster-connect");
        assert_eq!(offsets_topic("my-cluster"), "my-cluster-connect-offsets");
        assert_eq!(config_topic("my-cluster"), "my-cluster-connect-config");
        assert_eq!(status_topic("my-cluster"), "my-cluster-connect-status");
        assert_eq!(cluster_ca_cert_secret("my-cluster"), "my-cluster-cluster-ca-cert");
    }

    #[test]
    fn test_build_sets_identity_metadata() {
        let connect = builder().build(&template(), "connect-1", "my-cluster", 1).unwrap();

        assert_eq!(connect.name_any(), "connect-1");
        assert_eq!(connect.namespace().as_deref(), Some("kafka"));

        let stamped = connect.labels();
        assert_eq!(stamped.get(labels::CLUSTER).unwrap(), "my-cluster");
        assert_eq!(stamped.get(labels::TYPE).unwrap(), "kafka-connect");
        assert!(!stamped.contains_key("from-template"));
    }

    #[test]
    fn test_build_derives_connection_settings_from_owner() {
        let connect = builder().build(&template(), "connect-1", "my-cluster", 2).unwrap();
        let spec = &connect.spec;

        assert_eq!(spec.version.as_deref(), Some("3.7.0"));
        assert_eq!(spec.replicas, Some(2));
        assert_eq!(
            spec.bootstrap_servers.as_deref(),
            Some("my-cluster-kafka-bootstrap:9093")
        );

        let trusted = &spec.tls.as_ref().unwrap().trusted_certificates;
        assert_eq!(trusted.len(), 1);
        assert_eq!(trusted[0].secret_name, "my-cluster-cluster-ca-cert");
        assert_eq!(trusted[0].certificate, "ca.crt");

        assert_eq!(spec.config["group.id"], "my-cluster-connect");
        assert_eq!(spec.config["offset.storage.topic"], "my-cluster-connect-offsets");
        assert_eq!(spec.config["config.storage.topic"], "my-cluster-connect-config");
        assert_eq!(spec.config["status.storage.topic"], "my-cluster-connect-status");
    }

    #[test]
    fn test_build_keeps_unrelated_template_config() {
        let connect = builder().build(&template(), "connect-1", "my-cluster", 1).unwrap();

        assert_eq!(
            connect.spec.config["key.converter"],
            "org.apache.kafka.connect.json.JsonConverter"
        );
    }

    #[test]
    fn test_build_sets_debug_inline_logging() {
        let connect = builder().build(&template(), "connect-1", "my-cluster", 1).unwrap();
        let logging = connect.spec.logging.unwrap();

        assert_eq!(logging.logging_type, "inline");
        assert_eq!(logging.loggers.len(), 1);
        assert_eq!(logging.loggers["connect.root.logger.level"], "DEBUG");
    }

    #[test]
    fn test_build_is_deterministic() {
        let template = template();
        for (name, cluster, replicas) in [("connect-1", "my-cluster", 1), ("c", "c", 0), ("x", "other", 7)] {
            let first = builder().build(&template, name, cluster, replicas).unwrap();
            let second = builder().build(&template, name, cluster, replicas).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_build_leaves_template_untouched() {
        let template = template();
        let before = template.clone();

        builder().build(&template, "connect-1", "my-cluster", 1).unwrap();

        assert_eq!(template, before);
    }

    #[test]
    fn test_build_default_uses_name_as_owner() {
        let connect = builder().build_default(&template(), "my-cluster", 1).unwrap();

        assert_eq!(connect.labels().get(labels::CLUSTER).unwrap(), "my-cluster");
        assert_eq!(connect.spec.config["group.id"], "my-cluster-connect");
        assert_eq!(connect.workload_name(), "my-cluster-connect");
    }

    #[test]
    fn test_build_rejects_unrepresentable_replicas() {
        let err = builder()
            .build(&template(), "connect-1", "my-cluster", u32::MAX)
            .unwrap_err();

        assert!(matches!(err, LifecycleError::InvalidReplicas(n) if n == u32::MAX));
    }

    #[test]
    fn test_build_accepts_largest_replica_count() {
        let connect = builder()
            .build(&template(), "connect-1", "my-cluster", i32::MAX as u32)
            .unwrap();

        assert_eq!(connect.spec.replicas, Some(i32::MAX));
    }
}
