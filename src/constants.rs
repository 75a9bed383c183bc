// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Label keys and values stamped onto managed resources
pub mod labels {
    /// Owning Kafka cluster of a resource
    pub const CLUSTER: &str = "strimzi.io/cluster";
    /// Kind of the resource that owns a pod
    pub const KIND: &str = "strimzi.io/kind";
    /// Name of the generated workload
    pub const NAME: &str = "strimzi.io/name";
    /// Classification label
    pub const TYPE: &str = "type";
    pub const TYPE_KAFKA_CONNECT: &str = "kafka-connect";
    /// Pods allowed through the generated network policies
    pub const KAFKA_CLIENTS_KEY: &str = "app";
    pub const KAFKA_CLIENTS_VALUE: &str = "kafka-clients";
}

/// Kafka Connect worker configuration keys
pub mod connect_config {
    pub const GROUP_ID: &str = "group.id";
    pub const OFFSET_STORAGE_TOPIC: &str = "offset.storage.topic";
    pub const CONFIG_STORAGE_TOPIC: &str = "config.storage.topic";
    pub const STATUS_STORAGE_TOPIC: &str = "status.storage.topic";
    pub const ROOT_LOGGER: &str = "connect.root.logger.level";
    pub const DEFAULT_LOG_LEVEL: &str = "DEBUG";
    pub const CA_CERTIFICATE: &str = "ca.crt";
    pub const REST_PORT: i32 = 8083;
    pub const METRICS_PORT: i32 = 9404;
}

/// The field manager used for server-side apply
pub const OPERATOR_NAME: &str = "connect-lifecycle";

/// Substring the API server puts in the conflict raised while a previous
/// object with the same name is still terminating
pub const OBJECT_BEING_DELETED: &str = "object is being deleted";

/// Polling defaults, overridable through the environment
pub mod defaults {
    pub const KAFKA_VERSION: &str = "3.7.0";
    pub const POLL_INTERVAL_FOR_RESOURCE_CREATION_MS: u64 = 3_000;
    pub const TIMEOUT_FOR_CR_CREATION_MS: u64 = 180_000;
    pub const POLL_INTERVAL_FOR_RESOURCE_READINESS_MS: u64 = 1_000;
    pub const TIMEOUT_FOR_RESOURCE_READINESS_MS: u64 = 360_000;
    pub const KAFKA_CONNECT_TEMPLATE: &str = "templates/kafka-connect.yaml";
    pub const KAFKA_CONNECT_METRICS_TEMPLATE: &str = "templates/kafka-connect-metrics.yaml";
}
