// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource kinds managed by the lifecycle and the trait they share.

pub mod kafka_connect;
pub mod resource;

pub use kafka_connect::{KafkaConnect, KafkaConnectSpec, KafkaConnectStatus};
pub use resource::{ManagedResource, ResourceIdentity};
