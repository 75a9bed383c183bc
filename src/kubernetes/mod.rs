// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for typed resource access, create-or-replace and network policies.

pub mod client;
pub mod network_policy;

pub use client::{classify_kube_error, create_or_replace, delete_if_exists, resource_api};
pub use network_policy::ensure_allow_network_policy;
