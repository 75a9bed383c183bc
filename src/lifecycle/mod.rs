// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Build, submit, wait for and clean up managed resources.

pub mod builder;
pub mod cleanup;
pub mod handle;
pub mod manager;
pub mod readiness;
pub mod submit;
pub mod template;

pub use builder::KafkaConnectBuilder;
pub use cleanup::CleanupRegistry;
pub use handle::LifecycleHandle;
pub use manager::Lifecycle;
pub use readiness::{is_ready, wait_until_ready, ReadinessState};
pub use submit::{submit_create_or_replace, Classifier};
pub use template::{load_template, template_from_str};
