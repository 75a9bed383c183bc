// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Loads declarative YAML templates into typed resources

use crate::error::{LifecycleError, Result};
use kube::Resource;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Parse the first document of kind `K` from a (possibly multi-document) YAML string
pub fn template_from_str<K>(yaml: &str) -> Result<K>
where
    K: Resource<DynamicType = ()> + DeserializeOwned,
{
    let kind = K::kind(&());

    for document in serde_yaml::Deserializer::from_str(yaml) {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|e| LifecycleError::TemplateError(format!("Failed to parse template: {}", e)))?;

        if value.get("kind").and_then(|k| k.as_str()) != Some(&*kind) {
            continue;
        }

        return serde_yaml::from_value(value).map_err(|e| {
            LifecycleError::TemplateError(format!("Invalid {} template: {}", kind, e))
        });
    }

    Err(LifecycleError::TemplateError(format!(
        "Template contains no {} document",
        kind
    )))
}

/// Read and parse a resource template from disk
pub fn load_template<K>(path: &Path) -> Result<K>
where
    K: Resource<DynamicType = ()> + DeserializeOwned,
{
    debug!("Loading template {}", path.display());

    let yaml = std::fs::read_to_string(path).map_err(|e| {
        LifecycleError::TemplateError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    template_from_str(&yaml).map_err(|e| match e {
        LifecycleError::TemplateError(msg) => {
            LifecycleError::TemplateError(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}
