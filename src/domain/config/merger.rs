// Copyright 2025 Charted Team.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Layered configuration merging
//!
//! A base layer is folded with an ordered sequence of override layers.
//! Precedence is last-writer-wins per field: an override only replaces the
//! fields it actually sets. Map-valued fields (labels, annotations) and the
//! requests/limits pairs merge key-by-key under [`MergeStrategy::Deep`] or
//! are replaced wholesale under [`MergeStrategy::Replace`].

use crate::domain::config::raw::{RawEnvironmentConfig, RawImage, RawIngress, RawResources};
use std::collections::BTreeMap;

/// How nested mapping fields combine across layers. Scalar fields always
/// follow last-writer-wins regardless of strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Merge labels, annotations and resource quantities key-by-key.
    #[default]
    Deep,
    /// An override layer's map replaces the accumulated map entirely.
    Replace,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::Deep => "deep",
            MergeStrategy::Replace => "replace",
        }
    }
}

impl std::str::FromStr for MergeStrategy {
    type Err = crate::shared::error::ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deep" => Ok(MergeStrategy::Deep),
            "replace" => Ok(MergeStrategy::Replace),
            _ => Err(crate::shared::error::ChartError::config_error(format!(
                "Invalid merge strategy: {}",
                s
            ))),
        }
    }
}

/// Fold `overrides` over `base` in order. Deterministic: equal inputs in
/// equal order always produce the same output, since all maps are
/// BTreeMap-backed.
pub fn merge(
    base: &RawEnvironmentConfig,
    overrides: &[RawEnvironmentConfig],
    strategy: MergeStrategy,
) -> RawEnvironmentConfig {
    let mut merged = base.clone();
    for layer in overrides {
        apply_layer(&mut merged, layer, strategy);
    }
    merged
}

fn apply_layer(
    merged: &mut RawEnvironmentConfig,
    layer: &RawEnvironmentConfig,
    strategy: MergeStrategy,
) {
    if let Some(ref name) = layer.name {
        merged.name = Some(name.clone());
    }
    if let Some(ref image) = layer.image {
        merged.image = Some(merge_image(merged.image.as_ref(), image));
    }
    if let Some(port) = layer.container_port {
        merged.container_port = Some(port);
    }
    if let Some(port) = layer.service_port {
        merged.service_port = Some(port);
    }
    if let Some(replicas) = layer.replicas {
        merged.replicas = Some(replicas);
    }
    if let Some(ref labels) = layer.labels {
        merged.labels = Some(merge_map(merged.labels.as_ref(), labels, strategy));
    }
    if let Some(ref annotations) = layer.annotations {
        merged.annotations = Some(merge_map(merged.annotations.as_ref(), annotations, strategy));
    }
    if let Some(ref requests) = layer.requests {
        merged.requests = Some(merge_resources(merged.requests.as_ref(), requests, strategy));
    }
    if let Some(ref limits) = layer.limits {
        merged.limits = Some(merge_resources(merged.limits.as_ref(), limits, strategy));
    }
    if let Some(ref ingress) = layer.ingress {
        merged.ingress = Some(merge_ingress(merged.ingress.as_ref(), ingress));
    }
}

// Sub-struct fields merge field-by-field so a layer can override just the
// image tag or just the TLS secret.
fn merge_image(current: Option<&RawImage>, layer: &RawImage) -> RawImage {
    let mut image = current.cloned().unwrap_or_default();
    if let Some(ref repository) = layer.repository {
        image.repository = Some(repository.clone());
    }
    if let Some(ref tag) = layer.tag {
        image.tag = Some(tag.clone());
    }
    image
}

fn merge_ingress(current: Option<&RawIngress>, layer: &RawIngress) -> RawIngress {
    let mut ingress = current.cloned().unwrap_or_default();
    if let Some(ref secret_name) = layer.secret_name {
        ingress.secret_name = Some(secret_name.clone());
    }
    if let Some(ref hosts) = layer.hosts {
        ingress.hosts = Some(hosts.clone());
    }
    ingress
}

fn merge_resources(
    current: Option<&RawResources>,
    layer: &RawResources,
    strategy: MergeStrategy,
) -> RawResources {
    if strategy == MergeStrategy::Replace {
        return layer.clone();
    }
    let mut resources = current.cloned().unwrap_or_default();
    if let Some(ref cpu) = layer.cpu {
        resources.cpu = Some(cpu.clone());
    }
    if let Some(ref memory) = layer.memory {
        resources.memory = Some(memory.clone());
    }
    resources
}

fn merge_map(
    current: Option<&BTreeMap<String, String>>,
    layer: &BTreeMap<String, String>,
    strategy: MergeStrategy,
) -> BTreeMap<String, String> {
    match strategy {
        MergeStrategy::Replace => layer.clone(),
        MergeStrategy::Deep => {
            let mut merged = current.cloned().unwrap_or_default();
            for (k, v) in layer {
                merged.insert(k.clone(), v.clone());
            }
            merged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(pairs: &[(&str, &str)]) -> RawEnvironmentConfig {
        RawEnvironmentConfig {
            labels: Some(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_override_wins_per_field() {
        let base = RawEnvironmentConfig {
            name: Some("api".to_string()),
            container_port: Some(3000),
            ..Default::default()
        };
        let layer = RawEnvironmentConfig {
            container_port: Some(8080),
            ..Default::default()
        };

        let merged = merge(&base, &[layer], MergeStrategy::Deep);
        assert_eq!(merged.container_port, Some(8080));
        // Fields the layer does not set survive from base
        assert_eq!(merged.name.as_deref(), Some("api"));
    }

    #[test]
    fn test_last_writer_wins_across_layers() {
        let base = RawEnvironmentConfig::default();
        let first = RawEnvironmentConfig {
            service_port: Some(80),
            ..Default::default()
        };
        let second = RawEnvironmentConfig {
            service_port: Some(443),
            ..Default::default()
        };

        let merged = merge(&base, &[first, second], MergeStrategy::Deep);
        assert_eq!(merged.service_port, Some(443));
    }

    #[test]
    fn test_deep_merge_labels() {
        let base = labeled(&[("app", "api"), ("tier", "backend")]);
        let layer = labeled(&[("tier", "frontend"), ("component", "cdtn-api")]);

        let merged = merge(&base, &[layer], MergeStrategy::Deep);
        let labels = merged.labels.unwrap();
        assert_eq!(labels.get("app").map(String::as_str), Some("api"));
        assert_eq!(labels.get("tier").map(String::as_str), Some("frontend"));
        assert_eq!(
            labels.get("component").map(String::as_str),
            Some("cdtn-api")
        );
    }

    #[test]
    fn test_replace_strategy_swaps_whole_map() {
        let base = labeled(&[("app", "api"), ("tier", "backend")]);
        let layer = labeled(&[("component", "cdtn-api")]);

        let merged = merge(&base, &[layer], MergeStrategy::Replace);
        let labels = merged.labels.unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(
            labels.get("component").map(String::as_str),
            Some("cdtn-api")
        );
    }

    #[test]
    fn test_image_merges_field_by_field() {
        let base = RawEnvironmentConfig {
            image: Some(RawImage {
                repository: Some("registry.example.com/api".to_string()),
                tag: Some("latest".to_string()),
            }),
            ..Default::default()
        };
        let layer = RawEnvironmentConfig {
            image: Some(RawImage {
                repository: None,
                tag: Some("abc123".to_string()),
            }),
            ..Default::default()
        };

        let merged = merge(&base, &[layer], MergeStrategy::Deep);
        let image = merged.image.unwrap();
        assert_eq!(
            image.repository.as_deref(),
            Some("registry.example.com/api")
        );
        assert_eq!(image.tag.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let base = labeled(&[("app", "api")]);
        let layer = RawEnvironmentConfig {
            container_port: Some(3000),
            ..Default::default()
        };

        let once = merge(&base, std::slice::from_ref(&layer), MergeStrategy::Deep);
        let twice = merge(&base, std::slice::from_ref(&layer), MergeStrategy::Deep);
        assert_eq!(once, twice);
    }
}
