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

//! Configuration validation
//!
//! Turns a fully merged raw layer into immutable [`ComponentParameters`].
//! Pure function: no side effects, no environment access.

use crate::domain::config::params::{
    ComponentParameters, ImageRef, IngressParams, ResourceQuantities,
};
use crate::domain::config::quantity::{parse_cpu_millis, parse_memory_bytes};
use crate::domain::config::raw::{RawEnvironmentConfig, RawResources};
use crate::shared::error::{ChartError, Result};

const DEFAULT_REPLICAS: i32 = 1;

/// Validate a merged raw layer.
///
/// `MissingField` when a required field is absent or empty, `InvalidShape`
/// when a value is present but malformed (out-of-range port, invalid DNS
/// name, quantity grammar violation).
pub fn validate(raw: &RawEnvironmentConfig) -> Result<ComponentParameters> {
    let name = require_string(raw.name.as_deref(), "name")?;
    if !is_valid_k8s_name(&name) {
        return Err(ChartError::invalid_shape(
            "name",
            format!("not a valid DNS-1123 name: {}", name),
        ));
    }

    let image = raw
        .image
        .as_ref()
        .ok_or_else(|| ChartError::missing_field("image"))?;
    let repository = require_string(image.repository.as_deref(), "image.repository")?;
    let tag = require_string(image.tag.as_deref(), "image.tag")?;

    let container_port = validate_port(raw.container_port, "container_port")?;
    let service_port = validate_port(raw.service_port, "service_port")?;

    let replicas = match raw.replicas {
        None => DEFAULT_REPLICAS,
        Some(n) if n > 0 && n <= i32::MAX as i64 => n as i32,
        Some(n) => {
            return Err(ChartError::invalid_shape(
                "replicas",
                format!("must be positive, got {}", n),
            ))
        }
    };

    let requests = validate_resources(raw.requests.as_ref(), "requests")?;
    let limits = validate_resources(raw.limits.as_ref(), "limits")?;

    let ingress = match raw.ingress {
        None => None,
        Some(ref ingress) => {
            let secret_name =
                require_string(ingress.secret_name.as_deref(), "ingress.secret_name")?;
            Some(IngressParams {
                secret_name,
                hosts: ingress.hosts.clone().unwrap_or_default(),
            })
        }
    };

    Ok(ComponentParameters {
        name,
        image: ImageRef { repository, tag },
        container_port,
        service_port,
        replicas,
        labels: raw.labels.clone().unwrap_or_default(),
        annotations: raw.annotations.clone().unwrap_or_default(),
        requests,
        limits,
        ingress,
    })
}

fn require_string(value: Option<&str>, field: &str) -> Result<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(ChartError::missing_field(field)),
    }
}

fn validate_port(value: Option<i64>, field: &str) -> Result<i32> {
    match value {
        None => Err(ChartError::missing_field(field)),
        Some(p) if (1..=65535).contains(&p) => Ok(p as i32),
        Some(p) => Err(ChartError::invalid_shape(
            field,
            format!("port must be in 1..=65535, got {}", p),
        )),
    }
}

// Grammar check only; request-vs-limit comparison happens in the factory
// after unit normalization.
fn validate_resources(
    resources: Option<&RawResources>,
    field: &str,
) -> Result<Option<ResourceQuantities>> {
    let Some(resources) = resources else {
        return Ok(None);
    };

    if let Some(ref cpu) = resources.cpu {
        parse_cpu_millis(cpu)
            .map_err(|_| ChartError::invalid_shape(format!("{}.cpu", field), cpu.clone()))?;
    }
    if let Some(ref memory) = resources.memory {
        parse_memory_bytes(memory)
            .map_err(|_| ChartError::invalid_shape(format!("{}.memory", field), memory.clone()))?;
    }

    Ok(Some(ResourceQuantities {
        cpu: resources.cpu.clone(),
        memory: resources.memory.clone(),
    }))
}

pub(crate) fn is_valid_k8s_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 253 {
        return false;
    }

    if !name.chars().next().unwrap_or(' ').is_alphanumeric() {
        return false;
    }
    if !name.chars().last().unwrap_or(' ').is_alphanumeric() {
        return false;
    }

    name.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::raw::{RawImage, RawIngress};

    fn valid_raw() -> RawEnvironmentConfig {
        RawEnvironmentConfig {
            name: Some("api".to_string()),
            image: Some(RawImage {
                repository: Some("registry.example.com/api".to_string()),
                tag: Some("abc123".to_string()),
            }),
            container_port: Some(3000),
            service_port: Some(80),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config_resolves() {
        let params = validate(&valid_raw()).unwrap();
        assert_eq!(params.name, "api");
        assert_eq!(params.image.reference(), "registry.example.com/api:abc123");
        assert_eq!(params.container_port, 3000);
        assert_eq!(params.service_port, 80);
        assert_eq!(params.replicas, 1);
        assert!(params.ingress.is_none());
    }

    #[test]
    fn test_missing_name() {
        let mut raw = valid_raw();
        raw.name = None;
        assert!(matches!(
            validate(&raw),
            Err(ChartError::MissingField { field }) if field == "name"
        ));
    }

    #[test]
    fn test_empty_image_tag() {
        let mut raw = valid_raw();
        raw.image.as_mut().unwrap().tag = Some("".to_string());
        assert!(matches!(
            validate(&raw),
            Err(ChartError::MissingField { field }) if field == "image.tag"
        ));
    }

    #[test]
    fn test_port_out_of_range() {
        let mut raw = valid_raw();
        raw.container_port = Some(0);
        assert!(matches!(
            validate(&raw),
            Err(ChartError::InvalidShape { field, .. }) if field == "container_port"
        ));

        let mut raw = valid_raw();
        raw.service_port = Some(70000);
        assert!(matches!(
            validate(&raw),
            Err(ChartError::InvalidShape { field, .. }) if field == "service_port"
        ));
    }

    #[test]
    fn test_invalid_component_name() {
        let mut raw = valid_raw();
        raw.name = Some("Api_Server".to_string());
        assert!(matches!(
            validate(&raw),
            Err(ChartError::InvalidShape { field, .. }) if field == "name"
        ));
    }

    #[test]
    fn test_bad_quantity_grammar() {
        let mut raw = valid_raw();
        raw.requests = Some(RawResources {
            cpu: Some("fast".to_string()),
            memory: None,
        });
        assert!(matches!(
            validate(&raw),
            Err(ChartError::InvalidShape { field, .. }) if field == "requests.cpu"
        ));
    }

    #[test]
    fn test_ingress_requires_secret_name() {
        let mut raw = valid_raw();
        raw.ingress = Some(RawIngress::default());
        assert!(matches!(
            validate(&raw),
            Err(ChartError::MissingField { field }) if field == "ingress.secret_name"
        ));
    }

    #[test]
    fn test_negative_replicas() {
        let mut raw = valid_raw();
        raw.replicas = Some(-1);
        assert!(matches!(
            validate(&raw),
            Err(ChartError::InvalidShape { field, .. }) if field == "replicas"
        ));
    }
}
