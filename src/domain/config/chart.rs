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

//! Chart file loading
//!
//! A chart file is the static side of the configuration input: a TOML
//! document with an optional `[defaults]` layer shared by every component,
//! one `[components.<id>.base]` layer per component, and
//! `[components.<id>.environments.<env>]` override layers.

use crate::domain::config::raw::RawEnvironmentConfig;
use crate::shared::error::{ChartError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::read_to_string;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartFile {
    pub defaults: Option<RawEnvironmentConfig>,
    pub components: BTreeMap<String, ComponentEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentEntry {
    pub base: RawEnvironmentConfig,
    pub environments: BTreeMap<String, RawEnvironmentConfig>,
}

impl ChartFile {
    /// Load a chart file from a TOML document on disk.
    pub fn from<T: AsRef<str>>(path: T) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            ChartError::config_error(format!(
                "Failed to read chart file {}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let chart: Self = toml::from_str(content)?;
        if chart.components.is_empty() {
            return Err(ChartError::config_error(
                "Chart file defines no components".to_string(),
            ));
        }
        Ok(chart)
    }

    /// Ordered override layers for one component in one environment:
    /// component base first, then the environment section if present. The
    /// file-level `[defaults]` section is the merge base. Unknown
    /// environments resolve with the base alone, so a component without
    /// per-environment overrides still generates.
    pub fn layers_for(&self, component: &str, environment: &str) -> Result<LayerSet<'_>> {
        let entry = self.components.get(component).ok_or_else(|| {
            ChartError::config_error(format!("Unknown component: {}", component))
        })?;

        let mut overrides = vec![&entry.base];
        if let Some(env_layer) = entry.environments.get(environment) {
            overrides.push(env_layer);
        }

        Ok(LayerSet {
            base: self.defaults.as_ref(),
            overrides,
        })
    }

    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }
}

/// Borrowed view of the layers feeding one resolution pass.
pub struct LayerSet<'a> {
    pub base: Option<&'a RawEnvironmentConfig>,
    pub overrides: Vec<&'a RawEnvironmentConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = r#"
[defaults]
service_port = 80

[defaults.requests]
cpu = "100m"
memory = "128Mi"

[components.api.base]
name = "api"
container_port = 3000

[components.api.base.image]
repository = "registry.example.com/api"
tag = "latest"

[components.api.environments.prod.labels]
component = "cdtn-api"
"#;

    #[test]
    fn test_parse_chart_file() {
        let chart = ChartFile::from_toml(CHART).unwrap();
        assert_eq!(chart.component_names().collect::<Vec<_>>(), vec!["api"]);
        assert_eq!(
            chart.defaults.as_ref().unwrap().service_port,
            Some(80)
        );
    }

    #[test]
    fn test_layers_include_environment_section() {
        let chart = ChartFile::from_toml(CHART).unwrap();
        let layers = chart.layers_for("api", "prod").unwrap();
        assert!(layers.base.is_some());
        assert_eq!(layers.overrides.len(), 2);

        // Unknown environment still resolves from the base layer
        let layers = chart.layers_for("api", "dev").unwrap();
        assert_eq!(layers.overrides.len(), 1);
    }

    #[test]
    fn test_unknown_component_rejected() {
        let chart = ChartFile::from_toml(CHART).unwrap();
        assert!(chart.layers_for("worker", "prod").is_err());
    }

    #[test]
    fn test_empty_chart_rejected() {
        assert!(ChartFile::from_toml("").is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let doc = r#"
[components.api.base]
naem = "api"
"#;
        assert!(ChartFile::from_toml(doc).is_err());
    }
}
