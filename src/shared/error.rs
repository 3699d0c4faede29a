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

use thiserror::Error;
pub type Result<T> = std::result::Result<T, ChartError>;

/// Errors raised during a resolution pass. The configuration variants are
/// non-retriable: they describe static misconfiguration, and the affected
/// component is left out of the registry.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Missing required field: '{field}'")]
    MissingField { field: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidShape { field: String, reason: String },

    #[error("Invalid resource spec: {resource} request '{request}' exceeds limit '{limit}'")]
    InvalidResourceSpec {
        resource: String,
        request: String,
        limit: String,
    },

    #[error("Component already registered: '{name}'")]
    DuplicateComponent { name: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl ChartError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid_shape(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_resource_spec(
        resource: impl Into<String>,
        request: impl Into<String>,
        limit: impl Into<String>,
    ) -> Self {
        Self::InvalidResourceSpec {
            resource: resource.into(),
            request: request.into(),
            limit: limit.into(),
        }
    }

    pub fn duplicate_component(name: impl Into<String>) -> Self {
        Self::DuplicateComponent { name: name.into() }
    }

    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }
}
