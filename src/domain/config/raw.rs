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

//! Unvalidated configuration layers
//!
//! Every field is optional so that a layer can override any subset of the
//! parameter set. Unknown fields are rejected at deserialization time rather
//! than silently dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One unvalidated configuration layer for a component. Layers are produced
/// from chart file sections and from CI environment variables, then folded
/// into a single layer by the merger before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawEnvironmentConfig {
    pub name: Option<String>,
    pub image: Option<RawImage>,
    pub container_port: Option<i64>,
    pub service_port: Option<i64>,
    pub replicas: Option<i64>,
    pub labels: Option<BTreeMap<String, String>>,
    pub annotations: Option<BTreeMap<String, String>>,
    pub requests: Option<RawResources>,
    pub limits: Option<RawResources>,
    pub ingress: Option<RawIngress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawImage {
    pub repository: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawResources {
    pub cpu: Option<String>,
    pub memory: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawIngress {
    pub secret_name: Option<String>,
    pub hosts: Option<Vec<String>>,
}

impl RawEnvironmentConfig {
    /// True when no field is set. Useful to skip empty overlay layers.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
