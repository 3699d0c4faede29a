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

//! Resolved component parameters
//!
//! The validated, immutable description of one deployable unit. Constructed
//! only by the validator; discarded after manifest generation.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentParameters {
    pub name: String,
    pub image: ImageRef,
    pub container_port: i32,
    pub service_port: i32,
    pub replicas: i32,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
    pub requests: Option<ResourceQuantities>,
    pub limits: Option<ResourceQuantities>,
    pub ingress: Option<IngressParams>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRef {
    pub repository: String,
    pub tag: String,
}

impl ImageRef {
    /// Full image reference as consumed by the container runtime.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.repository, self.tag)
    }
}

/// Cpu is a millicore string ("100m", "1"), memory a byte-suffixed string
/// ("128Mi"). Kept verbatim so manifests echo the configured form; the
/// factory normalizes for comparisons only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceQuantities {
    pub cpu: Option<String>,
    pub memory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngressParams {
    pub secret_name: String,
    pub hosts: Vec<String>,
}
