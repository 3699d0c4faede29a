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

use crate::infrastructure::constants::{KIND_DEPLOYMENT, KIND_INGRESS, KIND_SERVICE};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;
use k8s_openapi::api::networking::v1::Ingress;
use serde::Serialize;

/// One generated cluster resource. Serializes untagged to the full manifest
/// document, since the k8s-openapi types emit apiVersion/kind themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ManifestObject {
    Deployment(Deployment),
    Service(Service),
    Ingress(Ingress),
}

impl ManifestObject {
    pub fn kind(&self) -> &'static str {
        match self {
            ManifestObject::Deployment(_) => KIND_DEPLOYMENT,
            ManifestObject::Service(_) => KIND_SERVICE,
            ManifestObject::Ingress(_) => KIND_INGRESS,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ManifestObject::Deployment(d) => d.metadata.name.as_deref(),
            ManifestObject::Service(s) => s.metadata.name.as_deref(),
            ManifestObject::Ingress(i) => i.metadata.name.as_deref(),
        }
    }

    pub fn as_deployment(&self) -> Option<&Deployment> {
        match self {
            ManifestObject::Deployment(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_service(&self) -> Option<&Service> {
        match self {
            ManifestObject::Service(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ingress(&self) -> Option<&Ingress> {
        match self {
            ManifestObject::Ingress(i) => Some(i),
            _ => None,
        }
    }
}
