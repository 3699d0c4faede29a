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

use crate::domain::config::params::{ComponentParameters, ResourceQuantities};
use crate::infrastructure::constants::{PORT_NAME_HTTP, RESOURCE_CPU, RESOURCE_MEMORY};
use crate::infrastructure::kubernetes::naming::NamingDecisions;
use crate::shared::error::Result;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, PodSpec, PodTemplateSpec, ResourceRequirements,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use std::collections::BTreeMap;

pub struct DeploymentBuilder<'a> {
    params: &'a ComponentParameters,
    naming: &'a NamingDecisions,
}

impl<'a> DeploymentBuilder<'a> {
    pub fn new(params: &'a ComponentParameters, naming: &'a NamingDecisions) -> Self {
        Self { params, naming }
    }

    pub fn build(&self) -> Result<Deployment> {
        let metadata = ObjectMeta {
            name: Some(self.naming.object_name.clone()),
            labels: Some(self.naming.labels.clone()),
            annotations: if self.params.annotations.is_empty() {
                None
            } else {
                Some(self.params.annotations.clone())
            },
            ..Default::default()
        };

        let container = Container {
            name: self.naming.object_name.clone(),
            image: Some(self.params.image.reference()),
            ports: Some(vec![ContainerPort {
                container_port: self.params.container_port,
                name: Some(PORT_NAME_HTTP.to_string()),
                ..Default::default()
            }]),
            resources: self.build_resources(),
            ..Default::default()
        };

        let deployment = Deployment {
            metadata,
            spec: Some(DeploymentSpec {
                replicas: Some(self.params.replicas),
                selector: LabelSelector {
                    match_labels: Some(self.naming.selector.clone()),
                    ..Default::default()
                },
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: Some(self.naming.labels.clone()),
                        ..Default::default()
                    }),
                    spec: Some(PodSpec {
                        containers: vec![container],
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        };

        Ok(deployment)
    }

    // Quantities are copied verbatim; normalization is only used for the
    // request-vs-limit check in the factory.
    fn build_resources(&self) -> Option<ResourceRequirements> {
        let requests = quantity_map(self.params.requests.as_ref());
        let limits = quantity_map(self.params.limits.as_ref());

        if requests.is_none() && limits.is_none() {
            return None;
        }

        Some(ResourceRequirements {
            requests,
            limits,
            ..Default::default()
        })
    }
}

fn quantity_map(quantities: Option<&ResourceQuantities>) -> Option<BTreeMap<String, Quantity>> {
    let quantities = quantities?;
    let mut map = BTreeMap::new();
    if let Some(ref cpu) = quantities.cpu {
        map.insert(RESOURCE_CPU.to_string(), Quantity(cpu.clone()));
    }
    if let Some(ref memory) = quantities.memory {
        map.insert(RESOURCE_MEMORY.to_string(), Quantity(memory.clone()));
    }
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}
