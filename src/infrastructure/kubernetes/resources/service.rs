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

use crate::domain::config::params::ComponentParameters;
use crate::infrastructure::constants::PORT_NAME_HTTP;
use crate::infrastructure::kubernetes::naming::NamingDecisions;
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

pub struct ServiceBuilder<'a> {
    params: &'a ComponentParameters,
    naming: &'a NamingDecisions,
}

impl<'a> ServiceBuilder<'a> {
    pub fn new(params: &'a ComponentParameters, naming: &'a NamingDecisions) -> Self {
        Self { params, naming }
    }

    pub fn build(&self) -> Result<Service> {
        let metadata = ObjectMeta {
            name: Some(self.naming.object_name.clone()),
            labels: Some(self.naming.labels.clone()),
            ..Default::default()
        };

        // The service port fronts the container port; the selector must
        // equal the Deployment's pod labels.
        let service = Service {
            metadata,
            spec: Some(ServiceSpec {
                ports: Some(vec![ServicePort {
                    name: Some(PORT_NAME_HTTP.to_string()),
                    port: self.params.service_port,
                    target_port: Some(IntOrString::Int(self.params.container_port)),
                    protocol: Some("TCP".to_string()),
                    ..Default::default()
                }]),
                selector: Some(self.naming.selector.clone()),
                ..Default::default()
            }),
            ..Default::default()
        };

        Ok(service)
    }
}
