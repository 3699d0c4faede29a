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

use crate::domain::config::params::{ComponentParameters, IngressParams};
use crate::infrastructure::constants::{INGRESS_PATH, INGRESS_PATH_TYPE};
use crate::infrastructure::kubernetes::naming::NamingDecisions;
use crate::shared::error::Result;
use k8s_openapi::api::networking::v1::{
    HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule,
    IngressServiceBackend, IngressSpec, IngressTLS, ServiceBackendPort,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

pub struct IngressBuilder<'a> {
    params: &'a ComponentParameters,
    ingress: &'a IngressParams,
    naming: &'a NamingDecisions,
}

impl<'a> IngressBuilder<'a> {
    pub fn new(
        params: &'a ComponentParameters,
        ingress: &'a IngressParams,
        naming: &'a NamingDecisions,
    ) -> Self {
        Self {
            params,
            ingress,
            naming,
        }
    }

    pub fn build(&self) -> Result<Ingress> {
        let metadata = ObjectMeta {
            name: Some(self.naming.object_name.clone()),
            labels: Some(self.naming.labels.clone()),
            ..Default::default()
        };

        // Every rule routes to the component's Service on its service port.
        let rules = if self.ingress.hosts.is_empty() {
            vec![self.build_rule(None)]
        } else {
            self.ingress
                .hosts
                .iter()
                .map(|host| self.build_rule(Some(host.clone())))
                .collect()
        };

        let tls = IngressTLS {
            secret_name: Some(self.ingress.secret_name.clone()),
            hosts: if self.ingress.hosts.is_empty() {
                None
            } else {
                Some(self.ingress.hosts.clone())
            },
        };

        let ingress = Ingress {
            metadata,
            spec: Some(IngressSpec {
                rules: Some(rules),
                tls: Some(vec![tls]),
                ..Default::default()
            }),
            ..Default::default()
        };

        Ok(ingress)
    }

    fn build_rule(&self, host: Option<String>) -> IngressRule {
        IngressRule {
            host,
            http: Some(HTTPIngressRuleValue {
                paths: vec![HTTPIngressPath {
                    path: Some(INGRESS_PATH.to_string()),
                    path_type: INGRESS_PATH_TYPE.to_string(),
                    backend: IngressBackend {
                        service: Some(IngressServiceBackend {
                            name: self.naming.object_name.clone(),
                            port: Some(ServiceBackendPort {
                                number: Some(self.params.service_port),
                                ..Default::default()
                            }),
                        }),
                        ..Default::default()
                    },
                }],
            }),
        }
    }
}
