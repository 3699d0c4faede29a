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

//! Manifest generation
//!
//! Turns validated parameters plus naming decisions into the ordered
//! manifest set for one component: Deployment, then Service, then Ingress
//! when configured. Downstream serializers depend on this fixed order for
//! readable diffs.

use crate::domain::config::params::{ComponentParameters, ResourceQuantities};
use crate::domain::config::quantity::{parse_cpu_millis, parse_memory_bytes};
use crate::infrastructure::kubernetes::manifest::ManifestObject;
use crate::infrastructure::kubernetes::naming::NamingDecisions;
use crate::infrastructure::kubernetes::resources::{
    DeploymentBuilder, IngressBuilder, ServiceBuilder,
};
use crate::shared::error::{ChartError, Result};

pub struct ManifestFactory;

impl ManifestFactory {
    /// Build the manifest set for one component.
    ///
    /// Fails with `InvalidResourceSpec` when a normalized resource request
    /// exceeds its limit; the component then registers nothing.
    pub fn build(
        params: &ComponentParameters,
        naming: &NamingDecisions,
    ) -> Result<Vec<ManifestObject>> {
        check_requests_within_limits(params.requests.as_ref(), params.limits.as_ref())?;

        let mut manifests = Vec::with_capacity(3);
        manifests.push(ManifestObject::Deployment(
            DeploymentBuilder::new(params, naming).build()?,
        ));
        manifests.push(ManifestObject::Service(
            ServiceBuilder::new(params, naming).build()?,
        ));

        if let Some(ref ingress) = params.ingress {
            manifests.push(ManifestObject::Ingress(
                IngressBuilder::new(params, ingress, naming).build()?,
            ));
        }

        Ok(manifests)
    }
}

// Validation already proved both grammars, so parse failures cannot occur
// here; the check compares normalized units only where both sides are set.
fn check_requests_within_limits(
    requests: Option<&ResourceQuantities>,
    limits: Option<&ResourceQuantities>,
) -> Result<()> {
    let (Some(requests), Some(limits)) = (requests, limits) else {
        return Ok(());
    };

    if let (Some(req), Some(lim)) = (requests.cpu.as_deref(), limits.cpu.as_deref()) {
        if parse_cpu_millis(req)? > parse_cpu_millis(lim)? {
            return Err(ChartError::invalid_resource_spec("cpu", req, lim));
        }
    }

    if let (Some(req), Some(lim)) = (requests.memory.as_deref(), limits.memory.as_deref()) {
        if parse_memory_bytes(req)? > parse_memory_bytes(lim)? {
            return Err(ChartError::invalid_resource_spec("memory", req, lim));
        }
    }

    Ok(())
}
