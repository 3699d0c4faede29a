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

//! Resolution pass
//!
//! One pass turns ordered raw layers into the manifest set of a single
//! component: merge, validate, derive naming, build. The pass is a pure
//! function with no shared state, so components resolve independently and
//! one component's failure never affects another's.

use crate::domain::config::merger::{merge, MergeStrategy};
use crate::domain::config::raw::RawEnvironmentConfig;
use crate::domain::config::validator::validate;
use crate::infrastructure::kubernetes::factory::ManifestFactory;
use crate::infrastructure::kubernetes::manifest::ManifestObject;
use crate::infrastructure::kubernetes::naming::NamingDecisions;
use crate::shared::error::Result;

pub struct ResolutionPass {
    strategy: MergeStrategy,
}

impl ResolutionPass {
    pub fn new(strategy: MergeStrategy) -> Self {
        Self { strategy }
    }

    /// Resolve one component from its ordered layers. `base` is the lowest
    /// precedence layer; later entries in `overrides` win field-by-field.
    pub fn resolve(
        &self,
        base: &RawEnvironmentConfig,
        overrides: &[&RawEnvironmentConfig],
    ) -> Result<Vec<ManifestObject>> {
        let layers: Vec<RawEnvironmentConfig> =
            overrides.iter().map(|layer| (*layer).clone()).collect();
        let merged = merge(base, &layers, self.strategy);

        let params = validate(&merged)?;
        let naming = NamingDecisions::derive(&params);
        ManifestFactory::build(&params, &naming)
    }
}

impl Default for ResolutionPass {
    fn default() -> Self {
        Self::new(MergeStrategy::Deep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::raw::RawImage;
    use std::collections::BTreeMap;

    fn base() -> RawEnvironmentConfig {
        RawEnvironmentConfig {
            name: Some("api".to_string()),
            image: Some(RawImage {
                repository: Some("r".to_string()),
                tag: Some("t".to_string()),
            }),
            container_port: Some(3000),
            service_port: Some(80),
            ..Default::default()
        }
    }

    // The end-to-end scenario: base plus a label-only override yields two
    // objects whose selector carries the override label.
    #[test]
    fn test_base_with_label_override() {
        let override_layer = RawEnvironmentConfig {
            labels: Some(BTreeMap::from([(
                "component".to_string(),
                "cdtn-api".to_string(),
            )])),
            ..Default::default()
        };

        let manifests = ResolutionPass::default()
            .resolve(&base(), &[&override_layer])
            .unwrap();

        assert_eq!(manifests.len(), 2);
        assert_eq!(manifests[0].kind(), "Deployment");
        assert_eq!(manifests[1].kind(), "Service");

        let selector = manifests[1]
            .as_service()
            .unwrap()
            .spec
            .as_ref()
            .unwrap()
            .selector
            .clone()
            .unwrap();
        assert_eq!(
            selector.get("component").map(String::as_str),
            Some("cdtn-api")
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let pass = ResolutionPass::default();
        let first = pass.resolve(&base(), &[]).unwrap();
        let second = pass.resolve(&base(), &[]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_layer_fails_cleanly() {
        let broken = RawEnvironmentConfig {
            container_port: Some(0),
            ..Default::default()
        };
        assert!(ResolutionPass::default()
            .resolve(&base(), &[&broken])
            .is_err());
    }
}
