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

//! CI environment overlay
//!
//! Builds an override layer from GitLab-CI style variables so pipelines can
//! inject the image reference and TLS secret without touching the chart
//! file. The overlay is one more layer for the merger; chart file values it
//! does not set survive untouched. Callers snapshot the process environment
//! once and pass it in, keeping this module pure.

use crate::domain::config::raw::{RawEnvironmentConfig, RawImage, RawIngress};
use std::collections::HashMap;

pub const CI_REGISTRY_IMAGE: &str = "CI_REGISTRY_IMAGE";
pub const CI_COMMIT_TAG: &str = "CI_COMMIT_TAG";
pub const CI_COMMIT_SHA: &str = "CI_COMMIT_SHA";
pub const PRODUCTION: &str = "PRODUCTION";

/// TLS secret names selected by the production flag.
pub const PRODUCTION_TLS_SECRET: &str = "www-crt";
pub const WILDCARD_TLS_SECRET: &str = "wildcard-crt";

/// Build the overlay from an explicit variable map.
///
/// - `CI_REGISTRY_IMAGE` sets the image repository.
/// - `CI_COMMIT_TAG` (leading `v` stripped) sets the image tag, falling back
///   to `CI_COMMIT_SHA`.
/// - `PRODUCTION` selects the TLS secret name, applied only when
///   `has_ingress` is set so components without an ingress never grow one.
pub fn overlay_from_vars(vars: &HashMap<String, String>, has_ingress: bool) -> RawEnvironmentConfig {
    let mut overlay = RawEnvironmentConfig::default();

    let repository = non_empty(vars.get(CI_REGISTRY_IMAGE));
    let tag = non_empty(vars.get(CI_COMMIT_TAG))
        .map(|t| t.strip_prefix('v').unwrap_or(&t).to_string())
        .or_else(|| non_empty(vars.get(CI_COMMIT_SHA)));

    if repository.is_some() || tag.is_some() {
        overlay.image = Some(RawImage { repository, tag });
    }

    if has_ingress {
        let secret = if is_truthy(vars.get(PRODUCTION)) {
            PRODUCTION_TLS_SECRET
        } else {
            WILDCARD_TLS_SECRET
        };
        overlay.ingress = Some(RawIngress {
            secret_name: Some(secret.to_string()),
            hosts: None,
        });
    }

    overlay
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

fn is_truthy(value: Option<&String>) -> bool {
    match value {
        None => false,
        Some(s) => !s.is_empty() && s != "0" && s.to_lowercase() != "false",
    }
}
