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

//! Component registry
//!
//! Aggregates the manifest sets of independently resolved components into
//! one output bundle. An explicitly owned instance, not process-global;
//! callers resolving components concurrently must serialize `register`
//! (single-writer, e.g. behind a mutex) to keep uniqueness and ordering.

use crate::infrastructure::kubernetes::manifest::ManifestObject;
use crate::shared::error::{ChartError, Result};
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct ComponentRegistry {
    entries: Vec<(String, Vec<ManifestObject>)>,
    names: HashSet<String>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component's manifest set. Fails with `DuplicateComponent`
    /// when the name is already present; the registry is left unchanged.
    pub fn register(&mut self, name: impl Into<String>, manifests: Vec<ManifestObject>) -> Result<()> {
        let name = name.into();
        if !self.names.insert(name.clone()) {
            return Err(ChartError::duplicate_component(name));
        }
        self.entries.push((name, manifests));
        Ok(())
    }

    /// All registered components in registration order.
    pub fn all(&self) -> &[(String, Vec<ManifestObject>)] {
        &self.entries
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
