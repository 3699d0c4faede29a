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

//! Naming and labeling conventions
//!
//! All generated objects of a component share the component's name, carry
//! the same label set, and the Service selector equals the Deployment's pod
//! labels. Deriving is a pure function of the parameters, so regenerating a
//! component always yields identical names and selectors.

use crate::domain::config::params::ComponentParameters;
use crate::infrastructure::constants::LABEL_APP;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct NamingDecisions {
    /// Canonical name stamped on every generated object.
    pub object_name: String,
    /// Labels stamped on every generated object, including the pod template.
    pub labels: BTreeMap<String, String>,
    /// Selector binding the Service to the Deployment's pods.
    pub selector: BTreeMap<String, String>,
}

impl NamingDecisions {
    pub fn derive(params: &ComponentParameters) -> Self {
        let mut labels = params.labels.clone();
        labels.insert(LABEL_APP.to_string(), params.name.clone());

        Self {
            object_name: params.name.clone(),
            selector: labels.clone(),
            labels,
        }
    }
}
