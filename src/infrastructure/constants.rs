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

/// Resource labels
pub const LABEL_APP: &str = "app";

/// Container and port names
pub const PORT_NAME_HTTP: &str = "http";

/// Ingress defaults
pub const INGRESS_PATH: &str = "/";
pub const INGRESS_PATH_TYPE: &str = "Prefix";

/// Resource keys on container requirements
pub const RESOURCE_CPU: &str = "cpu";
pub const RESOURCE_MEMORY: &str = "memory";

/// Manifest kinds, in output order
pub const KIND_DEPLOYMENT: &str = "Deployment";
pub const KIND_SERVICE: &str = "Service";
pub const KIND_INGRESS: &str = "Ingress";
