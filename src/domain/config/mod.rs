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

//! Configuration domain

pub mod chart;
pub mod environment;
pub mod merger;
pub mod params;
pub mod quantity;
pub mod raw;
pub mod validator;

// Re-export raw configuration layers
pub use self::raw::{RawEnvironmentConfig, RawImage, RawIngress, RawResources};

// Re-export resolved parameter types
pub use self::params::{ComponentParameters, ImageRef, IngressParams, ResourceQuantities};

// Re-export the resolution pipeline pieces
pub use self::chart::{ChartFile, ComponentEntry, LayerSet};
pub use self::environment::overlay_from_vars;
pub use self::merger::{merge, MergeStrategy};
pub use self::quantity::{parse_cpu_millis, parse_memory_bytes};
pub use self::validator::validate;
