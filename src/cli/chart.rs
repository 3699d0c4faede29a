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

//! Chart resolution commands

use crate::domain::config::environment::overlay_from_vars;
use crate::domain::config::merger::{merge, MergeStrategy};
use crate::domain::config::raw::RawEnvironmentConfig;
use crate::domain::config::validator::validate;
use crate::domain::config::ChartFile;
use crate::domain::resolution::ResolutionPass;
use crate::infrastructure::kubernetes::manifest::ManifestObject;
use crate::infrastructure::registry::ComponentRegistry;
use clap::Parser;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::{error, info};

#[derive(Parser, Debug, Clone)]
pub struct GenerateCommand {
    /// Path to the chart file (TOML)
    #[arg(long, short = 'f', default_value = "chart.toml")]
    pub file: String,

    /// Environment to resolve (matches [components.<id>.environments.<env>])
    #[arg(long, short = 'e')]
    pub environment: String,

    /// Output file; stdout when omitted
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// How nested maps merge across layers (deep, replace)
    #[arg(long, default_value = "deep")]
    pub merge_strategy: String,

    /// Skip the CI environment variable overlay
    #[arg(long)]
    pub no_env_overlay: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateCommand {
    /// Path to the chart file (TOML)
    #[arg(long, short = 'f', default_value = "chart.toml")]
    pub file: String,

    /// Environment to resolve
    #[arg(long, short = 'e')]
    pub environment: String,

    /// How nested maps merge across layers (deep, replace)
    #[arg(long, default_value = "deep")]
    pub merge_strategy: String,

    /// Skip the CI environment variable overlay
    #[arg(long)]
    pub no_env_overlay: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Path to the chart file (TOML)
    #[arg(long, short = 'f', default_value = "chart.toml")]
    pub file: String,
}

/// Owned layer stack for one component, ready to move onto a worker task.
struct ComponentLayers {
    name: String,
    base: RawEnvironmentConfig,
    overrides: Vec<RawEnvironmentConfig>,
}

fn collect_layers(
    chart: &ChartFile,
    environment: &str,
    env_vars: Option<&HashMap<String, String>>,
    strategy: MergeStrategy,
) -> anyhow::Result<Vec<ComponentLayers>> {
    let mut components = Vec::new();

    for name in chart.component_names().map(str::to_string).collect::<Vec<_>>() {
        let layers = chart.layers_for(&name, environment)?;
        let base = layers.base.cloned().unwrap_or_default();
        let mut overrides: Vec<RawEnvironmentConfig> =
            layers.overrides.iter().map(|l| (*l).clone()).collect();

        if let Some(vars) = env_vars {
            // The overlay only adds an ingress section when the static
            // layers already declare one.
            let static_merged = merge(&base, &overrides, strategy);
            let overlay = overlay_from_vars(vars, static_merged.ingress.is_some());
            if !overlay.is_empty() {
                overrides.push(overlay);
            }
        }

        components.push(ComponentLayers {
            name,
            base,
            overrides,
        });
    }

    Ok(components)
}

impl GenerateCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let strategy: MergeStrategy = self.merge_strategy.parse()?;
        let chart = ChartFile::from(&self.file)?;

        let env_vars: Option<HashMap<String, String>> = if self.no_env_overlay {
            None
        } else {
            Some(std::env::vars().collect())
        };

        let components = collect_layers(&chart, &self.environment, env_vars.as_ref(), strategy)?;
        let registry = Arc::new(Mutex::new(ComponentRegistry::new()));

        // Resolution passes are pure, so components resolve concurrently;
        // registration stays serialized through the mutex, in component
        // order, so the output bundle is deterministic.
        let mut handles = Vec::with_capacity(components.len());
        for component in components {
            handles.push(tokio::spawn(async move {
                let pass = ResolutionPass::new(strategy);
                let refs: Vec<&RawEnvironmentConfig> = component.overrides.iter().collect();
                (component.name.clone(), pass.resolve(&component.base, &refs))
            }));
        }

        let mut failed = 0usize;
        for joined in futures::future::join_all(handles).await {
            let (name, result) = joined?;
            match result {
                Ok(manifests) => {
                    info!(component = %name, objects = manifests.len(), "resolved component");
                    lock_registry(&registry)?.register(name, manifests)?;
                }
                Err(e) => {
                    // One component's misconfiguration must not block the
                    // others; it just never reaches the registry.
                    error!(component = %name, "resolution failed: {}", e);
                    failed += 1;
                }
            }
        }

        let registry = lock_registry(&registry)?;
        let rendered = render_bundle(registry.all())?;

        match self.output {
            Some(ref path) => {
                let mut file = std::fs::File::create(path)?;
                file.write_all(rendered.as_bytes())?;
                info!(path = %path, components = registry.len(), "wrote manifest bundle");
            }
            None => print!("{}", rendered),
        }

        if failed > 0 {
            anyhow::bail!("{} component(s) failed to resolve", failed);
        }
        Ok(())
    }
}

impl ValidateCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let strategy: MergeStrategy = self.merge_strategy.parse()?;
        let chart = ChartFile::from(&self.file)?;

        let env_vars: Option<HashMap<String, String>> = if self.no_env_overlay {
            None
        } else {
            Some(std::env::vars().collect())
        };

        let components = collect_layers(&chart, &self.environment, env_vars.as_ref(), strategy)?;

        let mut failed = 0usize;
        for component in &components {
            let merged = merge(&component.base, &component.overrides, strategy);
            match validate(&merged) {
                Ok(params) => {
                    info!(
                        component = %component.name,
                        image = %params.image.reference(),
                        "configuration valid"
                    );
                }
                Err(e) => {
                    error!(component = %component.name, "invalid configuration: {}", e);
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            anyhow::bail!("{} component(s) failed validation", failed);
        }
        println!("{} component(s) valid", components.len());
        Ok(())
    }
}

impl ListCommand {
    pub async fn execute(&self) -> anyhow::Result<()> {
        let chart = ChartFile::from(&self.file)?;

        for (name, entry) in &chart.components {
            let environments: Vec<&str> =
                entry.environments.keys().map(String::as_str).collect();
            if environments.is_empty() {
                println!("{}", name);
            } else {
                println!("{} ({})", name, environments.join(", "));
            }
        }
        Ok(())
    }
}

// A poisoned lock means a resolver task panicked while registering; surface
// that instead of panicking in turn.
fn lock_registry(
    registry: &Arc<Mutex<ComponentRegistry>>,
) -> anyhow::Result<std::sync::MutexGuard<'_, ComponentRegistry>> {
    registry
        .lock()
        .map_err(|_| anyhow::anyhow!("component registry lock poisoned"))
}

/// Render the registry as a `---`-separated YAML stream, components in
/// registration order, objects in factory order.
fn render_bundle(entries: &[(String, Vec<ManifestObject>)]) -> anyhow::Result<String> {
    let mut out = String::new();
    for (_, manifests) in entries {
        for manifest in manifests {
            out.push_str("---\n");
            out.push_str(&serde_yaml::to_string(manifest)?);
        }
    }
    Ok(out)
}
