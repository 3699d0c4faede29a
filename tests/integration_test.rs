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

#[cfg(test)]
mod tests {
    use charted_kube::domain::config::environment::{
        overlay_from_vars, CI_COMMIT_SHA, CI_REGISTRY_IMAGE, PRODUCTION,
    };
    use charted_kube::*;
    use std::collections::{BTreeMap, HashMap};
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    const CHART: &str = r#"
[defaults]
service_port = 80

[defaults.requests]
cpu = "100m"
memory = "128Mi"

[defaults.limits]
cpu = "1000m"
memory = "256Mi"

[components.api.base]
name = "api"
container_port = 3000

[components.api.base.image]
repository = "registry.example.com/cdtn/api"
tag = "latest"

[components.api.base.labels]
component = "cdtn-api"

[components.api.environments.prod.ingress]
secret_name = "www-crt"
hosts = ["api.example.com"]

[components.www.base]
name = "www"
container_port = 8080

[components.www.base.image]
repository = "registry.example.com/cdtn/www"
tag = "latest"
"#;

    fn load_chart() -> ChartFile {
        ChartFile::from_toml(CHART).expect("chart should parse")
    }

    fn resolve(chart: &ChartFile, component: &str, environment: &str) -> Vec<ManifestObject> {
        let layers = chart.layers_for(component, environment).unwrap();
        let base = layers.base.cloned().unwrap_or_default();
        ResolutionPass::default()
            .resolve(&base, &layers.overrides)
            .expect("resolution should succeed")
    }

    #[test]
    fn test_full_resolution_without_ingress() {
        let chart = load_chart();
        let manifests = resolve(&chart, "api", "dev");

        let kinds: Vec<_> = manifests.iter().map(|m| m.kind()).collect();
        assert_eq!(kinds, vec!["Deployment", "Service"]);

        // Defaults layer contributed the service port and resources
        let service = manifests[1].as_service().unwrap();
        let port = &service.spec.as_ref().unwrap().ports.as_ref().unwrap()[0];
        assert_eq!(port.port, 80);

        let deployment = manifests[0].as_deployment().unwrap();
        let container =
            &deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap().containers[0];
        let resources = container.resources.as_ref().unwrap();
        assert_eq!(
            resources.requests.as_ref().unwrap().get("cpu").unwrap().0,
            "100m"
        );
    }

    #[test]
    fn test_prod_environment_adds_ingress() {
        let chart = load_chart();
        let manifests = resolve(&chart, "api", "prod");

        let kinds: Vec<_> = manifests.iter().map(|m| m.kind()).collect();
        assert_eq!(kinds, vec!["Deployment", "Service", "Ingress"]);

        let ingress = manifests[2].as_ingress().unwrap();
        let spec = ingress.spec.as_ref().unwrap();
        let tls = &spec.tls.as_ref().unwrap()[0];
        assert_eq!(tls.secret_name.as_deref(), Some("www-crt"));

        // Backend wired to the component's Service
        let backend = spec.rules.as_ref().unwrap()[0]
            .http
            .as_ref()
            .unwrap()
            .paths[0]
            .backend
            .service
            .as_ref()
            .unwrap();
        assert_eq!(backend.name, "api");
        assert_eq!(backend.port.as_ref().unwrap().number, Some(80));
    }

    #[test]
    fn test_wiring_invariant_across_components() {
        let chart = load_chart();
        for component in ["api", "www"] {
            let manifests = resolve(&chart, component, "prod");
            let deployment = manifests[0].as_deployment().unwrap();
            let pod_labels = deployment
                .spec
                .as_ref()
                .unwrap()
                .template
                .metadata
                .as_ref()
                .unwrap()
                .labels
                .clone()
                .unwrap();
            let selector = manifests[1]
                .as_service()
                .unwrap()
                .spec
                .as_ref()
                .unwrap()
                .selector
                .clone()
                .unwrap();
            assert_eq!(selector, pod_labels);
        }
    }

    #[test]
    fn test_resolution_is_byte_identical() {
        let chart = load_chart();
        let first = resolve(&chart, "api", "prod");
        let second = resolve(&chart, "api", "prod");

        let render = |manifests: &[ManifestObject]| {
            manifests
                .iter()
                .map(|m| serde_yaml::to_string(m).unwrap())
                .collect::<Vec<_>>()
                .join("---\n")
        };
        assert_eq!(render(&first), render(&second));
    }

    #[test]
    fn test_ci_overlay_overrides_image() {
        let chart = load_chart();
        let layers = chart.layers_for("api", "dev").unwrap();
        let base = layers.base.cloned().unwrap_or_default();

        let vars: HashMap<String, String> = [
            (CI_REGISTRY_IMAGE.to_string(), "registry.gitlab.com/cdtn/api".to_string()),
            (CI_COMMIT_SHA.to_string(), "deadbeef".to_string()),
        ]
        .into();
        let overlay = overlay_from_vars(&vars, false);

        let mut overrides = layers.overrides.clone();
        overrides.push(&overlay);

        let manifests = ResolutionPass::default().resolve(&base, &overrides).unwrap();
        let deployment = manifests[0].as_deployment().unwrap();
        let container =
            &deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap().containers[0];
        assert_eq!(
            container.image.as_deref(),
            Some("registry.gitlab.com/cdtn/api:deadbeef")
        );
    }

    #[test]
    fn test_production_flag_switches_tls_secret() {
        let vars: HashMap<String, String> =
            [(PRODUCTION.to_string(), "true".to_string())].into();
        let overlay = overlay_from_vars(&vars, true);
        assert_eq!(
            overlay.ingress.unwrap().secret_name.as_deref(),
            Some("www-crt")
        );
    }

    #[test]
    fn test_failed_component_is_isolated() {
        let broken = RawEnvironmentConfig {
            name: Some("broken".to_string()),
            ..Default::default()
        };
        let pass = ResolutionPass::default();

        let mut registry = ComponentRegistry::new();
        assert!(pass.resolve(&broken, &[]).is_err());

        // The healthy component still resolves and registers
        let chart = load_chart();
        let manifests = resolve(&chart, "www", "dev");
        registry.register("www", manifests).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.all()[0].0, "www");
    }

    #[test]
    fn test_chart_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CHART.as_bytes()).unwrap();

        let chart = ChartFile::from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            chart.component_names().collect::<Vec<_>>(),
            vec!["api", "www"]
        );
    }

    #[tokio::test]
    async fn test_concurrent_resolution_single_writer() {
        let chart = Arc::new(load_chart());
        let registry = Arc::new(Mutex::new(ComponentRegistry::new()));

        let mut handles = Vec::new();
        for component in ["api", "www"] {
            let chart = Arc::clone(&chart);
            handles.push(tokio::spawn(async move {
                let layers = chart.layers_for(component, "prod").unwrap();
                let base = layers.base.cloned().unwrap_or_default();
                let manifests = ResolutionPass::default()
                    .resolve(&base, &layers.overrides)
                    .unwrap();
                (component.to_string(), manifests)
            }));
        }

        // Registration order follows join order, not task completion order
        for handle in handles {
            let (name, manifests) = handle.await.unwrap();
            registry.lock().unwrap().register(name, manifests).unwrap();
        }

        let registry = registry.lock().unwrap();
        let names: Vec<_> = registry.all().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["api", "www"]);
    }
}
