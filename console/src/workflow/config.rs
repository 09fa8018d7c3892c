use anyhow::Context;
use exocore::classifier_interface::{Hyperparameters, ModelSelection, ModelSelector};
use exocore::FallbackDefaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Base URL of the classifier; requests go to `<endpoint>/predict`.
    pub endpoint: String,
    pub model: ModelSelector,
    pub hyperparameters: Hyperparameters,
    pub bind_address: SocketAddr,
    /// Seed for planet designations; entropy when absent.
    pub name_seed: Option<u64>,
    pub fallbacks: FallbackDefaults,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: ModelSelector::default(),
            hyperparameters: Hyperparameters::default(),
            bind_address: default_bind_address(),
            name_seed: None,
            fallbacks: FallbackDefaults::default(),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        endpoint: Option<String>,
        model: ModelSelector,
        name_seed: Option<u64>,
    ) -> Self {
        Self {
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model,
            name_seed,
            ..Default::default()
        }
    }

    pub fn to_model_selection(&self) -> ModelSelection {
        ModelSelection::new(self.model, self.hyperparameters)
    }
}
