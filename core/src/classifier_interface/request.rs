use super::features::{FeatureName, FeatureVector};
use crate::prelude::BoundaryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Model family the remote classifier should use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ModelSelector {
    #[default]
    LightGBM,
    XGBoost,
    RandomForest,
    Ensemble,
}

impl ModelSelector {
    pub const ALL: [ModelSelector; 4] = [
        ModelSelector::LightGBM,
        ModelSelector::XGBoost,
        ModelSelector::RandomForest,
        ModelSelector::Ensemble,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelSelector::LightGBM => "LightGBM",
            ModelSelector::XGBoost => "XGBoost",
            ModelSelector::RandomForest => "RandomForest",
            ModelSelector::Ensemble => "Ensemble",
        }
    }

    /// Published validation accuracy for each model family.
    pub fn reported_accuracy(self) -> f64 {
        match self {
            ModelSelector::LightGBM => 0.9295,
            ModelSelector::XGBoost => 0.9275,
            ModelSelector::RandomForest | ModelSelector::Ensemble => 0.9314,
        }
    }

    pub fn accepts_hyperparameters(self) -> bool {
        self != ModelSelector::Ensemble
    }
}

impl fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSelector {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|model| model.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BoundaryError::InvalidField(format!("unknown model `{s}`")))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Hyperparameters {
    pub n_estimators: u32,
    pub max_depth: u32,
    pub learning_rate: f64,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 10,
            learning_rate: 0.1,
        }
    }
}

/// Model selector plus tuning knobs, flattened into the request body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ModelSelection {
    #[serde(rename = "model_name", default)]
    pub model: ModelSelector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_estimators: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,
}

impl ModelSelection {
    /// Builds a selection; the ensemble takes no hyperparameters and drops them.
    pub fn new(model: ModelSelector, hyperparameters: Hyperparameters) -> Self {
        if model.accepts_hyperparameters() {
            Self {
                model,
                n_estimators: Some(hyperparameters.n_estimators),
                max_depth: Some(hyperparameters.max_depth),
                learning_rate: Some(hyperparameters.learning_rate),
            }
        } else {
            Self {
                model,
                ..Default::default()
            }
        }
    }
}

impl fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.2}% reported accuracy",
            self.model,
            self.model.reported_accuracy() * 100.0
        )?;
        if let (Some(trees), Some(depth), Some(rate)) =
            (self.n_estimators, self.max_depth, self.learning_rate)
        {
            write!(f, ", {trees} trees, depth {depth}, learning rate {rate}")?;
        }
        f.write_str(")")
    }
}

/// One classification request: the 25 parameters and the model selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ClassificationRequest {
    #[serde(flatten)]
    pub features: FeatureVector,
    #[serde(flatten)]
    pub selection: ModelSelection,
}

impl ClassificationRequest {
    pub fn new(features: FeatureVector, selection: ModelSelection) -> Self {
        Self {
            features,
            selection,
        }
    }

    pub fn feature(&self, name: FeatureName) -> Option<f64> {
        self.features.get(name)
    }
}
