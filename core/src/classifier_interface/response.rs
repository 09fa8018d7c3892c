use crate::prelude::{BoundaryError, BoundaryResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reply body of the remote classifier, as received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ClassifierResponse {
    #[serde(default, alias = "label")]
    pub prediction: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ClassifierResponse {
    /// Accepts the reply only when it carries no error and a finite confidence.
    pub fn validate(self) -> BoundaryResult<Prediction> {
        if let Some(message) = self.error {
            return Err(BoundaryError::ClassifierFailure(message));
        }
        let confidence = self
            .confidence
            .filter(|value| value.is_finite())
            .ok_or(BoundaryError::MissingConfidence)?;
        Ok(Prediction {
            label: self.prediction,
            confidence,
            probabilities: self.probabilities,
        })
    }
}

/// A reply that passed boundary validation; the only input the registry takes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<BTreeMap<String, f64>>,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
            probabilities: None,
        }
    }

    pub fn with_probabilities(mut self, probabilities: BTreeMap<String, f64>) -> Self {
        self.probabilities = Some(probabilities);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_complete_reply() {
        let json = r#"{
            "prediction": "Confirmed Exoplanet",
            "confidence": 0.9731,
            "raw_prediction": 2,
            "probabilities": {"false_positive": 0.01, "candidate": 0.0169, "confirmed": 0.9731},
            "status": "success",
            "model_version": "ExoNeural-v2.0"
        }"#;
        let response: ClassifierResponse = serde_json::from_str(json).unwrap();
        let prediction = response.validate().unwrap();
        assert_eq!(prediction.label, "Confirmed Exoplanet");
        assert_eq!(prediction.confidence, 0.9731);
        assert_eq!(prediction.probabilities.unwrap()["candidate"], 0.0169);
    }

    #[test]
    fn validate_rejects_error_reply() {
        let json = r#"{"prediction": "Error", "confidence": 0.0, "error": "Model not loaded"}"#;
        let response: ClassifierResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.validate(),
            Err(BoundaryError::ClassifierFailure("Model not loaded".into()))
        );
    }

    #[test]
    fn validate_rejects_missing_confidence() {
        let response: ClassifierResponse =
            serde_json::from_str(r#"{"prediction": "Candidate Exoplanet"}"#).unwrap();
        assert_eq!(response.validate(), Err(BoundaryError::MissingConfidence));

        let response: ClassifierResponse =
            serde_json::from_str(r#"{"prediction": "Candidate", "confidence": null}"#).unwrap();
        assert_eq!(response.validate(), Err(BoundaryError::MissingConfidence));
    }

    #[test]
    fn validation_error_body_without_prediction_still_decodes() {
        let json = r#"{"error": "Validation error", "details": {"koi_teq": ["Missing"]}, "status": "error"}"#;
        let response: ClassifierResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            response.validate(),
            Err(BoundaryError::ClassifierFailure(_))
        ));
    }
}
