use anyhow::{bail, Context};
use exocore::classifier_interface::{
    ClassificationRequest, ClassifierResponse, DerivedFeatures, FeatureName,
};
use std::collections::BTreeMap;

/// Something that can turn a request into a raw classifier reply.
///
/// Transport failures are errors; a reply that reports a failure in its body
/// is returned as-is and rejected later by boundary validation.
#[allow(async_fn_in_trait)]
pub trait Classifier {
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> anyhow::Result<ClassifierResponse>;
}

/// Posts requests to a remote `/predict` endpoint.
pub struct HttpClassifier {
    client: reqwest::Client,
    predict_url: String,
}

impl HttpClassifier {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            predict_url: format!("{}/predict", endpoint.trim_end_matches('/')),
        }
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

impl Classifier for HttpClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> anyhow::Result<ClassifierResponse> {
        let response = self
            .client
            .post(&self.predict_url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("posting to {}", self.predict_url))?;
        let status = response.status();
        let body: ClassifierResponse = response
            .json()
            .await
            .with_context(|| format!("decoding classifier reply ({status})"))?;
        if !status.is_success() && body.error.is_none() {
            bail!("classifier returned {status}");
        }
        Ok(body)
    }
}

const CONFIRMED_SNR: f64 = 15.0;
const CANDIDATE_SNR: f64 = 7.1;

/// Offline stand-in for the remote model, driven by the false-positive flags
/// and the transit signal-to-noise ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn evaluate(&self, request: &ClassificationRequest) -> ClassifierResponse {
        let flags = DerivedFeatures::from_features(&request.features)
            .total_fp_flags
            .unwrap_or(0.0);
        let snr = request.feature(FeatureName::KoiModelSnr).unwrap_or(0.0);

        let (label, key, confidence) = if flags > 0.0 {
            ("False Positive", "false_positive", (0.75 + 0.05 * flags).min(0.95))
        } else if snr >= CONFIRMED_SNR {
            ("Confirmed Exoplanet", "confirmed", 0.8 + (snr / 1000.0).min(0.19))
        } else if snr >= CANDIDATE_SNR {
            let progress = (snr - CANDIDATE_SNR) / (CONFIRMED_SNR - CANDIDATE_SNR);
            ("Candidate Exoplanet", "candidate", 0.55 + 0.3 * progress)
        } else {
            ("False Positive", "false_positive", 0.6)
        };
        let confidence = round4(confidence);

        let remainder = round4((1.0 - confidence) / 2.0);
        let probabilities: BTreeMap<String, f64> = ["false_positive", "candidate", "confirmed"]
            .into_iter()
            .map(|class| {
                let p = if class == key { confidence } else { remainder };
                (class.to_string(), p)
            })
            .collect();

        ClassifierResponse {
            prediction: label.to_string(),
            confidence: Some(confidence),
            probabilities: Some(probabilities),
            status: Some("success".to_string()),
            model_version: Some("heuristic".to_string()),
            ..Default::default()
        }
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

impl Classifier for HeuristicClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> anyhow::Result<ClassifierResponse> {
        Ok(self.evaluate(request))
    }
}

/// Runtime choice between the remote model and the offline heuristic.
pub enum ClassifierKind {
    Http(HttpClassifier),
    Heuristic(HeuristicClassifier),
}

impl ClassifierKind {
    pub fn describe(&self) -> String {
        match self {
            ClassifierKind::Http(http) => format!("remote classifier at {}", http.predict_url()),
            ClassifierKind::Heuristic(_) => "offline heuristic classifier".to_string(),
        }
    }
}

impl Classifier for ClassifierKind {
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> anyhow::Result<ClassifierResponse> {
        match self {
            ClassifierKind::Http(http) => http.classify(request).await,
            ClassifierKind::Heuristic(heuristic) => heuristic.classify(request).await,
        }
    }
}
