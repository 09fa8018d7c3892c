use crate::workflow::classifier::Classifier;
use anyhow::Context;
use exocore::classifier_interface::{ClassificationRequest, FEATURE_COUNT};
use exocore::telemetry::MetricsRecorder;
use exocore::{Detection, PlanetRegistry};
use log::{info, warn};
use std::sync::{Arc, PoisonError, RwLock};

/// Registry handle shared between the runner and the HTTP bridge.
pub type SharedRegistry = Arc<RwLock<PlanetRegistry>>;

pub fn share(registry: PlanetRegistry) -> SharedRegistry {
    Arc::new(RwLock::new(registry))
}

/// Outcome of a batch submission, in row order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub recorded: Vec<Detection>,
    pub rejected: Vec<(usize, String)>,
}

/// Names the parameters the request lacks, as the input form captions them.
fn missing_summary(request: &ClassificationRequest) -> Option<String> {
    let missing = request.features.missing();
    if missing.is_empty() {
        return None;
    }
    let names: Vec<String> = missing.iter().map(|name| name.describe()).collect();
    Some(format!(
        "{} of {} parameters missing: {}",
        missing.len(),
        FEATURE_COUNT,
        names.join(", ")
    ))
}

pub struct Runner<C> {
    classifier: C,
    registry: SharedRegistry,
    metrics: Arc<MetricsRecorder>,
}

impl<C: Classifier> Runner<C> {
    pub fn new(classifier: C, registry: SharedRegistry, metrics: Arc<MetricsRecorder>) -> Self {
        Self {
            classifier,
            registry,
            metrics,
        }
    }

    /// Classifies one request and records it when the reply validates.
    pub async fn submit(&self, request: ClassificationRequest) -> anyhow::Result<Detection> {
        if let Some(summary) = missing_summary(&request) {
            warn!("{}", summary);
        }
        let response = match self.classifier.classify(&request).await {
            Ok(response) => response,
            Err(err) => {
                self.metrics.record_rejection();
                return Err(err).context("classifying request");
            }
        };
        let prediction = match response.validate() {
            Ok(prediction) => prediction,
            Err(err) => {
                self.metrics.record_rejection();
                return Err(err).context("classifier reply rejected");
            }
        };

        let detection = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .record_detection(request, prediction)
            .clone();
        self.metrics.record_detection();
        Ok(detection)
    }

    /// Submits every request in order; failures are reported, not fatal.
    pub async fn submit_batch(&self, requests: Vec<ClassificationRequest>) -> BatchReport {
        let mut report = BatchReport::default();
        for (row, request) in requests.into_iter().enumerate() {
            match self.submit(request).await {
                Ok(detection) => report.recorded.push(detection),
                Err(err) => {
                    warn!("row {} not recorded: {:#}", row, err);
                    report.rejected.push((row, format!("{err:#}")));
                }
            }
        }
        info!(
            "batch finished: {} recorded, {} rejected",
            report.recorded.len(),
            report.rejected.len()
        );
        report
    }
}
