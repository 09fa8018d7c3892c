use super::detection::{Classification, Detection};
use crate::math::stats::StatsHelper;
use serde::{Deserialize, Serialize};

/// Summary counters shown above the map and logbook.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub confirmed_count: usize,
    pub candidate_count: usize,
    pub false_positive_count: usize,
    /// Mean confidence × 100, one decimal; `0.0` when empty.
    pub average_confidence_percent: f64,
    /// Share of confirmed plus candidate detections, one decimal.
    pub detection_rate_percent: f64,
}

impl Stats {
    pub fn from_detections(detections: &[Detection]) -> Self {
        let count = |class: Classification| {
            detections
                .iter()
                .filter(|detection| detection.classification == class)
                .count()
        };
        let confirmed_count = count(Classification::Confirmed);
        let candidate_count = count(Classification::Candidate);
        let confidences: Vec<f64> = detections.iter().map(|d| d.confidence).collect();

        Self {
            total: detections.len(),
            confirmed_count,
            candidate_count,
            false_positive_count: count(Classification::FalsePositive),
            average_confidence_percent: StatsHelper::percent_one_decimal(StatsHelper::mean(
                &confidences,
            )),
            detection_rate_percent: StatsHelper::share_percent(
                confirmed_count + candidate_count,
                detections.len(),
            ),
        }
    }
}
