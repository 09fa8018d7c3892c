use exocore::classifier_interface::{ClassificationRequest, ClassifierResponse};
use exocore::registry::{ClassificationFilter, SortOrder, ViewFilter};
use exocore::telemetry::MetricsSnapshot;
use exocore::Stats;
use serde::{Deserialize, Serialize};

/// Query string of `GET /planets`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ViewQuery {
    pub search: String,
    pub classification: ClassificationFilter,
    pub sort: SortOrder,
}

impl ViewQuery {
    pub fn to_filter(&self) -> ViewFilter {
        ViewFilter::named(self.search.clone()).with_classification(self.classification)
    }
}

/// Body of `PUT /planets/<id>/notes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesUpdate {
    pub notes: String,
}

/// Body of `POST /detections`: what the transport layer sent and received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionSubmission {
    pub request: ClassificationRequest,
    pub response: ClassifierResponse,
}

/// Reply of `GET /stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryModel {
    pub stats: Stats,
    pub metrics: MetricsSnapshot,
}
