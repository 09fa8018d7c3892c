use super::aggregate::Stats;
use super::analysis::PlanetProfile;
use super::detection::{Classification, Detection, DetectionId};
use super::naming::NameGenerator;
use super::query::{SortOrder, ViewFilter};
use crate::classifier_interface::{ClassificationRequest, FeatureName, Prediction};
use crate::prelude::FallbackDefaults;
use crate::telemetry::log::LogManager;
use chrono::Utc;

/// Append-only store of the session's detections.
///
/// Insertion order is discovery order. Entries are never removed or
/// reordered; only their annotation changes after creation.
pub struct PlanetRegistry {
    detections: Vec<Detection>,
    next_sequence: u64,
    selected: Option<DetectionId>,
    defaults: FallbackDefaults,
    names: NameGenerator,
    logger: LogManager,
}

impl PlanetRegistry {
    pub fn new() -> Self {
        Self::with_config(FallbackDefaults::default(), NameGenerator::from_entropy())
    }

    pub fn with_config(defaults: FallbackDefaults, names: NameGenerator) -> Self {
        Self {
            detections: Vec::new(),
            next_sequence: 1,
            selected: None,
            defaults,
            names,
            logger: LogManager::new("registry"),
        }
    }

    /// Turns a validated classifier reply into a detection and appends it.
    ///
    /// The new detection becomes the selected one.
    pub fn record_detection(
        &mut self,
        request: ClassificationRequest,
        prediction: Prediction,
    ) -> &Detection {
        let id = DetectionId::from(self.next_sequence);
        self.next_sequence += 1;

        let defaults = &self.defaults;
        let reading =
            |name: FeatureName, fallback: f64| request.feature(name).unwrap_or(fallback);
        let classification = Classification::from_label(&prediction.label);

        let detection = Detection {
            id,
            display_name: self.names.next_name(self.detections.len()),
            mass_earth: reading(FeatureName::KoiPrad, defaults.mass_earth),
            radius_earth: reading(FeatureName::KoiPrad, defaults.radius_earth),
            orbital_period_days: reading(FeatureName::KoiPeriod, defaults.orbital_period_days),
            distance_au: reading(FeatureName::KoiSma, defaults.distance_au),
            equilibrium_temp_k: reading(FeatureName::KoiTeq, defaults.equilibrium_temp_k),
            stellar_temp_k: reading(FeatureName::KoiSteff, defaults.stellar_temp_k),
            stellar_radius_solar: reading(FeatureName::KoiSrad, defaults.stellar_radius_solar),
            confidence: prediction.confidence,
            classification,
            discovered_at: Utc::now(),
            annotation: String::new(),
            source_input: request,
            raw_label: prediction.label,
            raw_probabilities: prediction.probabilities,
        };

        self.logger.record(&format!(
            "recorded {} as {} ({:.1}% confidence, {:?})",
            id,
            detection.display_name,
            detection.confidence * 100.0,
            classification
        ));

        self.selected = Some(id);
        self.detections.push(detection);
        &self.detections[self.detections.len() - 1]
    }

    /// Replaces the annotation of `id`. Unknown ids are ignored; returns
    /// whether a detection was updated.
    pub fn update_annotation(&mut self, id: DetectionId, text: impl Into<String>) -> bool {
        match self.detections.iter_mut().find(|d| d.id == id) {
            Some(detection) => {
                detection.annotation = text.into();
                self.logger.detail(&format!("annotated {}", id));
                true
            }
            None => {
                self.logger
                    .detail(&format!("annotation for unknown {} ignored", id));
                false
            }
        }
    }

    /// Filtered and sorted copy of the registry. Ties keep insertion order.
    pub fn query_view(&self, filter: &ViewFilter, sort: SortOrder) -> Vec<Detection> {
        let matches = filter.matcher();
        let mut view: Vec<Detection> = self
            .detections
            .iter()
            .filter(|detection| matches(detection))
            .cloned()
            .collect();
        view.sort_by(|a, b| sort.compare(a, b));
        view
    }

    /// Recomputed from the current contents on every call.
    pub fn aggregate(&self) -> Stats {
        Stats::from_detections(&self.detections)
    }

    pub fn profile(&self, id: DetectionId) -> Option<PlanetProfile> {
        self.get(id).map(PlanetProfile::from_detection)
    }

    pub fn get(&self, id: DetectionId) -> Option<&Detection> {
        self.detections.iter().find(|d| d.id == id)
    }

    pub fn selected(&self) -> Option<&Detection> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Moves the selection; unknown ids leave it unchanged.
    pub fn select(&mut self, id: DetectionId) -> bool {
        let known = self.get(id).is_some();
        if known {
            self.selected = Some(id);
        }
        known
    }

    /// Detections in discovery order.
    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

impl Default for PlanetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
