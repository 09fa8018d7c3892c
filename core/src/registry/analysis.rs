use super::detection::{Classification, Detection, DetectionId};
use serde::{Deserialize, Serialize};
use std::fmt;

const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PlanetType {
    GasGiant,
    IceGiant,
    SuperEarth,
    Terrestrial,
}

impl PlanetType {
    /// Buckets by mass in Earth units.
    pub fn from_mass(mass_earth: f64) -> Self {
        if mass_earth > 100.0 {
            PlanetType::GasGiant
        } else if mass_earth > 10.0 {
            PlanetType::IceGiant
        } else if mass_earth > 2.0 {
            PlanetType::SuperEarth
        } else {
            PlanetType::Terrestrial
        }
    }
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlanetType::GasGiant => "Gas Giant",
            PlanetType::IceGiant => "Ice Giant",
            PlanetType::SuperEarth => "Super-Earth",
            PlanetType::Terrestrial => "Terrestrial",
        })
    }
}

/// What the analysis screen recommends doing next with a detection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FollowUp {
    PriorityTarget,
    FurtherInvestigation,
    ScientificArchive,
}

impl From<Classification> for FollowUp {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Confirmed => FollowUp::PriorityTarget,
            Classification::Candidate => FollowUp::FurtherInvestigation,
            Classification::FalsePositive => FollowUp::ScientificArchive,
        }
    }
}

/// Derived figures for the per-planet analysis view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanetProfile {
    pub id: DetectionId,
    pub display_name: String,
    pub planet_type: PlanetType,
    /// `mass / radius³` in Earth-relative units.
    pub bulk_density: f64,
    /// `mass / radius²` in Earth-relative units.
    pub surface_gravity: f64,
    pub equilibrium_temp_c: f64,
    pub confidence_percent: f64,
    pub classification_label: String,
    pub follow_up: FollowUp,
}

impl PlanetProfile {
    pub fn from_detection(detection: &Detection) -> Self {
        let radius = detection.radius_earth;
        Self {
            id: detection.id,
            display_name: detection.display_name.clone(),
            planet_type: PlanetType::from_mass(detection.mass_earth),
            bulk_density: detection.mass_earth / radius.powi(3),
            surface_gravity: detection.mass_earth / radius.powi(2),
            equilibrium_temp_c: detection.equilibrium_temp_k - KELVIN_OFFSET,
            confidence_percent: detection.confidence * 100.0,
            classification_label: detection.classification.display_label().to_string(),
            follow_up: FollowUp::from(detection.classification),
        }
    }
}

/// Wrap-around cursor over a view, as used by the analysis carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resizes to a fresh view, clamping the cursor into range.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }

    pub fn forward(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn back(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }
}
