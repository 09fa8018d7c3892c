use crate::classifier_interface::ClassificationRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Normalized three-way outcome of a classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    Confirmed,
    Candidate,
    FalsePositive,
}

impl Classification {
    /// Maps a raw classifier label by substring, checking "confirmed" before
    /// "candidate"; anything else is a false positive.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("confirmed") {
            Classification::Confirmed
        } else if label.contains("candidate") {
            Classification::Candidate
        } else {
            Classification::FalsePositive
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            Classification::Confirmed => "Confirmed Exoplanet",
            Classification::Candidate => "Candidate World",
            Classification::FalsePositive => "False Positive Signal",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_label())
    }
}

/// Registry-assigned identifier, rendered as `planet-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DetectionId(u64);

impl DetectionId {
    const PREFIX: &'static str = "planet-";
}

impl From<u64> for DetectionId {
    fn from(sequence: u64) -> Self {
        Self(sequence)
    }
}

impl fmt::Display for DetectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for DetectionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(Self::PREFIX).unwrap_or(s).parse().map(Self)
    }
}

impl From<DetectionId> for String {
    fn from(id: DetectionId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for DetectionId {
    type Error = std::num::ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One completed classification plus the input it was made from.
///
/// Everything except `annotation` is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub id: DetectionId,
    pub display_name: String,
    pub mass_earth: f64,
    pub radius_earth: f64,
    pub orbital_period_days: f64,
    pub distance_au: f64,
    pub equilibrium_temp_k: f64,
    pub stellar_temp_k: f64,
    pub stellar_radius_solar: f64,
    pub confidence: f64,
    pub classification: Classification,
    pub discovered_at: DateTime<Utc>,
    pub annotation: String,
    pub source_input: ClassificationRequest,
    pub raw_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_probabilities: Option<BTreeMap<String, f64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_mapping_follows_substring_priority() {
        assert_eq!(
            Classification::from_label("Confirmed Exoplanet"),
            Classification::Confirmed
        );
        assert_eq!(
            Classification::from_label("Candidate Exoplanet"),
            Classification::Candidate
        );
        assert_eq!(
            Classification::from_label("False Positive"),
            Classification::FalsePositive
        );
        assert_eq!(
            Classification::from_label("candidate-confirmed-ish"),
            Classification::Confirmed
        );
    }

    #[test]
    fn label_mapping_ignores_case_and_punctuation() {
        assert_eq!(
            Classification::from_label("CONFIRMED!"),
            Classification::Confirmed
        );
        assert_eq!(
            Classification::from_label("[candidate]"),
            Classification::Candidate
        );
        assert_eq!(Classification::from_label(""), Classification::FalsePositive);
        assert_eq!(
            Classification::from_label("Error"),
            Classification::FalsePositive
        );
    }

    #[test]
    fn detection_id_renders_and_parses() {
        let id = DetectionId::from(42);
        assert_eq!(id.to_string(), "planet-42");
        assert_eq!("planet-42".parse::<DetectionId>().unwrap(), id);
        assert_eq!("42".parse::<DetectionId>().unwrap(), id);
        assert!("nonexistent-id".parse::<DetectionId>().is_err());
        assert_eq!(serde_json::to_value(id).unwrap(), "planet-42");
    }

    #[test]
    fn classification_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(Classification::FalsePositive).unwrap(),
            "false-positive"
        );
    }
}
