use super::detection::{Classification, Detection};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationFilter {
    #[default]
    All,
    Confirmed,
    Candidate,
    FalsePositive,
}

impl ClassificationFilter {
    pub fn admits(self, classification: Classification) -> bool {
        match self {
            ClassificationFilter::All => true,
            ClassificationFilter::Confirmed => classification == Classification::Confirmed,
            ClassificationFilter::Candidate => classification == Classification::Candidate,
            ClassificationFilter::FalsePositive => {
                classification == Classification::FalsePositive
            }
        }
    }
}

impl From<Classification> for ClassificationFilter {
    fn from(classification: Classification) -> Self {
        match classification {
            Classification::Confirmed => ClassificationFilter::Confirmed,
            Classification::Candidate => ClassificationFilter::Candidate,
            Classification::FalsePositive => ClassificationFilter::FalsePositive,
        }
    }
}

/// Search term plus class filter shared by the map and logbook surfaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ViewFilter {
    pub name_contains: String,
    pub classification: ClassificationFilter,
}

impl ViewFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn named(term: impl Into<String>) -> Self {
        Self {
            name_contains: term.into(),
            ..Default::default()
        }
    }

    pub fn with_classification(mut self, classification: ClassificationFilter) -> Self {
        self.classification = classification;
        self
    }

    pub(crate) fn matcher(&self) -> impl Fn(&Detection) -> bool + '_ {
        let needle = self.name_contains.to_lowercase();
        move |detection| {
            self.classification.admits(detection.classification)
                && (needle.is_empty() || detection.display_name.to_lowercase().contains(&needle))
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Newest first, by registry sequence rather than the wall-clock stamp.
    #[default]
    #[serde(alias = "date")]
    DiscoveryDateDescending,
    #[serde(alias = "confidence")]
    ConfidenceDescending,
    #[serde(alias = "name")]
    NameAscending,
}

impl SortOrder {
    pub fn compare(self, a: &Detection, b: &Detection) -> Ordering {
        match self {
            SortOrder::DiscoveryDateDescending => b.id.cmp(&a.id),
            SortOrder::ConfidenceDescending => b.confidence.total_cmp(&a.confidence),
            SortOrder::NameAscending => compare_names(&a.display_name, &b.display_name),
        }
    }
}

/// Case-folded comparison first, so `k2-...` sorts beside `K2-...`. Names
/// differing only in case put the lowercase spelling first.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_filter_admits_everything() {
        for class in [
            Classification::Confirmed,
            Classification::Candidate,
            Classification::FalsePositive,
        ] {
            assert!(ClassificationFilter::All.admits(class));
            assert!(ClassificationFilter::from(class).admits(class));
        }
        assert!(!ClassificationFilter::Confirmed.admits(Classification::Candidate));
    }

    #[test]
    fn sort_order_accepts_short_aliases() {
        let order: SortOrder = serde_json::from_str(r#""confidence""#).unwrap();
        assert_eq!(order, SortOrder::ConfidenceDescending);
        let order: SortOrder = serde_json::from_str(r#""name-ascending""#).unwrap();
        assert_eq!(order, SortOrder::NameAscending);
    }

    #[test]
    fn name_comparison_folds_case() {
        assert_eq!(compare_names("kepler-2b", "HD-5c"), Ordering::Greater);
        assert_eq!(compare_names("K2-1000b", "k2-1000b"), Ordering::Greater);
        assert_eq!(compare_names("kepler-7B", "Kepler-7b"), Ordering::Less);
        assert_eq!(compare_names("TOI-1b", "TOI-1b"), Ordering::Equal);
    }
}
