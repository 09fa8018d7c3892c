use crate::prelude::BoundaryError;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const FEATURE_COUNT: usize = 25;

/// Input form grouping for the classifier parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FeatureCategory {
    Orbital,
    Planet,
    Transit,
    Stellar,
    Flags,
}

/// The 25 named parameters the classifier requires, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureName {
    KoiPeriod,
    KoiSma,
    KoiIncl,
    KoiEccen,
    KoiDor,
    KoiPrad,
    KoiTeq,
    KoiInsol,
    KoiRor,
    KoiCount,
    KoiImpact,
    KoiDuration,
    KoiDepth,
    KoiNumTransits,
    KoiModelSnr,
    KoiSteff,
    KoiSlogg,
    KoiSmet,
    KoiSrad,
    KoiSmass,
    KoiSrho,
    KoiFpflagNt,
    KoiFpflagSs,
    KoiFpflagCo,
    KoiFpflagEc,
}

impl FeatureName {
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::KoiPeriod,
        FeatureName::KoiSma,
        FeatureName::KoiIncl,
        FeatureName::KoiEccen,
        FeatureName::KoiDor,
        FeatureName::KoiPrad,
        FeatureName::KoiTeq,
        FeatureName::KoiInsol,
        FeatureName::KoiRor,
        FeatureName::KoiCount,
        FeatureName::KoiImpact,
        FeatureName::KoiDuration,
        FeatureName::KoiDepth,
        FeatureName::KoiNumTransits,
        FeatureName::KoiModelSnr,
        FeatureName::KoiSteff,
        FeatureName::KoiSlogg,
        FeatureName::KoiSmet,
        FeatureName::KoiSrad,
        FeatureName::KoiSmass,
        FeatureName::KoiSrho,
        FeatureName::KoiFpflagNt,
        FeatureName::KoiFpflagSs,
        FeatureName::KoiFpflagCo,
        FeatureName::KoiFpflagEc,
    ];

    pub const FLAGS: [FeatureName; 4] = [
        FeatureName::KoiFpflagNt,
        FeatureName::KoiFpflagSs,
        FeatureName::KoiFpflagCo,
        FeatureName::KoiFpflagEc,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Wire and CSV column name.
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureName::KoiPeriod => "koi_period",
            FeatureName::KoiSma => "koi_sma",
            FeatureName::KoiIncl => "koi_incl",
            FeatureName::KoiEccen => "koi_eccen",
            FeatureName::KoiDor => "koi_dor",
            FeatureName::KoiPrad => "koi_prad",
            FeatureName::KoiTeq => "koi_teq",
            FeatureName::KoiInsol => "koi_insol",
            FeatureName::KoiRor => "koi_ror",
            FeatureName::KoiCount => "koi_count",
            FeatureName::KoiImpact => "koi_impact",
            FeatureName::KoiDuration => "koi_duration",
            FeatureName::KoiDepth => "koi_depth",
            FeatureName::KoiNumTransits => "koi_num_transits",
            FeatureName::KoiModelSnr => "koi_model_snr",
            FeatureName::KoiSteff => "koi_steff",
            FeatureName::KoiSlogg => "koi_slogg",
            FeatureName::KoiSmet => "koi_smet",
            FeatureName::KoiSrad => "koi_srad",
            FeatureName::KoiSmass => "koi_smass",
            FeatureName::KoiSrho => "koi_srho",
            FeatureName::KoiFpflagNt => "koi_fpflag_nt",
            FeatureName::KoiFpflagSs => "koi_fpflag_ss",
            FeatureName::KoiFpflagCo => "koi_fpflag_co",
            FeatureName::KoiFpflagEc => "koi_fpflag_ec",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeatureName::KoiPeriod => "Orbital Period",
            FeatureName::KoiSma => "Semi-Major Axis",
            FeatureName::KoiIncl => "Orbital Inclination",
            FeatureName::KoiEccen => "Eccentricity",
            FeatureName::KoiDor => "Distance / Stellar Radius",
            FeatureName::KoiPrad => "Planet Radius",
            FeatureName::KoiTeq => "Equilibrium Temp.",
            FeatureName::KoiInsol => "Stellar Insolation",
            FeatureName::KoiRor => "Planet/Star Radius Ratio",
            FeatureName::KoiCount => "KOI Multiplicity",
            FeatureName::KoiImpact => "Transit Impact Parameter",
            FeatureName::KoiDuration => "Transit Duration",
            FeatureName::KoiDepth => "Transit Depth",
            FeatureName::KoiNumTransits => "Num. Transits Observed",
            FeatureName::KoiModelSnr => "Model Signal-to-Noise",
            FeatureName::KoiSteff => "Stellar Effective Temp.",
            FeatureName::KoiSlogg => "Stellar Surface Gravity",
            FeatureName::KoiSmet => "Stellar Metallicity",
            FeatureName::KoiSrad => "Stellar Radius",
            FeatureName::KoiSmass => "Stellar Mass",
            FeatureName::KoiSrho => "Stellar Density",
            FeatureName::KoiFpflagNt => "Not Transit Flag (NT)",
            FeatureName::KoiFpflagSs => "Stellar Status Flag (SS)",
            FeatureName::KoiFpflagCo => "Centroid Offset Flag (CO)",
            FeatureName::KoiFpflagEc => "Ephemeris Match Flag (EC)",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            FeatureName::KoiPeriod => "days",
            FeatureName::KoiSma => "AU",
            FeatureName::KoiIncl => "deg",
            FeatureName::KoiPrad => "R⊕",
            FeatureName::KoiTeq | FeatureName::KoiSteff => "K",
            FeatureName::KoiInsol => "I⊕",
            FeatureName::KoiDuration => "hours",
            FeatureName::KoiDepth => "ppm",
            FeatureName::KoiSlogg => "log10(cm/s²)",
            FeatureName::KoiSmet => "log10(Fe/H)",
            FeatureName::KoiSrad => "R☉",
            FeatureName::KoiSmass => "M☉",
            FeatureName::KoiSrho => "g/cm³",
            FeatureName::KoiFpflagNt
            | FeatureName::KoiFpflagSs
            | FeatureName::KoiFpflagCo
            | FeatureName::KoiFpflagEc => "0 or 1",
            _ => "",
        }
    }

    /// Form caption with its unit, e.g. `Planet Radius [R⊕]`.
    pub fn describe(self) -> String {
        match self.unit() {
            "" => self.label().to_string(),
            unit => format!("{} [{}]", self.label(), unit),
        }
    }

    pub fn category(self) -> FeatureCategory {
        match self {
            FeatureName::KoiPeriod
            | FeatureName::KoiSma
            | FeatureName::KoiIncl
            | FeatureName::KoiEccen
            | FeatureName::KoiDor => FeatureCategory::Orbital,
            FeatureName::KoiPrad
            | FeatureName::KoiTeq
            | FeatureName::KoiInsol
            | FeatureName::KoiRor
            | FeatureName::KoiCount => FeatureCategory::Planet,
            FeatureName::KoiImpact
            | FeatureName::KoiDuration
            | FeatureName::KoiDepth
            | FeatureName::KoiNumTransits
            | FeatureName::KoiModelSnr => FeatureCategory::Transit,
            FeatureName::KoiSteff
            | FeatureName::KoiSlogg
            | FeatureName::KoiSmet
            | FeatureName::KoiSrad
            | FeatureName::KoiSmass
            | FeatureName::KoiSrho => FeatureCategory::Stellar,
            FeatureName::KoiFpflagNt
            | FeatureName::KoiFpflagSs
            | FeatureName::KoiFpflagCo
            | FeatureName::KoiFpflagEc => FeatureCategory::Flags,
        }
    }

    pub fn in_category(category: FeatureCategory) -> impl Iterator<Item = FeatureName> {
        Self::ALL
            .into_iter()
            .filter(move |name| name.category() == category)
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureName {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| BoundaryError::InvalidField(format!("unknown parameter `{s}`")))
    }
}

/// Parsed values for the 25 parameters; `None` marks a missing reading.
///
/// Non-finite values never get stored, so every `Some` is a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector {
    values: [Option<f64>; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: FeatureName) -> Option<f64> {
        self.values[name.index()]
    }

    pub fn set(&mut self, name: FeatureName, value: f64) {
        self.values[name.index()] = value.is_finite().then_some(value);
    }

    pub fn clear(&mut self, name: FeatureName) {
        self.values[name.index()] = None;
    }

    pub fn with(mut self, name: FeatureName, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn without(mut self, name: FeatureName) -> Self {
        self.clear(name);
        self
    }

    /// Stores a textual cell; blank or unparseable text becomes missing.
    pub fn set_text(&mut self, name: FeatureName, raw: &str) {
        match raw.trim().parse::<f64>() {
            Ok(value) => self.set(name, value),
            Err(_) => self.clear(name),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, Option<f64>)> + '_ {
        FeatureName::ALL
            .into_iter()
            .map(move |name| (name, self.get(name)))
    }

    pub fn missing(&self) -> Vec<FeatureName> {
        self.iter()
            .filter_map(|(name, value)| value.is_none().then_some(name))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name.as_str(), &value)?;
        }
        map.end()
    }
}

struct FeatureVectorVisitor;

impl<'de> Visitor<'de> for FeatureVectorVisitor {
    type Value = FeatureVector;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of classifier parameters")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FeatureVector, A::Error> {
        let mut features = FeatureVector::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.parse::<FeatureName>() {
                Ok(name) => match map.next_value::<serde_json::Value>()? {
                    serde_json::Value::Number(number) => match number.as_f64() {
                        Some(value) => features.set(name, value),
                        None => features.clear(name),
                    },
                    serde_json::Value::String(text) => features.set_text(name, &text),
                    _ => features.clear(name),
                },
                Err(_) => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(features)
    }
}

impl<'de> Deserialize<'de> for FeatureVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FeatureVectorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for name in FeatureName::ALL {
            assert_eq!(name.as_str().parse::<FeatureName>().unwrap(), name);
        }
        assert!("model_name".parse::<FeatureName>().is_err());
    }

    #[test]
    fn descriptions_carry_units_when_present() {
        assert_eq!(FeatureName::KoiPrad.describe(), "Planet Radius [R⊕]");
        assert_eq!(FeatureName::KoiSmet.describe(), "Stellar Metallicity [log10(Fe/H)]");
        assert_eq!(FeatureName::KoiEccen.describe(), "Eccentricity");
    }

    #[test]
    fn categories_partition_all_names() {
        let total: usize = [
            FeatureCategory::Orbital,
            FeatureCategory::Planet,
            FeatureCategory::Transit,
            FeatureCategory::Stellar,
            FeatureCategory::Flags,
        ]
        .into_iter()
        .map(|category| FeatureName::in_category(category).count())
        .sum();
        assert_eq!(total, FEATURE_COUNT);
        assert_eq!(FeatureName::in_category(FeatureCategory::Stellar).count(), 6);
    }

    #[test]
    fn non_finite_values_are_stored_as_missing() {
        let features = FeatureVector::new()
            .with(FeatureName::KoiPeriod, f64::NAN)
            .with(FeatureName::KoiTeq, f64::INFINITY)
            .with(FeatureName::KoiPrad, 2.5);
        assert_eq!(features.get(FeatureName::KoiPeriod), None);
        assert_eq!(features.get(FeatureName::KoiTeq), None);
        assert_eq!(features.get(FeatureName::KoiPrad), Some(2.5));
        assert_eq!(features.missing().len(), FEATURE_COUNT - 1);
    }

    #[test]
    fn text_cells_parse_leniently() {
        let mut features = FeatureVector::new();
        features.set_text(FeatureName::KoiDepth, " 1055.4 ");
        features.set_text(FeatureName::KoiSmet, "n/a");
        features.set_text(FeatureName::KoiIncl, "");
        assert_eq!(features.get(FeatureName::KoiDepth), Some(1055.4));
        assert_eq!(features.get(FeatureName::KoiSmet), None);
        assert_eq!(features.get(FeatureName::KoiIncl), None);
    }

    #[test]
    fn deserialize_ignores_unknown_keys_and_nulls() {
        let json = r#"{"koi_period": 41.7, "koi_teq": null, "koi_srad": "0.914", "model_name": "LightGBM"}"#;
        let features: FeatureVector = serde_json::from_str(json).unwrap();
        assert_eq!(features.get(FeatureName::KoiPeriod), Some(41.7));
        assert_eq!(features.get(FeatureName::KoiTeq), None);
        assert_eq!(features.get(FeatureName::KoiSrad), Some(0.914));
    }

    #[test]
    fn serialize_emits_every_name_with_null_for_missing() {
        let features = FeatureVector::new().with(FeatureName::KoiPrad, 2.94);
        let value = serde_json::to_value(features).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), FEATURE_COUNT);
        assert_eq!(object["koi_prad"], serde_json::json!(2.94));
        assert!(object["koi_period"].is_null());
    }
}
