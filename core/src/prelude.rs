use serde::{Deserialize, Serialize};

/// Substitute values for physical attributes the request did not carry.
///
/// These keep the display surfaces populated; a defaulted attribute is not a
/// measurement and must not be read as one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackDefaults {
    pub mass_earth: f64,
    pub radius_earth: f64,
    pub orbital_period_days: f64,
    pub distance_au: f64,
    pub equilibrium_temp_k: f64,
    pub stellar_temp_k: f64,
    pub stellar_radius_solar: f64,
}

impl Default for FallbackDefaults {
    fn default() -> Self {
        Self {
            mass_earth: 1.0,
            radius_earth: 1.0,
            orbital_period_days: 365.0,
            distance_au: 1.0,
            equilibrium_temp_k: 288.0,
            stellar_temp_k: 5778.0,
            stellar_radius_solar: 1.0,
        }
    }
}

/// Failures raised while validating payloads at the transport boundary.
///
/// Nothing past the boundary fails: the registry only ever sees validated
/// input.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BoundaryError {
    #[error("classifier reported an error: {0}")]
    ClassifierFailure(String),
    #[error("classifier reply carries no numeric confidence")]
    MissingConfidence,
    #[error("invalid field: {0}")]
    InvalidField(String),
    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

pub type BoundaryResult<T> = Result<T, BoundaryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_defaults_partial_override_keeps_rest() {
        let defaults: FallbackDefaults =
            serde_json::from_str(r#"{"orbital_period_days": 100.0}"#).unwrap();
        assert_eq!(defaults.orbital_period_days, 100.0);
        assert_eq!(defaults.equilibrium_temp_k, 288.0);
        assert_eq!(defaults.stellar_temp_k, 5778.0);
    }

    #[test]
    fn missing_columns_lists_every_name() {
        let err = BoundaryError::MissingColumns(vec!["koi_teq".into(), "koi_srad".into()]);
        assert_eq!(err.to_string(), "missing columns: koi_teq, koi_srad");
    }
}
