use super::features::{FeatureName, FeatureVector};
use serde::{Deserialize, Serialize};

/// Engineered features the classifier computes from the 25 inputs.
///
/// A missing operand or a non-finite result (division by zero) leaves the
/// feature missing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct DerivedFeatures {
    pub planet_star_radius_ratio: Option<f64>,
    pub period_duration_ratio: Option<f64>,
    pub star_density_proxy: Option<f64>,
    pub insol_teq_ratio: Option<f64>,
    pub signal_strength: Option<f64>,
    pub total_fp_flags: Option<f64>,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn ratio(features: &FeatureVector, numerator: FeatureName, denominator: FeatureName) -> Option<f64> {
    finite(features.get(numerator)? / features.get(denominator)?)
}

impl DerivedFeatures {
    pub fn from_features(features: &FeatureVector) -> Self {
        let star_density_proxy = features
            .get(FeatureName::KoiSmass)
            .zip(features.get(FeatureName::KoiSrad))
            .and_then(|(mass, radius)| finite(mass / radius.powi(3)));
        let signal_strength = features
            .get(FeatureName::KoiDepth)
            .zip(features.get(FeatureName::KoiModelSnr))
            .and_then(|(depth, snr)| finite(depth * snr));
        let total_fp_flags = FeatureName::FLAGS
            .into_iter()
            .map(|flag| features.get(flag))
            .sum::<Option<f64>>();

        Self {
            planet_star_radius_ratio: ratio(features, FeatureName::KoiPrad, FeatureName::KoiSrad),
            period_duration_ratio: ratio(features, FeatureName::KoiPeriod, FeatureName::KoiDuration),
            star_density_proxy,
            insol_teq_ratio: ratio(features, FeatureName::KoiInsol, FeatureName::KoiTeq),
            signal_strength,
            total_fp_flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_ratios_and_flag_total() {
        let features = FeatureVector::new()
            .with(FeatureName::KoiPrad, 2.0)
            .with(FeatureName::KoiSrad, 0.5)
            .with(FeatureName::KoiSmass, 1.0)
            .with(FeatureName::KoiDepth, 100.0)
            .with(FeatureName::KoiModelSnr, 10.0)
            .with(FeatureName::KoiFpflagNt, 0.0)
            .with(FeatureName::KoiFpflagSs, 1.0)
            .with(FeatureName::KoiFpflagCo, 1.0)
            .with(FeatureName::KoiFpflagEc, 0.0);
        let derived = DerivedFeatures::from_features(&features);
        assert_eq!(derived.planet_star_radius_ratio, Some(4.0));
        assert_eq!(derived.star_density_proxy, Some(8.0));
        assert_eq!(derived.signal_strength, Some(1000.0));
        assert_eq!(derived.total_fp_flags, Some(2.0));
        assert_eq!(derived.period_duration_ratio, None);
    }

    #[test]
    fn zero_denominator_leaves_feature_missing() {
        let features = FeatureVector::new()
            .with(FeatureName::KoiInsol, 13.2)
            .with(FeatureName::KoiTeq, 0.0);
        assert_eq!(DerivedFeatures::from_features(&features).insol_teq_ratio, None);
    }

    #[test]
    fn any_missing_flag_leaves_total_missing() {
        let features = FeatureVector::new()
            .with(FeatureName::KoiFpflagNt, 1.0)
            .with(FeatureName::KoiFpflagSs, 0.0)
            .with(FeatureName::KoiFpflagCo, 0.0);
        assert_eq!(DerivedFeatures::from_features(&features).total_fp_flags, None);
    }
}
