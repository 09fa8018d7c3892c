use anyhow::ensure;
use clap::ValueEnum;
use exocore::classifier_interface::{
    ClassificationRequest, FeatureName, FeatureVector, ModelSelection,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Reference parameter sets for the four showcase targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Confirmed,
    Candidate,
    FalsePositive,
    HotJupiter,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Confirmed,
        Preset::Candidate,
        Preset::FalsePositive,
        Preset::HotJupiter,
    ];

    /// Values in `FeatureName::ALL` order.
    fn values(self) -> [f64; 25] {
        match self {
            Preset::Confirmed => [
                41.74938613, 0.228, 89.77, 0.0, 57.11, 2.94, 486.0, 13.22, 0.029414, 3.0, 0.226,
                5.6098, 1055.4, 34.0, 95.0, 5506.0, 4.473, 0.04, 0.914, 0.904, 2.02141, 0.0, 0.0,
                0.0, 0.0,
            ],
            Preset::Candidate => [
                8.2927558, 0.0807, 86.52, 0.0, 10.43, 1.01, 927.0, 174.36, 0.009775, 2.0, 0.6346,
                4.784, 103.3, 158.0, 8.4, 6146.0, 4.497, -0.26, 0.943, 1.02, 0.31213, 0.0, 0.0,
                0.0, 0.0,
            ],
            Preset::FalsePositive => [
                0.518071538, 0.0126, 34.22, 0.0, 1.529, 42.1, 2536.0, 9823.05, 0.318862, 1.0,
                1.264, 1.7865, 2195.5, 178.0, 152.1, 5876.0, 4.273, -0.02, 1.209, 0.999, 0.25201,
                0.0, 1.0, 1.0, 0.0,
            ],
            Preset::HotJupiter => [
                3.5, 0.05, 88.5, 0.01, 15.0, 11.2, 1200.0, 1500.0, 0.1, 1.0, 0.5, 3.8, 15000.0,
                500.0, 500.0, 5850.0, 4.4, 0.05, 1.05, 1.1, 1.0, 0.0, 0.0, 0.0, 0.0,
            ],
        }
    }

    pub fn features(self) -> FeatureVector {
        FeatureName::ALL
            .into_iter()
            .zip(self.values())
            .fold(FeatureVector::new(), |features, (name, value)| {
                features.with(name, value)
            })
    }
}

/// Configuration for generating jittered variants of a preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub preset: Preset,
    pub count: usize,
    /// Relative jitter applied to each non-flag parameter, e.g. `0.05` = ±5%.
    pub noise: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            preset: Preset::Confirmed,
            count: 1,
            noise: 0.0,
            seed: 0,
        }
    }
}

fn jitter(base: FeatureVector, noise: f64, rng: &mut StdRng) -> FeatureVector {
    let mut features = base;
    for (name, value) in base.iter() {
        if FeatureName::FLAGS.contains(&name) {
            continue;
        }
        if let Some(value) = value {
            let factor = 1.0 + rng.gen_range(-noise..noise);
            features.set(name, value * factor);
        }
    }
    features
}

pub fn build_requests_from_config(
    config: &GeneratorConfig,
    selection: ModelSelection,
) -> anyhow::Result<Vec<ClassificationRequest>> {
    ensure!(
        config.noise.is_finite() && config.noise < 1.0,
        "generator noise must be below 1.0, got {}",
        config.noise
    );

    if config.noise <= 0.0 {
        return Ok(vec![build_request(config.preset, selection); config.count]);
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let base = config.preset.features();
    Ok((0..config.count)
        .map(|_| ClassificationRequest::new(jitter(base, config.noise, &mut rng), selection))
        .collect())
}

pub fn build_request(preset: Preset, selection: ModelSelection) -> ClassificationRequest {
    ClassificationRequest::new(preset.features(), selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_fill_every_parameter() {
        for preset in Preset::ALL {
            assert!(preset.features().is_complete(), "{preset:?}");
        }
        let features = Preset::Confirmed.features();
        assert_eq!(features.get(FeatureName::KoiPrad), Some(2.94));
        assert_eq!(features.get(FeatureName::KoiSrho), Some(2.02141));
        assert_eq!(
            Preset::FalsePositive.features().get(FeatureName::KoiFpflagSs),
            Some(1.0)
        );
    }

    #[test]
    fn zero_noise_reproduces_preset() {
        let config = GeneratorConfig {
            preset: Preset::Candidate,
            count: 3,
            ..Default::default()
        };
        let requests = build_requests_from_config(&config, ModelSelection::default()).unwrap();
        assert_eq!(requests.len(), 3);
        assert!(requests
            .iter()
            .all(|r| r.features == Preset::Candidate.features()));
    }

    #[test]
    fn noisy_variants_stay_within_bounds_and_keep_flags() {
        let config = GeneratorConfig {
            preset: Preset::FalsePositive,
            count: 20,
            noise: 0.1,
            seed: 13,
        };
        let base = Preset::FalsePositive.features();
        let requests = build_requests_from_config(&config, ModelSelection::default()).unwrap();
        for request in &requests {
            let period = request.feature(FeatureName::KoiPeriod).unwrap();
            let reference = base.get(FeatureName::KoiPeriod).unwrap();
            assert!((period / reference - 1.0).abs() <= 0.1);
            assert_eq!(request.feature(FeatureName::KoiFpflagCo), Some(1.0));
        }
        assert_ne!(requests[0].features, requests[1].features);
    }

    #[test]
    fn seeded_generation_is_repeatable() {
        let config = GeneratorConfig {
            noise: 0.05,
            count: 2,
            seed: 99,
            ..Default::default()
        };
        let a = build_requests_from_config(&config, ModelSelection::default()).unwrap();
        let b = build_requests_from_config(&config, ModelSelection::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn excessive_noise_is_rejected() {
        let config = GeneratorConfig {
            noise: 1.5,
            ..Default::default()
        };
        assert!(build_requests_from_config(&config, ModelSelection::default()).is_err());
    }
}
