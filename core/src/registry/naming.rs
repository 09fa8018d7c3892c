use rand::{rngs::StdRng, Rng, SeedableRng};

const CATALOG_PREFIXES: [&str; 9] = [
    "Kepler", "TRAPPIST", "Proxima", "TOI", "HD", "WASP", "HAT-P", "K2", "EPIC",
];

/// Produces cosmetic catalog-style designations such as `Kepler-4821c`.
///
/// Names are not unique and never used for lookup.
pub struct NameGenerator {
    rng: StdRng,
}

impl NameGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// `index` is the registry length at creation time and shifts the number range.
    pub fn next_name(&mut self, index: usize) -> String {
        let prefix = CATALOG_PREFIXES[self.rng.gen_range(0..CATALOG_PREFIXES.len())];
        let number = 1000 + index + self.rng.gen_range(0..9000);
        let suffix = char::from(b'b' + self.rng.gen_range(0..8u8));
        format!("{prefix}-{number}{suffix}")
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}
