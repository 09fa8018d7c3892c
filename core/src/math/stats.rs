pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Expresses a ratio as a percentage rounded to one decimal place.
    pub fn percent_one_decimal(ratio: f64) -> f64 {
        (ratio * 1000.0).round() / 10.0
    }

    /// `part / whole` as a one-decimal percentage, `0.0` for an empty whole.
    pub fn share_percent(part: usize, whole: usize) -> f64 {
        if whole == 0 {
            return 0.0;
        }
        Self::percent_one_decimal(part as f64 / whole as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_sequence_is_zero() {
        assert_eq!(StatsHelper::mean(&[]), 0.0);
    }

    #[test]
    fn mean_handles_single_value() {
        assert_eq!(StatsHelper::mean(&[0.75]), 0.75);
    }

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(StatsHelper::percent_one_decimal(0.53333), 53.3);
        assert_eq!(StatsHelper::percent_one_decimal(0.6666), 66.7);
        assert_eq!(StatsHelper::percent_one_decimal(1.0), 100.0);
    }

    #[test]
    fn share_of_nothing_is_zero() {
        assert_eq!(StatsHelper::share_percent(0, 0), 0.0);
        assert_eq!(StatsHelper::share_percent(2, 3), 66.7);
    }
}
