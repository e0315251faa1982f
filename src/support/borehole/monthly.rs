use super::ParametersError;

/// Largest accepted deviation of the fraction sum from one.
const SUM_TOLERANCE: f64 = 1e-6;

/// Share of the annual energy extracted in each calendar month.
///
/// Holds exactly twelve non-negative values whose sum is one within `1e-6`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyFractions([f64; 12]);

/// A heating-dominated profile with no extraction from June to August.
pub const STANDARD_HEATING_PROFILE: MonthlyFractions = MonthlyFractions([
    0.194_717, 0.172_16, 0.128_944, 0.075_402, 0.024_336, 0.0, 0.0, 0.0, 0.025_227, 0.076_465,
    0.129_925, 0.172_824,
]);

impl MonthlyFractions {
    /// The same share in every month.
    pub const UNIFORM: Self = Self([1.0 / 12.0; 12]);

    /// Creates a validated monthly profile, January first.
    ///
    /// # Errors
    ///
    /// - [`ParametersError::FractionCount`] unless there are exactly 12 values.
    /// - [`ParametersError::InvalidFraction`] if a value is negative or NaN.
    /// - [`ParametersError::FractionSum`] if `|Σ − 1| > 1e-6`.
    pub fn new(values: &[f64]) -> Result<Self, ParametersError> {
        let fractions: [f64; 12] =
            values
                .try_into()
                .map_err(|_| ParametersError::FractionCount {
                    count: values.len(),
                })?;

        if let Some((index, &value)) = fractions
            .iter()
            .enumerate()
            .find(|&(_, value)| value.is_nan() || *value < 0.0)
        {
            return Err(ParametersError::InvalidFraction {
                month: index + 1,
                value,
            });
        }

        let sum: f64 = fractions.iter().sum();
        if !((sum - 1.0).abs() <= SUM_TOLERANCE) {
            return Err(ParametersError::FractionSum { sum });
        }

        Ok(Self(fractions))
    }

    /// Returns the twelve fractions, January first.
    #[must_use]
    pub fn as_array(&self) -> &[f64; 12] {
        &self.0
    }

    /// Returns the fraction of the given month, 1 for January.
    #[must_use]
    pub fn fraction(&self, month: usize) -> Option<f64> {
        month.checked_sub(1).and_then(|i| self.0.get(i)).copied()
    }

    /// Returns the fraction active at time `t`, in years.
    ///
    /// The profile repeats every year; month `i` covers `[i/12, (i+1)/12)`.
    #[must_use]
    pub fn at(&self, t_years: f64) -> f64 {
        let phase = t_years.rem_euclid(1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = ((phase * 12.0).floor() as usize).min(11);
        self.0[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_profile_is_valid() {
        let rebuilt =
            MonthlyFractions::new(STANDARD_HEATING_PROFILE.as_array()).expect("sums to one");
        assert_eq!(rebuilt, STANDARD_HEATING_PROFILE);
        assert_eq!(rebuilt.fraction(1), Some(0.194_717));
        assert_eq!(rebuilt.fraction(12), Some(0.172_824));
        assert_eq!(rebuilt.fraction(0), None);
        assert_eq!(rebuilt.fraction(13), None);
    }

    #[test]
    fn uniform_profile_is_valid() {
        assert!(MonthlyFractions::new(MonthlyFractions::UNIFORM.as_array()).is_ok());
        assert_eq!(MonthlyFractions::UNIFORM.at(0.7), 1.0 / 12.0);
    }

    #[test]
    fn wrong_count() {
        assert_eq!(
            MonthlyFractions::new(&[1.0 / 11.0; 11]),
            Err(ParametersError::FractionCount { count: 11 })
        );
        assert_eq!(
            MonthlyFractions::new(&[1.0 / 13.0; 13]),
            Err(ParametersError::FractionCount { count: 13 })
        );
    }

    #[test]
    fn sum_tolerance_boundary() {
        let mut values = [0.0; 12];

        // Deviation of 1e-6 is accepted.
        values[0] = 1.000_001;
        assert!(MonthlyFractions::new(&values).is_ok());

        // Slightly beyond is rejected.
        values[0] = 1.000_001_1;
        assert!(matches!(
            MonthlyFractions::new(&values),
            Err(ParametersError::FractionSum { .. })
        ));

        values[0] = 0.5;
        assert!(matches!(
            MonthlyFractions::new(&values),
            Err(ParametersError::FractionSum { .. })
        ));
    }

    #[test]
    fn negative_or_nan_fraction() {
        let mut values = [1.0 / 12.0; 12];
        values[3] = -0.01;
        values[4] += 0.01;
        assert!(matches!(
            MonthlyFractions::new(&values),
            Err(ParametersError::InvalidFraction { month: 4, .. })
        ));

        values[3] = f64::NAN;
        assert!(matches!(
            MonthlyFractions::new(&values),
            Err(ParametersError::InvalidFraction { month: 4, .. })
        ));
    }

    #[test]
    fn periodic_lookup() {
        let profile = STANDARD_HEATING_PROFILE;

        assert_eq!(profile.at(0.0), 0.194_717);
        assert_eq!(profile.at(0.5 / 12.0), 0.194_717);
        assert_eq!(profile.at(1.0 / 12.0 + 1e-9), 0.172_16);
        assert_eq!(profile.at(6.5 / 12.0), 0.0);
        assert_eq!(profile.at(11.99 / 12.0), 0.172_824);

        // One year later the same month is active.
        assert_eq!(profile.at(3.0 + 2.5 / 12.0), profile.at(2.5 / 12.0));
        assert_eq!(profile.at(-0.5 / 12.0), 0.172_824);
    }
}
