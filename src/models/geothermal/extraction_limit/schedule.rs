//! Trial extraction rates per borehole configuration.
//!
//! The rates that give a good linear fit depend mostly on the spacing of the
//! field: dense fields saturate at low annual energies, sparse ones tolerate
//! much more. A [`TrialSchedule`] records those choices as plain data so
//! they can be reviewed, serialized and overridden.

use serde::{Deserialize, Serialize};
use uom::si::{
    energy::megawatt_hour,
    f64::{Energy, Length},
    length::meter,
};

use super::TrialRates;

/// Lengths closer than this, in meters, are considered equal.
const LENGTH_TOLERANCE: f64 = 1e-9;

/// Trial rates in MWh, in serializable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduledRates {
    /// Two starting rates followed by one refinement at the predicted limit.
    Refine([f64; 2]),

    /// A fixed set of rates.
    Fixed(Vec<f64>),
}

impl ScheduledRates {
    /// Converts to typed trial rates.
    #[must_use]
    pub fn to_trial_rates(&self) -> TrialRates {
        let mwh = Energy::new::<megawatt_hour>;
        match self {
            Self::Refine([x0, x1]) => TrialRates::Refine([mwh(*x0), mwh(*x1)]),
            Self::Fixed(rates) => TrialRates::Fixed(rates.iter().copied().map(mwh).collect()),
        }
    }
}

/// One row of a [`TrialSchedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Borehole length in meters, or `None` to match any length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borehole_length: Option<f64>,

    /// Borehole spacing in meters.
    pub borehole_spacing: f64,

    pub rates: ScheduledRates,
}

/// Lookup table from borehole configuration to trial rates.
///
/// Entries with a borehole length take precedence over spacing-only entries;
/// configurations matching neither use the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSchedule {
    pub entries: Vec<ScheduleEntry>,
    pub fallback: ScheduledRates,
}

impl TrialSchedule {
    /// Returns the trial rates for a borehole configuration.
    #[must_use]
    pub fn rates(&self, borehole_length: Length, borehole_spacing: Length) -> TrialRates {
        let length = borehole_length.get::<meter>();
        let spacing = borehole_spacing.get::<meter>();
        let same = |a: f64, b: f64| (a - b).abs() <= LENGTH_TOLERANCE;

        let spacing_matches = |entry: &&ScheduleEntry| same(entry.borehole_spacing, spacing);

        let exact = self
            .entries
            .iter()
            .filter(spacing_matches)
            .find(|entry| entry.borehole_length.is_some_and(|l| same(l, length)));

        let spacing_only = || {
            self.entries
                .iter()
                .filter(spacing_matches)
                .find(|entry| entry.borehole_length.is_none())
        };

        exact
            .or_else(spacing_only)
            .map_or(&self.fallback, |entry| &entry.rates)
            .to_trial_rates()
    }
}

impl Default for TrialSchedule {
    /// Rates that bracket the limit of a 50-year extraction in typical
    /// Central European geology.
    fn default() -> Self {
        let spacing = |borehole_spacing: f64, rates: &[f64]| ScheduleEntry {
            borehole_length: None,
            borehole_spacing,
            rates: ScheduledRates::Fixed(rates.to_vec()),
        };

        Self {
            entries: vec![
                spacing(20.0, &[5.0, 10.0, 20.0]),
                spacing(100.0, &[10.0, 22.5, 35.0]),
                spacing(500.0, &[10.0, 30.0, 40.0]),
            ],
            fallback: ScheduledRates::Refine([10.0, 30.0]),
        }
    }
}
