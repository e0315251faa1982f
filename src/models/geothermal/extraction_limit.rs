//! Extraction-limit estimation.
//!
//! The coldest borehole temperature reached during an operating period falls
//! almost linearly with the annual energy extracted. The estimator evaluates
//! a thermal model at a handful of trial rates, fits a line through the
//! observations and solves it for the minimum allowed temperature.
//!
//! Two strategies are supported through [`TrialRates`]:
//!
//! - [`TrialRates::Refine`]: Evaluate two rates, predict the limit from the
//!   line through them, evaluate there as well, and fit all three points.
//!   The third point lands close to the limit, where the fit matters most.
//! - [`TrialRates::Fixed`]: Evaluate a fixed set of rates and fit them.
//!
//! Any [`twine_core::Model`] mapping an annual [`Energy`] to a
//! [`ThermodynamicTemperature`] can be used, including
//! [`Simulation`](super::simulation::Simulation).

mod config;
mod error;
mod fit;
mod schedule;

pub use config::EstimatorConfig;
pub use error::EstimateError;
pub use fit::{FitQuality, LinearFit};
pub use schedule::{ScheduleEntry, ScheduledRates, TrialSchedule};

use std::{error::Error as StdError, time::Instant};

use tracing::debug;
use twine_core::Model;
use uom::si::{
    energy::megawatt_hour,
    f64::{Energy, TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
};

/// Annual extraction rates at which the model is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum TrialRates {
    /// Two starting rates followed by one refinement at the predicted limit.
    Refine([Energy; 2]),

    /// A fixed set of at least two rates.
    Fixed(Vec<Energy>),
}

/// One model evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialPoint {
    pub rate: Energy,
    pub temperature: ThermodynamicTemperature,
}

/// The estimated extraction limit and the evidence behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionLimit {
    /// Annual energy at which the fitted temperature reaches the target.
    pub e_max: Energy,

    /// Line fitted through the trials, with `x` in MWh and `y` in °C.
    pub fit: LinearFit,

    /// Coefficient of determination of the fit.
    pub r_squared: f64,

    /// Root-mean-square residual of the fit.
    pub rmse: TemperatureInterval,

    /// Trials in evaluation order.
    pub trials: Vec<TrialPoint>,
}

/// Estimates the annual energy at which `model` reaches `config.target`.
///
/// # Errors
///
/// Returns an [`EstimateError`] if the trial rates are unusable, a model
/// evaluation fails or returns a non-finite temperature, or the fitted line
/// is too flat to solve.
pub fn estimate<M>(
    model: &M,
    rates: &TrialRates,
    config: &EstimatorConfig,
) -> Result<ExtractionLimit, EstimateError>
where
    M: Model<Input = Energy, Output = ThermodynamicTemperature>,
    M::Error: StdError + Send + Sync + 'static,
{
    let target = config.target.get::<degree_celsius>();

    let trials = match rates {
        TrialRates::Refine(initial) => {
            check_rates(initial)?;

            let mut trials = initial
                .iter()
                .map(|&rate| observe(model, rate))
                .collect::<Result<Vec<_>, _>>()?;

            let line = fit(&trials, config)?;
            let refined = Energy::new::<megawatt_hour>(line.root(target));
            trials.push(observe(model, refined)?);
            trials
        }
        TrialRates::Fixed(rates) => {
            check_rates(rates)?;
            rates
                .iter()
                .map(|&rate| observe(model, rate))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let line = fit(&trials, config)?;
    let quality = line.quality(&points(&trials));

    Ok(ExtractionLimit {
        e_max: Energy::new::<megawatt_hour>(line.root(target)),
        fit: line,
        r_squared: quality.r_squared,
        rmse: TemperatureInterval::new::<delta_kelvin>(quality.rmse),
        trials,
    })
}

fn check_rates(rates: &[Energy]) -> Result<(), EstimateError> {
    if rates.len() < 2 {
        return Err(EstimateError::TooFewTrials { count: rates.len() });
    }
    if let Some(&rate) = rates.iter().find(|rate| !rate.value.is_finite()) {
        return Err(EstimateError::InvalidRate { rate });
    }
    if rates.iter().all(|rate| *rate == rates[0]) {
        return Err(EstimateError::DegenerateTrials);
    }
    Ok(())
}

fn observe<M>(model: &M, rate: Energy) -> Result<TrialPoint, EstimateError>
where
    M: Model<Input = Energy, Output = ThermodynamicTemperature>,
    M::Error: StdError + Send + Sync + 'static,
{
    let start = Instant::now();

    let temperature = model
        .call(&rate)
        .map_err(|source| EstimateError::Evaluation {
            rate,
            source: Box::new(source),
        })?;

    let celsius = temperature.get::<degree_celsius>();
    debug!(
        e_annual_mwh = rate.get::<megawatt_hour>(),
        temperature_c = celsius,
        elapsed = ?start.elapsed(),
        "evaluated trial rate"
    );

    if !celsius.is_finite() {
        return Err(EstimateError::NonFinite { rate });
    }

    Ok(TrialPoint { rate, temperature })
}

fn points(trials: &[TrialPoint]) -> Vec<(f64, f64)> {
    trials
        .iter()
        .map(|trial| {
            (
                trial.rate.get::<megawatt_hour>(),
                trial.temperature.get::<degree_celsius>(),
            )
        })
        .collect()
}

fn fit(trials: &[TrialPoint], config: &EstimatorConfig) -> Result<LinearFit, EstimateError> {
    let line = LinearFit::least_squares(&points(trials)).ok_or(EstimateError::DegenerateTrials)?;

    if !(line.slope.abs() > config.min_abs_slope) {
        return Err(EstimateError::DegenerateSlope { slope: line.slope });
    }

    Ok(line)
}
