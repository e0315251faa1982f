//! Borehole-design tool adapter.
//!
//! Dedicated borehole-design programs compute fluid temperatures of whole
//! borefields from analytical response factors, for homogeneous ground. This
//! module writes their DAT input, parses their text report, and searches for
//! the annual energy at which the minimum mean fluid temperature reaches a
//! target.
//!
//! The program itself is reached through the [`DesignTool`] trait.

mod config;
mod dat;
mod error;
mod input;
mod model;
mod problem;
mod report;

pub use config::SearchConfig;
pub use dat::write_dat;
pub use error::DesignToolError;
pub use input::{Borefield, DesignInput};
pub use model::{DesignTool, DesignToolModel, DesignTrial};
pub use report::{Report, parse_report};

#[cfg(test)]
pub(crate) use report::format_report;

use tracing::info;
use twine_solvers::equation::bisection;
use uom::si::{
    energy::megawatt_hour,
    f64::{Energy, TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::degree_celsius,
};

use problem::LimitProblem;

/// The energy limit found by the design tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignLimit {
    /// Annual energy of the whole borefield.
    pub field_energy: Energy,

    /// Annual energy of a single borehole of the field.
    pub borehole_energy: Energy,

    /// Report of the run at the limit.
    pub report: Report,

    pub iters: usize,
}

/// Finds the annual borefield energy at which the minimum mean fluid
/// temperature reaches `target`.
///
/// Uses bisection inside `bounds`. Runs that fail are treated as lying
/// beyond the limit.
///
/// # Errors
///
/// Returns [`DesignToolError`] if the bounds do not bracket the limit or the
/// solver fails to converge.
pub fn extraction_limit<T: DesignTool>(
    model: &DesignToolModel<'_, T>,
    bounds: [Energy; 2],
    target: ThermodynamicTemperature,
    config: &SearchConfig,
) -> Result<DesignLimit, DesignToolError> {
    let problem = LimitProblem::new(target);

    let solution = bisection::solve(
        model,
        &problem,
        [
            bounds[0].get::<megawatt_hour>(),
            bounds[1].get::<megawatt_hour>(),
        ],
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // The tool fails on loads its ground cannot sustain, so a failed
            // run lies above the limit.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(DesignToolError::MaxIters {
            residual: TemperatureInterval::new::<delta_kelvin>(solution.residual),
            iters: solution.iters,
        });
    }

    let trial = solution.snapshot.output;
    let boreholes = f64::from(model.input().borefield.boreholes);

    info!(
        e_field_mwh = trial.energy.get::<megawatt_hour>(),
        boreholes,
        t_fluid_c = trial.report.min_mean_fluid_temperature.get::<degree_celsius>(),
        iters = solution.iters,
        "found design tool limit"
    );

    Ok(DesignLimit {
        field_energy: trial.energy,
        borehole_energy: trial.energy / boreholes,
        report: trial.report,
        iters: solution.iters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use twine_core::Model;
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;

    use crate::support::borehole::MonthlyFractions;
    use crate::models::geothermal::test_support::{
        LinearDesignTool, bedrock, design_input, mwh, resistance, stub_params,
    };

    fn celsius(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(value)
    }

    #[test]
    fn model_round_trips_through_files() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let tool = LinearDesignTool::new(-0.05, 3.0);
        let model = DesignToolModel::new(&tool, design_input(), dir.path());

        let trial = model.call(&mwh(20.0)).expect("stub runs");

        assert_eq!(tool.runs(), 1);
        assert_eq!(trial.energy, mwh(20.0));
        assert_relative_eq!(
            trial.report.annual_heating_load.get::<megawatt_hour>(),
            20.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            trial.report.min_mean_fluid_temperature.get::<degree_celsius>(),
            2.0,
            epsilon = 1e-6
        );
        assert!(dir.path().join("eval.dat").exists());
    }

    #[test]
    fn failed_run_leaves_no_stale_report() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let tool = LinearDesignTool::new(-0.05, 3.0).failing_above(25.0);
        let model = DesignToolModel::new(&tool, design_input(), dir.path());

        model.call(&mwh(20.0)).expect("stub runs");
        assert!(matches!(
            model.call(&mwh(30.0)),
            Err(DesignToolError::Tool(_))
        ));
        assert!(!dir.path().join("eval.out").exists());
    }

    #[test]
    fn bisection_finds_single_borehole_limit() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let tool = LinearDesignTool::new(-0.05, 3.0);
        let model = DesignToolModel::new(&tool, design_input(), dir.path());

        let limit = extraction_limit(
            &model,
            [mwh(1.0), mwh(100.0)],
            celsius(0.0),
            &SearchConfig::default(),
        )
        .expect("limit is bracketed");

        assert_relative_eq!(limit.field_energy.get::<megawatt_hour>(), 60.0, epsilon = 1e-2);
        assert_eq!(limit.field_energy, limit.borehole_energy);
        assert_relative_eq!(
            limit.report.min_mean_fluid_temperature.get::<degree_celsius>(),
            0.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn borefield_limit_is_shared_by_boreholes() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let tool = LinearDesignTool::new(-0.001, 3.0).failing_above(4000.0);
        let input = DesignInput {
            borefield: Borefield::SQUARE_34,
            ..design_input()
        };
        let model = DesignToolModel::new(&tool, input, dir.path());

        let limit = extraction_limit(
            &model,
            [mwh(1000.0), mwh(5000.0)],
            celsius(0.0),
            &SearchConfig::default(),
        )
        .expect("failed runs are treated as beyond the limit");

        assert_relative_eq!(limit.field_energy.get::<megawatt_hour>(), 3000.0, epsilon = 1e-2);
        assert_relative_eq!(
            limit.borehole_energy.get::<megawatt_hour>(),
            3000.0 / 1156.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn iteration_limit() {
        let dir = tempfile::tempdir().expect("temporary directory");
        let tool = LinearDesignTool::new(-0.05, 3.0);
        let model = DesignToolModel::new(&tool, design_input(), dir.path());
        let config = SearchConfig {
            max_iters: 2,
            ..SearchConfig::default()
        };

        assert!(matches!(
            extraction_limit(&model, [mwh(1.0), mwh(100.0)], celsius(0.0), &config),
            Err(DesignToolError::MaxIters { .. })
        ));
    }

    #[test]
    fn input_from_geology() {
        let params = stub_params();
        let input = DesignInput::from_geology(
            &bedrock(),
            &params,
            Borefield::SINGLE,
            resistance(0.1),
            99_999.0,
        )
        .expect("bedrock reaches below the borehole");

        assert_relative_eq!(
            input.ground_conductivity.get::<watt_per_meter_kelvin>(),
            2.5
        );
        assert!(input.is_direct());
        assert_eq!(input.num_years, 50);
        assert_eq!(
            input.monthly_fractions,
            MonthlyFractions::UNIFORM
        );
        assert_eq!(
            Borefield::for_spacing(params.borehole_spacing()),
            Some(Borefield::SQUARE_34)
        );
    }
}
