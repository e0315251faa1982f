//! Parser for the design tool's text report.

use uom::si::{
    energy::megawatt_hour,
    f64::{Energy, ThermodynamicTemperature},
    thermodynamic_temperature::degree_celsius,
};

use super::DesignToolError;

const HEATING_LOAD: Field = Field {
    label: "Annual heating load (DHW excluded)",
    start: 36,
    tail: 3,
};

const MIN_FLUID_TEMPERATURE: Field = Field {
    label: "Minimum mean fluid temperature",
    start: 32,
    tail: 17,
};

/// A fixed-width value on a labelled report line.
///
/// The value occupies the characters from `start` up to `tail` characters
/// before the end of the line.
struct Field {
    label: &'static str,
    start: usize,
    tail: usize,
}

impl Field {
    fn read(&self, report: &str) -> Result<f64, DesignToolError> {
        let line = report
            .lines()
            .rev()
            .find(|line| line.trim_start().starts_with(self.label))
            .ok_or(DesignToolError::MissingLine { label: self.label })?;

        let parse_error = || DesignToolError::Parse {
            label: self.label,
            line: line.to_owned(),
        };

        let chars: Vec<char> = line.chars().collect();
        let end = chars
            .len()
            .checked_sub(self.tail)
            .filter(|&end| end > self.start)
            .ok_or_else(parse_error)?;

        chars[self.start..end]
            .iter()
            .collect::<String>()
            .trim()
            .parse()
            .map_err(|_| parse_error())
    }
}

/// Results read from a design-tool report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    /// Heating load the tool simulated, excluding hot water.
    pub annual_heating_load: Energy,

    /// Lowest monthly mean temperature of the heat carrier fluid.
    pub min_mean_fluid_temperature: ThermodynamicTemperature,
}

/// Parses the annual heating load and the minimum mean fluid temperature.
///
/// # Errors
///
/// Returns [`DesignToolError::MissingLine`] or [`DesignToolError::Parse`]
/// if either value cannot be found.
pub fn parse_report(report: &str) -> Result<Report, DesignToolError> {
    Ok(Report {
        annual_heating_load: Energy::new::<megawatt_hour>(HEATING_LOAD.read(report)?),
        min_mean_fluid_temperature: ThermodynamicTemperature::new::<degree_celsius>(
            MIN_FLUID_TEMPERATURE.read(report)?,
        ),
    })
}

/// Formats the two report lines in the tool's layout.
#[cfg(test)]
pub(crate) fn format_report(heating_load_mwh: f64, fluid_temperature_c: f64) -> String {
    format!(
        "  QUICK RESULTS\n\
         {:<36}{:>14.6} MWh\n\
         {:<32}{:>14.6} °C at month 600 \n",
        HEATING_LOAD.label, heating_load_mwh, MIN_FLUID_TEMPERATURE.label, fluid_temperature_c,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn reads_fixed_width_values() {
        let report = parse_report(&format_report(42.5, -1.25)).expect("well-formed report");

        assert_relative_eq!(
            report.annual_heating_load.get::<megawatt_hour>(),
            42.5,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            report.min_mean_fluid_temperature.get::<degree_celsius>(),
            -1.25,
            epsilon = 1e-9
        );
    }

    #[test]
    fn offsets_count_characters() {
        // The degree sign is two bytes but one character.
        let line = format!("{:<32}{:>10} °C at month 600 ", MIN_FLUID_TEMPERATURE.label, "3.500");
        assert_relative_eq!(
            MIN_FLUID_TEMPERATURE.read(&line).expect("well-formed line"),
            3.5
        );
    }

    #[test]
    fn missing_or_garbled_lines() {
        assert!(matches!(
            parse_report("Minimum mean fluid temperature      1.0 °C at month 600 \n"),
            Err(DesignToolError::MissingLine {
                label: "Annual heating load (DHW excluded)"
            })
        ));

        let garbled = format!("{:<36}{:>10} MWh\n", HEATING_LOAD.label, "n/a");
        assert!(matches!(
            HEATING_LOAD.read(&garbled),
            Err(DesignToolError::Parse { .. })
        ));

        assert!(matches!(
            HEATING_LOAD.read(HEATING_LOAD.label),
            Err(DesignToolError::Parse { .. })
        ));
    }
}
