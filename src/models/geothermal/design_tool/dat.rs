//! Writer for the design tool's DAT project files.
//!
//! A DAT file is a fixed sequence of lines, each a value followed by a
//! label. Only the ground, borehole and heating load lines vary; pipes,
//! heat carrier fluid, cooling loads and optimization settings are fixed.

use std::io::{self, Write};

use uom::si::{
    energy::megawatt_hour, f64::Energy, heat_flux_density::watt_per_square_meter, length::meter,
    thermal_conductivity::watt_per_meter_kelvin, thermodynamic_temperature::degree_celsius,
    volumetric_heat_capacity::joule_per_cubic_meter_kelvin,
};

use crate::support::geology::rounded;

use super::DesignInput;

const HEADER: &str = "& Version=4.20\nSI=yes\n\n\n\n\n\n";

/// Single-U pipe, heat carrier fluid and resistance options.
const BOREHOLE_DETAILS: &str = "\
SINGLE-U
0.00060 BhVolFlow m3/s
1 Volflow index
1 Volflow factor
0.05000 PipeDiam
0.00460 PipeThick
0.22000 PipeThCond
0.10000 LinOutDiam
0.00400 LinThick
0.40000 LinThCond
0.00000 mc
0.04000 UPipeDiam
0.00240 UPipeThick
0.42000 UPipeThCond
0.07500 UPipeShankSpace
0.60000 ThermCondFill
 4.07999992370605E-0001 hc_thermcond
 4.21600000000000E+0003 hc_heatcap
 9.68000000000000E+0002 hc_dens
 6.30000000819564E-0003 hc_visc
-99 hc_freeze
0 calculate_borehole_resistance (yes=1,no=0)
10 multipoles
";

/// Fluid temperature limits, accepted by the file format but not used to
/// stop the simulation.
const FLUID_LIMITS: &str = "\
-1.00000000000000E+0000 tfluid_min_required
 1.50000000000000E+0001 tfluid_max_required
0 include_peak_load (yes=1,no=0)
";

/// Domestic hot water, optimization bounds, costs, output files and options.
const TRAILER: &str = "\
0.00000 annual DHW
3.00000 SPF DHW
0 Config min
797 Config max
 3.00000000000000E+0001 Land area width
 2.00000000000000E+0001 Land area height
5 Spacing min
100 Spacing max
 5.00000000000000E+0001 Depth min
 3.00000000000000E+0002 Depth max
2000 Borehole num max
1 detail (yes=1,no=0)
0 round off (yes=1,no=0)
0 Also list cases with warnings (yes=1,no=0)
2 Step
0 Sort index
EUR
 0.00000000000000E+0000 Cost fix
 0.00000000000000E+0000 Cost fix per bh 
 0.00000000000000E+0000 Cost drilling per m 
 0.00000000000000E+0000 Cost soil drilling per bh 
 0.00000000000000E+0000 Cost soil drilling per m
 0.00000000000000E+0000 depth soil drilling
 0.00000000000000E+0000 Cost ditch per m
qtest.txt
qtest.txt
qtest.txt
qtest.txt
qxls.txt
0 Show results after
0 CB_SolveHours (yes=1,no=0)
1 CB_UseInitialBase (yes=1,no=0)
1 CB_UseInitialPeak (yes=1,no=0)
0 CB_readqifile (yes=1,no=0)
0 CB_UseAnnualVariation (yes=1,no=0)
1 CB_useheat (yes=1,no=0)
1 CB_usecool (yes=1,no=0)
0 CB_usedhw (yes=1,no=0)
0 File option index
";

/// Writes a DAT file for extracting `annual_energy` from the borefield.
///
/// The heat carrier loads are `(SPF − 1)/SPF · f_i · E` for each month `i`.
/// Ground properties are written with six significant digits.
///
/// # Errors
///
/// Returns any I/O error raised by the writer.
pub fn write_dat(
    input: &DesignInput,
    annual_energy: Energy,
    writer: &mut impl Write,
) -> io::Result<()> {
    let energy = annual_energy.get::<megawatt_hour>();
    let fractions = input.monthly_fractions.as_array();
    let resistance = input.borehole_resistance.value;

    writer.write_all(HEADER.as_bytes())?;

    writeln!(
        writer,
        "{} ThermCondGround",
        rounded(input.ground_conductivity.get::<watt_per_meter_kelvin>())
    )?;
    writeln!(
        writer,
        "{} HeatCap",
        rounded(input.ground_heat_capacity.get::<joule_per_cubic_meter_kelvin>() / 1e6)
    )?;
    writeln!(
        writer,
        "{} InitGroundSurfTemp",
        rounded(input.surface_temperature.get::<degree_celsius>())
    )?;
    writeln!(
        writer,
        "{} GeothermalHeatFlux",
        rounded(input.geothermal_heat_flux.get::<watt_per_square_meter>())
    )?;
    writeln!(writer, "{} RecNum", input.borefield.record)?;
    writeln!(writer, "{}", input.borefield.record)?;
    writeln!(writer, "{} BHDepth", input.borehole_length.get::<meter>())?;
    writeln!(writer, "{} B", input.borehole_spacing.get::<meter>())?;
    writeln!(
        writer,
        "{} BoreholeDiam",
        input.borehole_diameter.get::<meter>()
    )?;

    writer.write_all(BOREHOLE_DETAILS.as_bytes())?;
    writeln!(writer, " {resistance} bore_rb")?;
    writeln!(writer, " 0 bore_ra")?;
    writeln!(writer, " {resistance} bore_rb_const")?;
    writeln!(writer, " 0 bore_ra_const")?;
    writeln!(writer, "0 internal_heat_transfer (yes=1,no=0)")?;
    writeln!(writer, "0 baseloadenergy_mode (yes=1,no=0)")?;

    writeln!(writer, "{energy} annual_heat_load")?;
    writeln!(writer, "{} SPF_Heat", input.spf)?;
    writeln!(writer, "{} direct (yes=1,no=0)", u8::from(input.is_direct()))?;
    for (i, fraction) in fractions.iter().enumerate() {
        let load = input.ground_share() * fraction * energy;
        writeln!(writer, "{load} monthly heat load {:>2}", i + 1)?;
    }
    for (i, fraction) in fractions.iter().enumerate() {
        writeln!(writer, "{fraction} monthly heat factor {:>2}", i + 1)?;
    }

    writeln!(writer, "0.00000 annual_cool_load")?;
    writeln!(writer, "3.00000 SPF_Cool")?;
    writeln!(writer, "0 direct (yes=1,no=0)")?;
    for label in ["monthly cool load", "monthly cool factor"] {
        for month in 1..=12 {
            writeln!(writer, "0.00000 {label} {month:>2}")?;
        }
    }
    for label in [
        "monthly heat peak load",
        "monthly heat duration",
        "monthly cool peak load",
        "monthly cool duration",
    ] {
        for month in 1..=12 {
            writeln!(writer, " 0.00000000000000E+0000 {label} {month:>2}")?;
        }
    }

    writer.write_all(FLUID_LIMITS.as_bytes())?;
    writeln!(writer, "{} max_number_of_cycles", input.num_years)?;
    writeln!(writer, "1 start_month")?;
    for _ in 0..11 {
        writeln!(writer, "-1")?;
    }
    writer.write_all(TRAILER.as_bytes())?;
    writeln!(writer, "E:\\TEMP\\")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::geothermal::test_support::design_input;

    fn render(input: &DesignInput, energy: f64) -> String {
        let mut buffer = Vec::new();
        write_dat(input, Energy::new::<megawatt_hour>(energy), &mut buffer).expect("in memory");
        String::from_utf8(buffer).expect("ascii")
    }

    fn value_of<'a>(text: &'a str, label: &str) -> Vec<&'a str> {
        text.lines()
            .filter_map(|line| line.trim().strip_suffix(label))
            .map(str::trim)
            .collect()
    }

    #[test]
    fn layout() {
        let text = render(&design_input(), 30.0);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "& Version=4.20");
        assert_eq!(lines[1], "SI=yes");
        assert!(lines[2..7].iter().all(|line| line.is_empty()));
        assert_eq!(lines[7], "2.5 ThermCondGround");
        assert_eq!(lines[8], "2.295 HeatCap");
        assert_eq!(lines[9], "8 InitGroundSurfTemp");
        assert_eq!(lines[10], "0.06 GeothermalHeatFlux");
        assert_eq!(lines[11], "0 RecNum");
        assert_eq!(lines[12], "0");
        assert_eq!(lines[13], "200 BHDepth");
        assert_eq!(lines[14], "500 B");
        assert_eq!(lines[15], "0.15 BoreholeDiam");
        assert_eq!(lines[16], "SINGLE-U");

        assert_eq!(value_of(&text, "annual_heat_load"), ["30"]);
        assert_eq!(value_of(&text, "SPF_Heat"), ["99999"]);
        assert_eq!(value_of(&text, "max_number_of_cycles"), ["50"]);
        assert_eq!(value_of(&text, "bore_rb"), ["0.1"]);
        assert_eq!(lines.iter().filter(|line| **line == "-1").count(), 11);
        assert_eq!(lines.last(), Some(&"E:\\TEMP\\"));
    }

    #[test]
    fn monthly_loads_follow_profile() {
        let mut input = design_input();
        input.spf = 4.0;
        let text = render(&input, 100.0);

        assert!(text.contains(" monthly heat load  1\n"));
        assert!(text.contains(" monthly heat load 12\n"));
        assert_eq!(value_of(&text, "direct (yes=1,no=0)"), ["0", "0"]);

        let loads: Vec<f64> = (1..=12)
            .map(|month| {
                value_of(&text, &format!("monthly heat load {month:>2}"))[0]
                    .parse()
                    .expect("numeric load")
            })
            .collect();

        assert_relative_eq!(loads[0], 0.75 * 0.194_717 * 100.0, epsilon = 1e-9);
        assert_eq!(loads[6], 0.0);
        assert_relative_eq!(loads.iter().sum::<f64>(), 75.0, epsilon = 1e-6);

        let factors = value_of(&text, "monthly heat factor  1");
        assert_eq!(factors, ["0.194717"]);
    }

    #[test]
    fn direct_extraction_flag() {
        let text = render(&design_input(), 30.0);
        assert_eq!(value_of(&text, "direct (yes=1,no=0)"), ["1", "0"]);
    }
}
