use std::{
    error::Error as StdError,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::debug;
use twine_core::Model;
use uom::si::{
    energy::megawatt_hour, f64::Energy, thermodynamic_temperature::degree_celsius,
};

use super::{DesignInput, DesignToolError, Report, parse_report, write_dat};

const DAT_FILE: &str = "eval.dat";
const REPORT_FILE: &str = "eval.out";

/// An external borehole-design program.
///
/// Implementations load the DAT file, run the calculation and write the
/// text report. How the program is driven, from a command line or by
/// automating its user interface, is up to the implementation.
pub trait DesignTool {
    type Error: StdError + Send + Sync + 'static;

    /// Runs the tool on the `dat` file, writing its report to `report`.
    ///
    /// # Errors
    ///
    /// Returns the tool's error if the run fails.
    fn run(&self, dat: &Path, report: &Path) -> Result<(), Self::Error>;
}

/// The outcome of one design-tool run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignTrial {
    /// Annual energy written to the DAT file.
    pub energy: Energy,
    pub report: Report,
}

/// Model adapter exposing the annual energy as the sole input of the tool.
pub struct DesignToolModel<'a, T> {
    tool: &'a T,
    input: DesignInput,
    workdir: PathBuf,
}

impl<'a, T: DesignTool> DesignToolModel<'a, T> {
    /// Creates a model that exchanges files with the tool in `workdir`.
    pub fn new(tool: &'a T, input: DesignInput, workdir: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            input,
            workdir: workdir.into(),
        }
    }

    #[must_use]
    pub fn input(&self) -> &DesignInput {
        &self.input
    }

    fn write(&self, path: &Path, energy: Energy) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        write_dat(&self.input, energy, &mut writer)?;
        writer.flush()
    }
}

impl<T: DesignTool> Model for DesignToolModel<'_, T> {
    type Input = Energy;
    type Output = DesignTrial;
    type Error = DesignToolError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let dat = self.workdir.join(DAT_FILE);
        let report_path = self.workdir.join(REPORT_FILE);
        let io_error = |path: &Path| {
            let path = path.to_owned();
            move |source| DesignToolError::Io { path, source }
        };

        // A report left from an earlier run must never be read as this one's.
        match fs::remove_file(&report_path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => {
                return Err(io_error(&report_path)(err));
            }
            _ => {}
        }

        self.write(&dat, *input).map_err(io_error(&dat))?;

        self.tool
            .run(&dat, &report_path)
            .map_err(|source| DesignToolError::Tool(Box::new(source)))?;

        let text = fs::read_to_string(&report_path).map_err(io_error(&report_path))?;
        let report = parse_report(&text)?;

        debug!(
            e_annual_mwh = input.get::<megawatt_hour>(),
            t_fluid_c = report.min_mean_fluid_temperature.get::<degree_celsius>(),
            "design tool run"
        );

        Ok(DesignTrial {
            energy: *input,
            report,
        })
    }
}
