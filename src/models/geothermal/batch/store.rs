use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use uom::si::{
    energy::megawatt_hour, length::meter, temperature_interval::kelvin as delta_kelvin,
    velocity::meter_per_second,
};

use crate::models::geothermal::extraction_limit::ExtractionLimit;

use super::{CaseKey, StoreError};

/// Column names, in file order.
const COLUMNS: [&str; 7] = [
    "Geology",
    "L_borehole",
    "borehole_spacing",
    "v_groundwater",
    "E_max",
    "R_squared",
    "RMSE",
];

/// One computed case.
///
/// Lengths are in m, velocity in m/s, energy in MWh and RMSE in K.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "Geology")]
    pub geology: String,

    #[serde(rename = "L_borehole")]
    pub borehole_length: f64,

    pub borehole_spacing: f64,

    #[serde(rename = "v_groundwater")]
    pub groundwater_velocity: Option<f64>,

    #[serde(rename = "E_max")]
    pub e_max: f64,

    #[serde(rename = "R_squared")]
    pub r_squared: f64,

    #[serde(rename = "RMSE")]
    pub rmse: f64,
}

impl ResultRow {
    #[must_use]
    pub fn new(key: &CaseKey, limit: &ExtractionLimit) -> Self {
        Self {
            geology: key.geology.clone(),
            borehole_length: key.borehole_length.get::<meter>(),
            borehole_spacing: key.borehole_spacing.get::<meter>(),
            groundwater_velocity: key
                .groundwater_velocity
                .map(|velocity| velocity.get::<meter_per_second>()),
            e_max: limit.e_max.get::<megawatt_hour>(),
            r_squared: limit.r_squared,
            rmse: limit.rmse.get::<delta_kelvin>(),
        }
    }

    /// Whether this row holds the result of `key`.
    ///
    /// Values compare exactly: CSV round-trips `f64` without loss.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn matches(&self, key: &CaseKey) -> bool {
        self.geology == key.geology
            && self.borehole_length == key.borehole_length.get::<meter>()
            && self.borehole_spacing == key.borehole_spacing.get::<meter>()
            && self.groundwater_velocity
                == key
                    .groundwater_velocity
                    .map(|velocity| velocity.get::<meter_per_second>())
    }
}

/// Computed cases, persisted as a CSV file.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
    rows: Vec<ResultRow>,
}

impl ResultStore {
    /// Loads the store at `path`, or starts an empty one if the file does
    /// not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Csv`] if the file exists but cannot be read as
    /// result rows.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                rows: Vec::new(),
            });
        }

        let csv_error = |source| StoreError::Csv {
            path: path.clone(),
            source,
        };
        let mut reader = csv::Reader::from_path(&path).map_err(csv_error)?;
        let rows = reader
            .deserialize()
            .collect::<Result<Vec<ResultRow>, _>>()
            .map_err(csv_error)?;

        Ok(Self { path, rows })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    #[must_use]
    pub fn contains(&self, key: &CaseKey) -> bool {
        self.rows.iter().any(|row| row.matches(key))
    }

    /// Appends a row in memory; call [`ResultStore::save`] to persist it.
    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    /// Rewrites the whole file.
    ///
    /// Rows go to a temporary file next to the target, which then replaces
    /// it, so a crash never leaves a truncated store behind.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if writing or renaming fails.
    pub fn save(&self) -> Result<(), StoreError> {
        let temporary = self.temporary_path();

        self.write(&temporary).map_err(|source| StoreError::Csv {
            path: temporary.clone(),
            source,
        })?;

        fs::rename(&temporary, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, path: &Path) -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;

        // Written by hand so that an empty store still carries its schema.
        writer.write_record(COLUMNS)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }

        let mut file = writer
            .into_inner()
            .map_err(|err| csv::Error::from(io::Error::other(err.to_string())))?;
        file.flush()?;
        file.sync_all()?;
        Ok(())
    }

    fn temporary_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
