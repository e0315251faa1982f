//! Batch orchestration over geologies and borehole configurations.
//!
//! A [`BatchPlan`] spans every combination of geology, borehole length and
//! spacing, optionally crossed with uniform groundwater velocities. [`run`]
//! evaluates each combination with a [`CaseRunner`] and records the result
//! in a [`ResultStore`].
//!
//! Batches are resumable. Cases already in the store are skipped, and the
//! store is rewritten after every computed case, so a crash loses at most the
//! case in flight. A failed case is logged and left out of the store, which
//! means the next run retries it.

mod error;
mod plan;
mod runner;
mod store;

pub use error::{CaseError, StoreError};
pub use plan::{BatchPlan, BoreholeTemplate, Case, CaseKey, PlannedCase};
pub use runner::{CaseRunner, FemRunner};
pub use store::{ResultRow, ResultStore};

use std::time::Instant;

use tracing::{info, warn};
use uom::si::energy::megawatt_hour;

/// A case that could not be computed.
#[derive(Debug)]
pub struct FailedCase {
    pub key: CaseKey,
    pub error: CaseError,
}

/// Summary of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Cases computed and stored by this run.
    pub computed: usize,

    /// Cases found in the store.
    pub skipped: usize,

    pub failed: Vec<FailedCase>,
}

/// Runs every case of `plan` that `store` does not hold yet.
///
/// # Errors
///
/// Returns a [`StoreError`] if the store cannot be saved. Case failures do
/// not abort the batch; they are collected in the report.
pub fn run<R: CaseRunner>(
    plan: &BatchPlan,
    runner: &R,
    store: &mut ResultStore,
) -> Result<BatchReport, StoreError> {
    let mut report = BatchReport::default();
    let total = plan.len();

    for (index, planned) in plan.cases().enumerate() {
        let key = &planned.key;
        let progress = format!("{}/{total}", index + 1);

        if store.contains(key) {
            info!(case = %key, %progress, "skipping, already computed");
            report.skipped += 1;
            continue;
        }

        info!(case = %key, %progress, "calculating");
        let start = Instant::now();

        let outcome = planned.prepare().and_then(|case| runner.run(&case));
        match outcome {
            Ok(limit) => {
                info!(
                    case = %key,
                    e_max_mwh = limit.e_max.get::<megawatt_hour>(),
                    r_squared = limit.r_squared,
                    elapsed = ?start.elapsed(),
                    "computed"
                );
                store.push(ResultRow::new(key, &limit));
                store.save()?;
                report.computed += 1;
            }
            Err(error) => {
                warn!(case = %key, error = %error, elapsed = ?start.elapsed(), "case failed");
                report.failed.push(FailedCase {
                    key: key.clone(),
                    error,
                });
            }
        }
    }

    info!(
        computed = report.computed,
        skipped = report.skipped,
        failed = report.failed.len(),
        "batch finished"
    );

    Ok(report)
}
