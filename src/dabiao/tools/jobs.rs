use std::path::PathBuf;

use tracing::{info, instrument};

use crate::dabiao::tools::config::{MergeJob, SingleJob};
use crate::dabiao::tools::error::Result;
use crate::dabiao::tools::io::excel_write;
use crate::dabiao::tools::merge::{self, FileFailure};
use crate::dabiao::tools::transform::{allocate_postage, transform_file};

/// Outcome of a merge job.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    /// Path of the written billing sheet.
    pub output: PathBuf,
    /// Files that were skipped, with the reason.
    pub failures: Vec<FileFailure>,
}

/// Turns one order sheet into a billing sheet and writes it.
///
/// Returns the path of the written file.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %job.input.display(), series = %job.series_name, postage = %job.postage)
)]
pub fn run_single(job: &SingleJob) -> Result<PathBuf> {
    job.validate()?;

    let sheet = transform_file(&job.input, job.series_name.trim(), &job.suffix, &job.layout)?;
    info!(rows = sheet.rows.len(), "billing rows extracted");
    let sheet = allocate_postage(sheet, job.postage);

    let output = job.output_path();
    excel_write::write_billing_sheet(&output, &sheet)?;
    info!(output = %output.display(), "billing sheet written");
    Ok(output)
}

/// Merges several order sheets into one billing sheet and writes it.
///
/// Files that cannot be read are listed in the report instead of failing the
/// job.
#[instrument(
    level = "info",
    skip_all,
    fields(files = job.inputs.len(), series = %job.series_name, postage = %job.postage)
)]
pub fn run_merge(job: &MergeJob) -> Result<MergeReport> {
    job.validate()?;

    let outcome = merge::merge_files(&job.inputs, job.series_name.trim(), job.postage, &job.layout);

    let output = job.output_path();
    excel_write::write_billing_sheet(&output, &outcome.sheet)?;
    info!(
        output = %output.display(),
        rows = outcome.sheet.rows.len(),
        skipped = outcome.failures.len(),
        "merged billing sheet written"
    );
    Ok(MergeReport {
        output,
        failures: outcome.failures,
    })
}
