use crate::commands::{CmdResult, DiffSummary};
use crate::config::DiffOptions;
use crate::engine::DiffEngine;
use crate::error::Result;
use crate::model::Bucket;
use crate::store::ImageStore;

/// Diff baseline against updated for `name` and store the rendered diff.
pub fn run<S: ImageStore, E: DiffEngine>(
    store: &mut S,
    engine: &E,
    name: &str,
    options: &DiffOptions,
) -> Result<CmdResult> {
    let before = store.read(Bucket::Baseline, name)?;
    let after = store.read(Bucket::Updated, name)?;

    let report = engine.compare(&before, &after, options)?;
    store.write(Bucket::Diff, name, &report.diff_image)?;

    log::info!(
        "{}: {:.2}% mismatch ({}x{}, mode {})",
        name,
        report.mismatch_percentage,
        report.width,
        report.height,
        options.ignore
    );

    Ok(CmdResult::default().with_diff(DiffSummary {
        mismatch_percentage: report.mismatch_percentage,
        diff_path: store.location(Bucket::Diff, name),
        rescaled: report.rescaled,
    }))
}
