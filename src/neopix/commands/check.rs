//! One full comparison run: workspace, admission, diff, verdict.

use crate::commands::{admit, compare, init, CmdMessage, CmdResult};
use crate::config::RunConfig;
use crate::engine::DiffEngine;
use crate::error::{NeopixError, Result};
use crate::model::Outcome;
use crate::store::ImageStore;
use std::path::Path;

pub fn run<S: ImageStore, E: DiffEngine>(
    store: &mut S,
    engine: &E,
    config: &RunConfig,
    source: &Path,
) -> Result<CmdResult> {
    let name = image_name(source)?;
    if !source.is_file() {
        return Err(NeopixError::InputNotFound(source.to_path_buf()));
    }

    let mut result = init::run(store)?;

    match admit::run(store, source, &name) {
        Ok(admitted) => result.absorb(admitted),
        Err(e) if e.is_workspace() && !config.strict => {
            log::warn!("{}", e);
            result.add_message(CmdMessage::warning(format!(
                "Could not update workspace for {}, comparing what is there: {}",
                name, e
            )));
        }
        Err(e) => return Err(e),
    }

    result.absorb(compare::run(store, engine, &name, &config.diff)?);
    let (mismatch, rescaled) = result
        .diff
        .as_ref()
        .map(|d| (d.mismatch_percentage, d.rescaled))
        .unwrap_or_default();
    if rescaled {
        result.add_message(CmdMessage::info(format!(
            "{}: latest image size differs from the baseline, scaled before comparing",
            name
        )));
    }

    let outcome = Outcome::judge(mismatch, config.threshold);
    let message = match outcome {
        Outcome::ThresholdExceeded { .. } => CmdMessage::error(format!(
            "{}: {:.2}% mismatch exceeds threshold {:.2}%",
            name, mismatch, config.threshold
        )),
        _ => CmdMessage::success(format!(
            "{}: {:.2}% mismatch (threshold {:.2}%), passed",
            name, mismatch, config.threshold
        )),
    };
    result.add_message(message);
    Ok(result.with_outcome(outcome))
}

/// The workspace key for an input: its final path component.
pub fn image_name(source: &Path) -> Result<String> {
    source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            NeopixError::Config(format!("input has no file name: {}", source.display()))
        })
}
