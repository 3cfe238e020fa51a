use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Bucket;
use crate::store::ImageStore;

/// Make sure the baseline, updated and diff buckets exist.
pub fn run<S: ImageStore>(store: &mut S) -> Result<CmdResult> {
    store.ensure_buckets()?;
    let mut result = CmdResult::default();
    for bucket in Bucket::ALL {
        log::info!("{} bucket: {}", bucket, store.location(bucket, "").display());
    }
    result.add_message(CmdMessage::info("Workspace ready"));
    Ok(result)
}
