//! Baseline promotion.
//!
//! | baseline has it | updated has it | action                                   |
//! |-----------------|----------------|------------------------------------------|
//! | no              | any            | copy input -> baseline -> updated        |
//! | yes             | no             | copy baseline -> updated                 |
//! | yes             | yes            | copy input -> updated (replace)          |
//!
//! The rows cascade: an unseen name becomes the baseline and is mirrored into
//! updated in the same run, so the first diff compares the baseline with
//! itself and every later input lands in updated. The baseline is never
//! overwritten here, and copies never remove the source bucket's file.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Admission, Bucket};
use crate::store::ImageStore;
use std::path::Path;

pub fn run<S: ImageStore>(store: &mut S, source: &Path, name: &str) -> Result<CmdResult> {
    let admission = if !store.contains(Bucket::Baseline, name) {
        store.import(source, Bucket::Baseline, name)?;
        store.copy(Bucket::Baseline, Bucket::Updated, name)?;
        Admission::NewBaseline
    } else if !store.contains(Bucket::Updated, name) {
        store.copy(Bucket::Baseline, Bucket::Updated, name)?;
        Admission::PromotedBaseline
    } else {
        store.import(source, Bucket::Updated, name)?;
        Admission::ReplacedLatest
    };

    log::info!("{}: {}", name, admission);
    let mut result = CmdResult::default().with_admission(admission);
    match admission {
        Admission::NewBaseline => result.add_message(CmdMessage::success(format!(
            "Baseline created: {}",
            store.location(Bucket::Baseline, name).display()
        ))),
        Admission::PromotedBaseline => result.add_message(CmdMessage::warning(format!(
            "No latest image for {}, input not admitted; comparing the baseline with itself",
            name
        ))),
        Admission::ReplacedLatest => {}
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fs::FileStore;
    use crate::store::memory::InMemoryStore;
    use crate::model::WorkspaceLayout;
    use std::fs;
    use tempfile::TempDir;

    fn source_with(temp: &TempDir, bytes: &[u8]) -> std::path::PathBuf {
        let path = temp.path().join("a.png");
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn unseen_name_becomes_baseline_and_latest() {
        let temp = TempDir::new().unwrap();
        let source = source_with(&temp, b"first");
        let mut store = InMemoryStore::new();

        let result = run(&mut store, &source, "a.png").unwrap();

        assert_eq!(result.admission, Some(Admission::NewBaseline));
        assert_eq!(store.read(Bucket::Baseline, "a.png").unwrap(), b"first");
        assert_eq!(store.read(Bucket::Updated, "a.png").unwrap(), b"first");
        assert_eq!(store.bucket_len(Bucket::Baseline), 1);
    }

    #[test]
    fn unseen_name_ignores_stale_latest() {
        let temp = TempDir::new().unwrap();
        let source = source_with(&temp, b"first");
        let mut store = InMemoryStore::new().with_file(Bucket::Updated, "a.png", b"stale");

        let result = run(&mut store, &source, "a.png").unwrap();

        assert_eq!(result.admission, Some(Admission::NewBaseline));
        assert_eq!(store.read(Bucket::Baseline, "a.png").unwrap(), b"first");
        assert_eq!(store.read(Bucket::Updated, "a.png").unwrap(), b"first");
    }

    #[test]
    fn baseline_only_is_copied_to_updated() {
        let temp = TempDir::new().unwrap();
        let source = source_with(&temp, b"incoming");
        let mut store = InMemoryStore::new().with_file(Bucket::Baseline, "a.png", b"accepted");

        let result = run(&mut store, &source, "a.png").unwrap();

        assert_eq!(result.admission, Some(Admission::PromotedBaseline));
        assert_eq!(store.read(Bucket::Updated, "a.png").unwrap(), b"accepted");
        assert_eq!(store.read(Bucket::Baseline, "a.png").unwrap(), b"accepted");
    }

    #[test]
    fn both_present_replaces_latest_only() {
        let temp = TempDir::new().unwrap();
        let source = source_with(&temp, b"incoming");
        let mut store = InMemoryStore::new()
            .with_file(Bucket::Baseline, "a.png", b"accepted")
            .with_file(Bucket::Updated, "a.png", b"previous");

        let result = run(&mut store, &source, "a.png").unwrap();

        assert_eq!(result.admission, Some(Admission::ReplacedLatest));
        assert_eq!(store.read(Bucket::Updated, "a.png").unwrap(), b"incoming");
        assert_eq!(store.read(Bucket::Baseline, "a.png").unwrap(), b"accepted");
    }

    #[test]
    fn missing_source_is_a_workspace_error() {
        let temp = TempDir::new().unwrap();
        let mut store = InMemoryStore::new();

        let err = run(&mut store, &temp.path().join("gone.png"), "gone.png").unwrap_err();
        assert!(err.is_workspace());
        assert_eq!(store.bucket_len(Bucket::Baseline), 0);
    }

    #[test]
    fn three_runs_on_disk() {
        let temp = TempDir::new().unwrap();
        let layout = WorkspaceLayout::new(&temp.path().join("ws"), "xxx", "yyy", "diff");
        let mut store = FileStore::new(layout.clone());
        store.ensure_buckets().unwrap();
        let source = source_with(&temp, b"v1");

        run(&mut store, &source, "a.png").unwrap();
        assert_eq!(fs::read(layout.file(Bucket::Baseline, "a.png")).unwrap(), b"v1");
        assert_eq!(fs::read(layout.file(Bucket::Updated, "a.png")).unwrap(), b"v1");

        fs::write(&source, b"v2").unwrap();
        let second = run(&mut store, &source, "a.png").unwrap();
        assert_eq!(second.admission, Some(Admission::ReplacedLatest));
        assert_eq!(fs::read(layout.file(Bucket::Updated, "a.png")).unwrap(), b"v2");

        fs::write(&source, b"v3").unwrap();
        run(&mut store, &source, "a.png").unwrap();
        assert_eq!(fs::read(layout.file(Bucket::Updated, "a.png")).unwrap(), b"v3");
        assert_eq!(fs::read(layout.file(Bucket::Baseline, "a.png")).unwrap(), b"v1");
    }
}
