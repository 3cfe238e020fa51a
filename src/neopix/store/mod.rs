//! # Storage Layer
//!
//! The workspace is three buckets (baseline, updated, diff) keyed by image
//! filename. There is no index: whether a bucket holds an image is decided by
//! asking the store at run time, so the backing storage is the only durable
//! state between runs.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage, one directory per bucket
//! - [`memory::InMemoryStore`]: Map-backed storage for testing
//!
//! ## Storage Format
//!
//! For `FileStore`, with the default directory names:
//! ```text
//! <base>/
//! ├── xxx/a.png     # baseline
//! ├── yyy/a.png     # latest supplied image
//! ├── diff/a.png    # rendered diff (PNG)
//! └── neopix.json   # optional settings
//! ```

use crate::error::Result;
use crate::model::Bucket;
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;

/// Abstract interface for the three-bucket image workspace.
pub trait ImageStore {
    /// Create every bucket that does not exist yet. Idempotent.
    fn ensure_buckets(&mut self) -> Result<()>;

    /// Whether `bucket` currently holds `name`
    fn contains(&self, bucket: Bucket, name: &str) -> bool;

    fn read(&self, bucket: Bucket, name: &str) -> Result<Vec<u8>>;

    /// Write `bytes` as `name`, replacing any previous content
    fn write(&mut self, bucket: Bucket, name: &str, bytes: &[u8]) -> Result<()>;

    /// Copy an external file into `bucket` as `name`, replacing any previous content
    fn import(&mut self, source: &Path, bucket: Bucket, name: &str) -> Result<()>;

    /// Copy `name` from one bucket to another, replacing any previous content
    fn copy(&mut self, from: Bucket, to: Bucket, name: &str) -> Result<()>;

    /// Where `name` lives (or would live) in `bucket`
    fn location(&self, bucket: Bucket, name: &str) -> PathBuf;
}
