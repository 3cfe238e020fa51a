use std::fmt;
use std::path::{Path, PathBuf};

/// One of the three workspace directories. Every artifact for a named image
/// lives under the same filename in each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Accepted reference images
    Baseline,
    /// Most recently supplied images
    Updated,
    /// Rendered diffs
    Diff,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Baseline, Bucket::Updated, Bucket::Diff];
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bucket::Baseline => "baseline",
            Bucket::Updated => "updated",
            Bucket::Diff => "diff",
        };
        f.write_str(name)
    }
}

/// Absolute locations of the three buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    pub baseline: PathBuf,
    pub updated: PathBuf,
    pub diff: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(base: &Path, baseline: &str, updated: &str, diff: &str) -> Self {
        Self {
            baseline: base.join(baseline),
            updated: base.join(updated),
            diff: base.join(diff),
        }
    }

    pub fn dir(&self, bucket: Bucket) -> &Path {
        match bucket {
            Bucket::Baseline => &self.baseline,
            Bucket::Updated => &self.updated,
            Bucket::Diff => &self.diff,
        }
    }

    pub fn file(&self, bucket: Bucket, name: &str) -> PathBuf {
        self.dir(bucket).join(name)
    }
}

/// Which branch of the baseline-promotion state machine ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First sighting: the input became the baseline and was mirrored into
    /// the updated bucket.
    NewBaseline,
    /// Baseline existed without a latest image: the baseline was copied into
    /// the updated bucket.
    PromotedBaseline,
    /// Both existed: the input replaced the latest image.
    ReplacedLatest,
}

impl fmt::Display for Admission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Admission::NewBaseline => "new baseline",
            Admission::PromotedBaseline => "baseline promoted",
            Admission::ReplacedLatest => "latest replaced",
        };
        f.write_str(text)
    }
}

/// Result of a comparison run that completed without an operational error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Passed { mismatch: f64, threshold: f64 },
    ThresholdExceeded { mismatch: f64, threshold: f64 },
}

impl Outcome {
    /// Mismatch equal to the threshold passes.
    pub fn judge(mismatch: f64, threshold: f64) -> Self {
        if mismatch <= threshold {
            Outcome::Passed {
                mismatch,
                threshold,
            }
        } else {
            Outcome::ThresholdExceeded {
                mismatch,
                threshold,
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Passed { .. } => 0,
            Outcome::ThresholdExceeded { .. } => 1,
        }
    }
}
