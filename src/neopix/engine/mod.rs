//! # Diff Engine
//!
//! The perceptual comparison itself is not ours. [`DiffEngine`] is the seam
//! between the orchestration and whatever library scores two images; the
//! production implementation is [`compare::ImageCompareEngine`].
//!
//! An engine takes the encoded bytes of both images plus [`DiffOptions`] and
//! hands back a [`DiffReport`]. It does not judge the score: deciding whether
//! a mismatch is acceptable belongs to the caller.

use crate::config::DiffOptions;
use crate::error::Result;

pub mod compare;

/// What one comparison produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffReport {
    /// Share of mismatched pixels, 0 to 100
    pub mismatch_percentage: f64,
    /// Rendered diff, PNG encoded
    pub diff_image: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// The updated image was resized to the baseline's dimensions
    pub rescaled: bool,
}

pub trait DiffEngine {
    fn compare(&self, before: &[u8], after: &[u8], options: &DiffOptions) -> Result<DiffReport>;
}
