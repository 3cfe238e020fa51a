use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NeopixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Input image not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Workspace error at {}: {source}", .path.display())]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decode {which} image: {source}")]
    Decode {
        which: &'static str,
        #[source]
        source: image::ImageError,
    },

    #[error("Dimension mismatch: baseline {0}x{1}, updated {2}x{3}")]
    DimensionMismatch(u32, u32, u32, u32),

    #[error("Comparison failed: {0}")]
    Compare(#[from] image_compare::CompareError),

    #[error("Could not encode diff image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NeopixError {
    pub fn workspace(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NeopixError::Workspace {
            path: path.into(),
            source,
        }
    }

    /// Whether the failure came from copying or creating workspace files.
    pub fn is_workspace(&self) -> bool {
        matches!(self, NeopixError::Workspace { .. })
    }
}

pub type Result<T> = std::result::Result<T, NeopixError>;
