use crate::error::{NeopixError, Result};
use crate::model::WorkspaceLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "neopix.json";
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Which categories of pixel difference are left out of the mismatch score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreMode {
    #[default]
    Nothing,
    Less,
    Antialiasing,
    Colors,
    Alpha,
}

impl IgnoreMode {
    pub const NAMES: [&'static str; 5] = ["nothing", "less", "antialiasing", "colors", "alpha"];

    /// Parse a user-supplied mode, falling back to `Nothing` with a warning.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid mode: {raw}");
            log::warn!("Falling back to default mode: nothing");
            IgnoreMode::Nothing
        })
    }
}

impl FromStr for IgnoreMode {
    type Err = NeopixError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nothing" => Ok(IgnoreMode::Nothing),
            "less" => Ok(IgnoreMode::Less),
            "antialiasing" => Ok(IgnoreMode::Antialiasing),
            "colors" => Ok(IgnoreMode::Colors),
            "alpha" => Ok(IgnoreMode::Alpha),
            _ => Err(NeopixError::Config(format!(
                "unknown mode '{}', expected one of: {}",
                s,
                Self::NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for IgnoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IgnoreMode::Nothing => "nothing",
            IgnoreMode::Less => "less",
            IgnoreMode::Antialiasing => "antialiasing",
            IgnoreMode::Colors => "colors",
            IgnoreMode::Alpha => "alpha",
        };
        f.write_str(name)
    }
}

/// How mismatched pixels are painted in the diff image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorType {
    Flat,
    /// Tint the error color with the updated pixel, so shifted content stays visible
    #[default]
    Movement,
    FlatDifferenceIntensity,
    MovementDifferenceIntensity,
    /// Only the updated pixels that differ; everything else transparent
    DiffOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for ErrorColor {
    fn default() -> Self {
        Self {
            red: 255,
            green: 0,
            blue: 255,
        }
    }
}

/// Everything the diff engine needs besides the two images.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffOptions {
    pub error_color: ErrorColor,
    pub error_type: ErrorType,
    /// 0 keeps unchanged pixels opaque, 1 makes them fully transparent
    pub transparency: f32,
    pub large_image_threshold: u32,
    pub scale_to_same_size: bool,
    pub ignore: IgnoreMode,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            error_color: ErrorColor::default(),
            error_type: ErrorType::default(),
            transparency: default_transparency(),
            large_image_threshold: default_large_image_threshold(),
            scale_to_same_size: true,
            ignore: IgnoreMode::default(),
        }
    }
}

/// Optional settings file, read from `<base dir>/neopix.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NeopixConfig {
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Kept as a raw string so an unknown value degrades like the `--mode` flag
    #[serde(default)]
    pub mode: Option<String>,

    #[serde(default = "default_baseline_dir")]
    pub baseline_dir: String,

    #[serde(default = "default_updated_dir")]
    pub updated_dir: String,

    #[serde(default = "default_diff_dir")]
    pub diff_dir: String,

    #[serde(default)]
    pub error_color: ErrorColor,

    #[serde(default)]
    pub error_type: ErrorType,

    #[serde(default = "default_transparency")]
    pub transparency: f32,

    #[serde(default = "default_large_image_threshold")]
    pub large_image_threshold: u32,

    #[serde(default = "default_true")]
    pub scale_to_same_size: bool,
}

fn default_baseline_dir() -> String {
    "xxx".to_string()
}

fn default_updated_dir() -> String {
    "yyy".to_string()
}

fn default_diff_dir() -> String {
    "diff".to_string()
}

fn default_transparency() -> f32 {
    0.3
}

fn default_large_image_threshold() -> u32 {
    1920
}

fn default_true() -> bool {
    true
}

impl Default for NeopixConfig {
    fn default() -> Self {
        Self {
            threshold: None,
            mode: None,
            baseline_dir: default_baseline_dir(),
            updated_dir: default_updated_dir(),
            diff_dir: default_diff_dir(),
            error_color: ErrorColor::default(),
            error_type: ErrorType::default(),
            transparency: default_transparency(),
            large_image_threshold: default_large_image_threshold(),
            scale_to_same_size: true,
        }
    }
}

impl NeopixConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NeopixError::Io)?;
        let config: NeopixConfig =
            serde_json::from_str(&content).map_err(NeopixError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.transparency) {
            return Err(NeopixError::Config(format!(
                "transparency must be between 0 and 1, got {}",
                self.transparency
            )));
        }
        if self.large_image_threshold == 0 {
            return Err(NeopixError::Config(
                "large_image_threshold must be positive".to_string(),
            ));
        }
        if let Some(threshold) = self.threshold {
            validate_threshold(threshold)?;
        }
        for name in [&self.baseline_dir, &self.updated_dir, &self.diff_dir] {
            if name.trim().is_empty() {
                return Err(NeopixError::Config(
                    "workspace directory names cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(NeopixError::Config(format!(
            "threshold must be a non-negative number, got {}",
            threshold
        )))
    }
}

/// Values the caller supplies per run. `None` means "not given on the command line".
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub threshold: Option<f64>,
    pub mode: Option<String>,
    pub strict: bool,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub layout: WorkspaceLayout,
    pub threshold: f64,
    pub diff: DiffOptions,
    /// Abort on workspace copy failures instead of reporting and continuing
    pub strict: bool,
}

impl RunConfig {
    /// Merge overrides over file settings over defaults. `base_dir` must already be absolute.
    pub fn resolve(base_dir: &Path, file: &NeopixConfig, overrides: &RunOverrides) -> Result<Self> {
        let threshold = match overrides.threshold.or(file.threshold) {
            Some(t) => validate_threshold(t)?,
            None => DEFAULT_THRESHOLD,
        };

        let ignore = overrides
            .mode
            .as_deref()
            .or(file.mode.as_deref())
            .map(IgnoreMode::parse_lenient)
            .unwrap_or_default();

        let layout = WorkspaceLayout::new(
            base_dir,
            &file.baseline_dir,
            &file.updated_dir,
            &file.diff_dir,
        );

        Ok(Self {
            layout,
            threshold,
            diff: DiffOptions {
                error_color: file.error_color,
                error_type: file.error_type,
                transparency: file.transparency,
                large_image_threshold: file.large_image_threshold,
                scale_to_same_size: file.scale_to_same_size,
                ignore,
            },
            strict: overrides.strict,
        })
    }
}
