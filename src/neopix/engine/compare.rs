//! Diff engine backed by the `image-compare` crate.
//!
//! `image-compare` scores each pixel with a metric picked by the tolerance
//! mode. Structure and RMS maps hold similarity (1.0 means identical), the
//! hybrid maps hold difference (0.0 means identical), so every map is first
//! turned into a per-pixel difference. A pixel counts as mismatched when it
//! actually changed and its difference exceeds the mode's tolerance.

use super::{DiffEngine, DiffReport};
use crate::config::{DiffOptions, ErrorColor, ErrorType, IgnoreMode};
use crate::error::{NeopixError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};
use image_compare::Algorithm;
use std::io::Cursor;

#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCompareEngine;

impl ImageCompareEngine {
    pub fn new() -> Self {
        Self
    }
}

impl DiffEngine for ImageCompareEngine {
    fn compare(&self, before: &[u8], after: &[u8], options: &DiffOptions) -> Result<DiffReport> {
        let before = decode(before, "baseline")?;
        let after = decode(after, "updated")?;

        let (width, height) = before.dimensions();
        let rescaled = before.dimensions() != after.dimensions();
        let after = if rescaled {
            if !options.scale_to_same_size {
                let (aw, ah) = after.dimensions();
                return Err(NeopixError::DimensionMismatch(width, height, aw, ah));
            }
            log::info!(
                "Scaling updated image from {}x{} to {}x{}",
                after.width(),
                after.height(),
                width,
                height
            );
            after.resize_exact(width, height, FilterType::Triangle)
        } else {
            after
        };

        let (sample_w, sample_h) =
            sample_dimensions(width, height, options.large_image_threshold);
        let map = if (sample_w, sample_h) != (width, height) {
            log::info!("Large image: comparing at {}x{}", sample_w, sample_h);
            DifferenceMap::compute(
                &before.resize_exact(sample_w, sample_h, FilterType::Nearest),
                &after.resize_exact(sample_w, sample_h, FilterType::Nearest),
                options.ignore,
            )?
        } else {
            DifferenceMap::compute(&before, &after, options.ignore)?
        };

        let painter = Painter::new(options);
        let limit = tolerance(options.ignore);
        let mut diff = RgbaImage::new(width, height);
        let mut mismatched: u64 = 0;

        for (x, y, out) in diff.enumerate_pixels_mut() {
            let base = before.get_pixel(x, y);
            let current = after.get_pixel(x, y);
            let difference = map.sample(x, y, width, height);
            *out = if changed(base, current, limit) && difference > limit {
                mismatched += 1;
                painter.error_pixel(current, difference)
            } else {
                painter.unchanged_pixel(base)
            };
        }

        let total = u64::from(width) * u64::from(height);
        let mismatch_percentage = if total == 0 {
            0.0
        } else {
            mismatched as f64 / total as f64 * 100.0
        };

        Ok(DiffReport {
            mismatch_percentage,
            diff_image: encode_png(diff)?,
            width,
            height,
            rescaled,
        })
    }
}

fn decode(bytes: &[u8], which: &'static str) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|source| NeopixError::Decode { which, source })
}

fn encode_png(image: RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(NeopixError::Encode)?;
    Ok(bytes)
}

/// Per-pixel difference above this counts as a mismatch.
fn tolerance(mode: IgnoreMode) -> f32 {
    match mode {
        IgnoreMode::Nothing => 0.001,
        IgnoreMode::Less | IgnoreMode::Colors | IgnoreMode::Alpha => 16.0 / 255.0,
        IgnoreMode::Antialiasing => 32.0 / 255.0,
    }
}

/// Whether any RGBA channel moved by more than `tolerance`.
fn changed(base: Rgba<u8>, current: Rgba<u8>, tolerance: f32) -> bool {
    base.0
        .iter()
        .zip(current.0.iter())
        .any(|(a, b)| f32::from(a.abs_diff(*b)) / 255.0 > tolerance)
}

/// Shrink so the longest side equals `threshold`, keeping the aspect ratio.
fn sample_dimensions(width: u32, height: u32, threshold: u32) -> (u32, u32) {
    let longest = width.max(height);
    if threshold == 0 || longest <= threshold {
        return (width, height);
    }
    let scale = f64::from(threshold) / f64::from(longest);
    let shrink = |side: u32| ((f64::from(side) * scale).round() as u32).max(1);
    (shrink(width), shrink(height))
}

/// Floor of the hybrid RGBA alpha channel; the rest of its range scales with
/// alpha similarity.
const ALPHA_VISIBILITY_MIN: f32 = 0.1;

/// Per-pixel difference in `0.0..=1.0`, 0.0 meaning identical.
struct DifferenceMap {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl DifferenceMap {
    fn compute(before: &DynamicImage, after: &DynamicImage, mode: IgnoreMode) -> Result<Self> {
        let similarity = match mode {
            IgnoreMode::Nothing | IgnoreMode::Less => {
                image_compare::rgba_hybrid_compare(&before.to_rgba8(), &after.to_rgba8())?
            }
            IgnoreMode::Antialiasing => image_compare::gray_similarity_structure(
                &Algorithm::MSSIMSimple,
                &before.to_luma8(),
                &after.to_luma8(),
            )?,
            IgnoreMode::Colors => image_compare::gray_similarity_structure(
                &Algorithm::RootMeanSquared,
                &before.to_luma8(),
                &after.to_luma8(),
            )?,
            IgnoreMode::Alpha => {
                image_compare::rgb_hybrid_compare(&before.to_rgb8(), &after.to_rgb8())?
            }
        };
        log::debug!("image-compare score: {:.6}", similarity.score);

        let map = similarity.image.to_color_map();
        let (width, height) = map.dimensions();
        let values = match mode {
            // R, G, B hold 1 - similarity of Y, U, V; A holds alpha visibility
            IgnoreMode::Nothing | IgnoreMode::Less => map
                .to_rgba8()
                .pixels()
                .map(|p| hybrid_difference(&p.0[..3]).max(alpha_difference(p.0[3])))
                .collect(),
            IgnoreMode::Alpha => map
                .to_rgb8()
                .pixels()
                .map(|p| hybrid_difference(&p.0))
                .collect(),
            IgnoreMode::Antialiasing | IgnoreMode::Colors => map
                .to_luma8()
                .pixels()
                .map(|p| 1.0 - unit(p.0[0]))
                .collect(),
        };

        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Look up the difference for pixel `(x, y)` of a `width` x `height` image.
    fn sample(&self, x: u32, y: u32, width: u32, height: u32) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 0.0;
        }
        let mx = (u64::from(x) * u64::from(self.width) / u64::from(width.max(1))) as u32;
        let my = (u64::from(y) * u64::from(self.height) / u64::from(height.max(1))) as u32;
        let mx = mx.min(self.width - 1);
        let my = my.min(self.height - 1);
        self.values[(my * self.width + mx) as usize]
    }
}

fn unit(value: u8) -> f32 {
    f32::from(value) / 255.0
}

fn hybrid_difference(channels: &[u8]) -> f32 {
    channels.iter().copied().map(unit).fold(0.0, f32::max)
}

fn alpha_difference(visibility: u8) -> f32 {
    ((1.0 - unit(visibility)) / (1.0 - ALPHA_VISIBILITY_MIN)).clamp(0.0, 1.0)
}

struct Painter {
    color: ErrorColor,
    error_type: ErrorType,
    opacity: f32,
}

impl Painter {
    fn new(options: &DiffOptions) -> Self {
        Self {
            color: options.error_color,
            error_type: options.error_type,
            opacity: 1.0 - options.transparency.clamp(0.0, 1.0),
        }
    }

    fn error_pixel(&self, current: Rgba<u8>, intensity: f32) -> Rgba<u8> {
        let ErrorColor { red, green, blue } = self.color;
        let strength = (intensity.clamp(0.0, 1.0) * 255.0).round() as u8;
        match self.error_type {
            ErrorType::Flat => Rgba([red, green, blue, 255]),
            ErrorType::Movement => self.movement(current, 255),
            ErrorType::FlatDifferenceIntensity => Rgba([red, green, blue, strength]),
            ErrorType::MovementDifferenceIntensity => self.movement(current, strength),
            ErrorType::DiffOnly => current,
        }
    }

    /// Error color tinted by the updated pixel.
    fn movement(&self, current: Rgba<u8>, alpha: u8) -> Rgba<u8> {
        let tint = |error: u8, channel: u8| {
            let error = f32::from(error);
            ((error * f32::from(channel) / 255.0 + error) / 2.0).round() as u8
        };
        Rgba([
            tint(self.color.red, current[0]),
            tint(self.color.green, current[1]),
            tint(self.color.blue, current[2]),
            alpha,
        ])
    }

    fn unchanged_pixel(&self, base: Rgba<u8>) -> Rgba<u8> {
        if self.error_type == ErrorType::DiffOnly {
            return Rgba([0, 0, 0, 0]);
        }
        let brightness = (0.3 * f32::from(base[0])
            + 0.59 * f32::from(base[1])
            + 0.11 * f32::from(base[2]))
        .round()
        .clamp(0.0, 255.0) as u8;
        let alpha = (f32::from(base[3]) * self.opacity).round() as u8;
        Rgba([brightness, brightness, brightness, alpha])
    }
}
