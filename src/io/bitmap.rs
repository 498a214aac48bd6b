//! Bitmap to weighted point cloud conversion.
//!
//! Pixel `(col, row)` of a `width x height` image becomes the point
//! `(col, height - 1 - row)`, so y points up. Its mass is the pixel's ink
//! level in `[0, 1]`:
//!
//! | Polarity | Ink of gray value `g` |
//! |----------|-----------------------|
//! | `DarkInk` | `(255 - g) / 255` (black strokes on white) |
//! | `LightInk` | `g / 255` (white strokes on black) |
//!
//! Pixels with ink at or below `ink_threshold` keep their slot as invalid
//! placeholders.

use std::path::{Path, PathBuf};

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::core::{PointCloud, WeightedPoint};
use crate::error::{DrishtiError, Result};

/// Which gray level counts as ink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InkPolarity {
    /// Dark pixels carry mass.
    #[default]
    DarkInk,
    /// Bright pixels carry mass.
    LightInk,
}

/// Image section of the configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Directory holding the bitmaps.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Ink polarity.
    #[serde(default)]
    pub ink: InkPolarity,

    /// Ink level in `[0, 1]` at or below which a pixel is a placeholder.
    #[serde(default)]
    pub ink_threshold: f64,
}

fn default_directory() -> PathBuf {
    PathBuf::from("images")
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            ink: InkPolarity::default(),
            ink_threshold: 0.0,
        }
    }
}

impl ImageConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.ink_threshold) {
            return Err(DrishtiError::InvalidConfig(format!(
                "ink_threshold must be in [0, 1], got {}",
                self.ink_threshold
            )));
        }
        Ok(())
    }
}

/// Converts grayscale bitmaps into point clouds.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageConverter {
    ink: InkPolarity,
    ink_threshold: f64,
}

impl ImageConverter {
    /// Create a converter.
    pub fn new(ink: InkPolarity, ink_threshold: f64) -> Self {
        Self { ink, ink_threshold }
    }

    /// Create from the image configuration.
    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(config.ink, config.ink_threshold)
    }

    /// Ink level of one gray value.
    #[inline]
    pub fn ink_level(&self, gray: u8) -> f64 {
        let g = f64::from(gray) / 255.0;
        match self.ink {
            InkPolarity::DarkInk => 1.0 - g,
            InkPolarity::LightInk => g,
        }
    }

    /// Convert every pixel, row by row from the top of the image.
    pub fn convert(&self, image: &GrayImage) -> PointCloud {
        let height = image.height();
        image
            .enumerate_pixels()
            .map(|(col, row, pixel)| {
                let x = f64::from(col);
                let y = f64::from(height - 1 - row);
                let ink = self.ink_level(pixel.0[0]);
                if ink > self.ink_threshold {
                    WeightedPoint::new(x, y, ink)
                } else {
                    WeightedPoint::placeholder(x, y)
                }
            })
            .collect()
    }
}

/// Loads bitmaps by file name from a directory.
#[derive(Clone, Debug)]
pub struct ImageLoader {
    directory: PathBuf,
}

impl ImageLoader {
    /// Create a loader rooted at `directory`.
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Root directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Decode `name` as 8-bit grayscale.
    pub fn load(&self, name: &str) -> Result<GrayImage> {
        let path = self.directory.join(name);
        let image = image::open(&path)
            .map_err(|e| DrishtiError::Image(format!("Failed to load {}: {}", path.display(), e)))?
            .into_luma8();
        log::debug!(
            "Loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(image)
    }

    /// Decode `name` and convert it to a point cloud.
    pub fn load_cloud(&self, name: &str, converter: &ImageConverter) -> Result<PointCloud> {
        Ok(converter.convert(&self.load(name)?))
    }
}

/// File name of the reference bitmap for digit `label`.
pub fn reference_file_name(label: usize) -> String {
    format!("reference-{}.bmp", label)
}

/// File name of the candidate bitmap for digit `label`.
pub fn candidate_file_name(label: usize) -> String {
    format!("candidate-{}.bmp", label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Luma;

    fn two_by_two() -> GrayImage {
        // Top row: black, white. Bottom row: gray, white.
        GrayImage::from_fn(2, 2, |col, row| match (col, row) {
            (0, 0) => Luma([0]),
            (0, 1) => Luma([51]),
            _ => Luma([255]),
        })
    }

    #[test]
    fn test_y_axis_points_up() {
        let cloud = ImageConverter::default().convert(&two_by_two());
        assert_eq!(cloud.len(), 4);
        let top_left = cloud.points()[0];
        assert_eq!((top_left.x, top_left.y), (0.0, 1.0));
        assert_relative_eq!(top_left.mass, 1.0);

        let bottom_left = cloud.points()[2];
        assert_eq!((bottom_left.x, bottom_left.y), (0.0, 0.0));
        assert_relative_eq!(bottom_left.mass, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_blank_pixels_are_placeholders() {
        let cloud = ImageConverter::default().convert(&two_by_two());
        assert!(cloud.points()[1].invalid);
        assert!(cloud.points()[3].invalid);
        assert_eq!(cloud.active_count(), 2);
    }

    #[test]
    fn test_threshold_and_polarity() {
        let cloud = ImageConverter::new(InkPolarity::DarkInk, 0.9).convert(&two_by_two());
        assert_eq!(cloud.active_count(), 1);

        let cloud = ImageConverter::new(InkPolarity::LightInk, 0.0).convert(&two_by_two());
        assert_eq!(cloud.active_count(), 3);
        assert_relative_eq!(cloud.total_mass(), 2.2, epsilon = 1e-12);
    }

    #[test]
    fn test_loader_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        two_by_two().save(dir.path().join("reference-3.bmp")).unwrap();

        let loader = ImageLoader::new(dir.path());
        let cloud = loader
            .load_cloud(&reference_file_name(3), &ImageConverter::default())
            .unwrap();
        assert_eq!(cloud.active_count(), 2);

        let err = loader.load("missing.bmp").unwrap_err();
        assert!(matches!(err, DrishtiError::Image(_)));
    }

    #[test]
    fn test_config_validate() {
        let config = ImageConfig {
            ink_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(ImageConfig::default().validate().is_ok());
    }
}
