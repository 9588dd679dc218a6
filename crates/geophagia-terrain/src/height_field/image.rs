//! 8-bit grayscale image heightmaps.
//!
//! Each pixel is one sample: byte `0..=255` loads as elevation `0.0..=255.0`.
//! Colour images are reduced to luminance on load.

use std::path::Path;

use ::image::codecs::png::PngEncoder;
use ::image::{ExtendedColorType, GrayImage, ImageEncoder};

use super::HeightField;
use crate::TerrainError;

/// Quantize an elevation to an image byte: clamped to `[0, 255]`, rounded
/// to nearest. NaN maps to 0.
pub fn elevation_to_byte(elevation: f32) -> u8 {
    elevation.clamp(0.0, 255.0).round() as u8
}

impl HeightField {
    /// Replace the field with a decoded image heightmap (any codec the
    /// `image` crate was built with).
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), TerrainError> {
        let image = ::image::load_from_memory(bytes)?.to_luma8();
        self.load_gray_image(&image)
    }

    /// Read and decode an image heightmap file.
    pub fn load_image_file(&mut self, path: &Path) -> Result<(), TerrainError> {
        let image = ::image::open(path)?.to_luma8();
        self.load_gray_image(&image)
    }

    /// Replace the field with the pixels of a grayscale image.
    pub fn load_gray_image(&mut self, image: &GrayImage) -> Result<(), TerrainError> {
        let (width, depth) = image.dimensions();
        let elevations = image.as_raw().iter().map(|&p| p as f32).collect();
        self.update(elevations, width, depth)
    }

    /// Quantize the field into a grayscale image of the same dimensions.
    pub fn to_gray_image(&self) -> Result<GrayImage, TerrainError> {
        if self.is_empty() {
            return Err(TerrainError::EmptyField);
        }
        let pixels = self.elevations.iter().map(|&h| elevation_to_byte(h)).collect();
        GrayImage::from_raw(self.width, self.depth, pixels).ok_or(TerrainError::SizeMismatch {
            width: self.width,
            depth: self.depth,
            expected: self.width as u64 * self.depth as u64,
            actual: self.len(),
        })
    }

    /// Encode the field as an 8-bit grayscale PNG in memory.
    pub fn encode_png(&self) -> Result<Vec<u8>, TerrainError> {
        let image = self.to_gray_image()?;
        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::L8,
        )?;
        Ok(out)
    }

    /// Write the field as an 8-bit grayscale image; the codec is chosen from
    /// the file extension.
    pub fn save_image_file(&self, path: &Path) -> Result<(), TerrainError> {
        self.to_gray_image()?.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{Luma, Rgb, RgbImage};
    use tempfile::tempdir;

    #[test]
    fn test_elevation_to_byte_clamps_and_rounds() {
        assert_eq!(elevation_to_byte(-4.0), 0);
        assert_eq!(elevation_to_byte(0.49), 0);
        assert_eq!(elevation_to_byte(0.5), 1);
        assert_eq!(elevation_to_byte(254.6), 255);
        assert_eq!(elevation_to_byte(1000.0), 255);
        assert_eq!(elevation_to_byte(f32::NAN), 0);
    }

    #[test]
    fn test_gray_pixels_become_elevations() {
        let mut image = GrayImage::new(3, 2);
        image.put_pixel(0, 0, Luma([0]));
        image.put_pixel(2, 0, Luma([255]));
        image.put_pixel(1, 1, Luma([128]));

        let mut field = HeightField::empty();
        field.load_gray_image(&image).unwrap();
        assert_eq!(field.width(), 3);
        assert_eq!(field.depth(), 2);
        assert_eq!(field.get(0, 0), Some(0.0));
        assert_eq!(field.get(2, 0), Some(255.0));
        assert_eq!(field.get(1, 1), Some(128.0));
    }

    #[test]
    fn test_png_round_trip_in_memory() {
        let samples: Vec<f32> = (0..16).map(|i| (i * 17) as f32).collect();
        let field = HeightField::from_elevations(4, 4, samples.clone()).unwrap();

        let png = field.encode_png().unwrap();
        let mut loaded = HeightField::empty();
        loaded.load_image(&png).unwrap();

        assert_eq!(loaded.width(), 4);
        assert_eq!(loaded.depth(), 4);
        assert_eq!(loaded.elevations(), samples.as_slice());
    }

    #[test]
    fn test_png_file_round_trip() {
        let field = HeightField::checkerboard(8, 5, 2, 10.0, 200.0).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("terrain.png");
        field.save_image_file(&path).unwrap();

        let mut loaded = HeightField::empty();
        loaded.load_image_file(&path).unwrap();
        assert_eq!(loaded.width(), 8);
        assert_eq!(loaded.depth(), 5);
        assert_eq!(loaded.elevations(), field.elevations());
    }

    #[test]
    fn test_colour_image_uses_luminance() {
        let mut image = RgbImage::new(1, 1);
        image.put_pixel(0, 0, Rgb([90, 90, 90]));
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes)
            .write_image(image.as_raw(), 1, 1, ExtendedColorType::Rgb8)
            .unwrap();

        let mut field = HeightField::empty();
        field.load_image(&bytes).unwrap();
        assert_eq!(field.get(0, 0), Some(90.0));
    }

    #[test]
    fn test_garbage_bytes_leave_field_untouched() {
        let mut field = HeightField::flat(2, 2).unwrap();
        let err = field.load_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, TerrainError::Image(_)));
        assert_eq!(field.len(), 4);
        assert_eq!(field.revision(), 0);
    }

    #[test]
    fn test_empty_field_cannot_be_encoded() {
        assert!(matches!(
            HeightField::empty().encode_png(),
            Err(TerrainError::EmptyField)
        ));
    }
}
