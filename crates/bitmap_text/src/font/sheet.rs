//! Font sheet image loading
//!
//! Font sheets are drawn white-on-black. Glyph coverage is taken from the
//! red channel, so the background becomes transparent when the sheet is
//! uploaded as an alpha texture.

use std::path::Path;

use image::DynamicImage;

use super::{FontError, FontResult, FontSheetDescriptor, FontSheetDescriptorBuilder};

/// Decoded font sheet: one coverage byte per pixel, rows top-down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSheetImage {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl FontSheetImage {
    /// Load a font sheet from an image file (BMP, PNG)
    ///
    /// # Errors
    ///
    /// Returns [`FontError::ImageLoad`] if the file cannot be read or decoded.
    pub fn from_file<P: AsRef<Path>>(path: P) -> FontResult<Self> {
        let path_ref = path.as_ref();

        log::debug!("Loading font sheet from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| FontError::ImageLoad(format!("{}: {}", path_ref.display(), e)))?;
        let sheet = Self::from_image(&img);

        log::info!("Loaded font sheet {}x{} from {:?}", sheet.width, sheet.height, path_ref);

        Ok(sheet)
    }

    /// Load a font sheet from encoded image bytes
    ///
    /// # Errors
    ///
    /// Returns [`FontError::ImageLoad`] if the bytes cannot be decoded.
    pub fn from_bytes(bytes: &[u8]) -> FontResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| FontError::ImageLoad(format!("font sheet from bytes: {e}")))?;
        let sheet = Self::from_image(&img);

        log::debug!("Loaded font sheet {}x{} from memory", sheet.width, sheet.height);

        Ok(sheet)
    }

    /// Extract coverage from an already decoded image
    pub fn from_image(img: &DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let coverage = rgb.pixels().map(|px| px.0[0]).collect();

        Self { width, height, coverage }
    }

    /// Wrap raw coverage bytes
    ///
    /// # Errors
    ///
    /// Returns [`FontError::ImageLoad`] if `coverage` is not `width * height` bytes.
    pub fn from_coverage(width: u32, height: u32, coverage: Vec<u8>) -> FontResult<Self> {
        let expected = width as usize * height as usize;
        if coverage.len() != expected {
            return Err(FontError::ImageLoad(format!(
                "expected {expected} coverage bytes for {width}x{height}, got {}",
                coverage.len()
            )));
        }
        Ok(Self { width, height, coverage })
    }

    /// Image width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Coverage bytes, row-major, top row first
    pub fn coverage(&self) -> &[u8] {
        &self.coverage
    }

    /// Coverage at pixel (x, y), `None` outside the image
    pub fn coverage_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.coverage.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Expand to white RGBA with coverage in alpha, ready for texture upload
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.coverage.len() * 4);
        for &alpha in &self.coverage {
            rgba.extend_from_slice(&[255, 255, 255, alpha]);
        }
        rgba
    }

    /// Rows in bottom-up order, for APIs that expect the first row at v = 0
    /// under [`super::TextureOrigin::BottomLeft`]
    pub fn flipped_rows(&self) -> Vec<u8> {
        let row_len = self.width as usize;
        if row_len == 0 {
            return Vec::new();
        }
        self.coverage.chunks_exact(row_len).rev().flatten().copied().collect()
    }

    /// Start a descriptor for this image with the given cell size
    pub fn descriptor(&self, cell_width: u32, cell_height: u32) -> FontSheetDescriptorBuilder {
        FontSheetDescriptor::builder(self.width, self.height, cell_width, cell_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn checker(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn test_coverage_from_red_channel() {
        let img = RgbImage::from_fn(2, 1, |x, _| if x == 0 { Rgb([200, 10, 10]) } else { Rgb([0, 90, 0]) });
        let sheet = FontSheetImage::from_image(&DynamicImage::ImageRgb8(img));

        assert_eq!(sheet.coverage(), &[200, 0]);
    }

    #[test]
    fn test_load_bmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.bmp");
        checker(32, 16).save(&path).unwrap();

        let sheet = FontSheetImage::from_file(&path).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (32, 16));
        assert_eq!(sheet.coverage_at(0, 0), Some(255));
        assert_eq!(sheet.coverage_at(1, 0), Some(0));
        assert_eq!(sheet.coverage_at(32, 0), None);

        let descriptor = sheet.descriptor(8, 8).build().unwrap();
        assert_eq!((descriptor.columns(), descriptor.rows()), (4, 2));
    }

    #[test]
    fn test_missing_file() {
        let err = FontSheetImage::from_file("does/not/exist.bmp").unwrap_err();
        assert!(matches!(err, FontError::ImageLoad(_)));
    }

    #[test]
    fn test_garbage_bytes() {
        assert!(FontSheetImage::from_bytes(&[1, 2, 3, 4]).is_err());
    }

    #[test]
    fn test_rgba_expansion() {
        let sheet = FontSheetImage::from_coverage(2, 1, vec![0, 128]).unwrap();
        assert_eq!(sheet.to_rgba(), vec![255, 255, 255, 0, 255, 255, 255, 128]);
    }

    #[test]
    fn test_flipped_rows() {
        let sheet = FontSheetImage::from_coverage(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(sheet.flipped_rows(), vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_coverage_length_mismatch() {
        assert!(FontSheetImage::from_coverage(2, 2, vec![0; 3]).is_err());
    }
}
