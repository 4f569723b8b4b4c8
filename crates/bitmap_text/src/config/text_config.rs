//! Text rendering configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::font::{FontResult, FontSheetDescriptor, MissingGlyph, TextureOrigin};
use crate::layout::VerticalAxis;
use crate::render::TextStyle;

/// Everything needed to set up a [`crate::render::Text2D`]
///
/// Missing fields fall back to [`TextConfig::default`], which describes a
/// 16×16 grid of 32px cells starting at ASCII 32, drawn 16px tall in white
/// on a 500×500 screen with pixel y pointing up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font sheet image; there is no implicit default file
    pub font_sheet_path: Option<PathBuf>,
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
    /// Character code of the first cell
    pub first_code: u32,
    /// Pixels inset from each cell edge
    pub margin: u32,
    /// Ink width within each cell; full cell when unset
    pub glyph_width: Option<u32>,
    /// Texture coordinate origin of the uploaded sheet
    pub texture_origin: TextureOrigin,
    /// Policy for characters outside the sheet
    pub missing_glyph: MissingGlyph,
    /// Glyph height on screen in pixels
    pub font_size: f32,
    /// Glyph width as a fraction of its height
    pub glyph_aspect: f32,
    /// Extra horizontal pixels between glyphs
    pub spacing: f32,
    /// Extra vertical pixels between lines
    pub line_spacing: f32,
    /// Text color, normalized RGBA
    pub color: [f32; 4],
    /// Framebuffer width in pixels
    pub screen_width: u32,
    /// Framebuffer height in pixels
    pub screen_height: u32,
    /// Direction of pixel +Y
    pub vertical_axis: VerticalAxis,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl TextConfig {
    /// Build the font sheet descriptor for an image of the given size
    ///
    /// # Errors
    ///
    /// Returns [`crate::font::FontError::InvalidDescriptor`] if the configured
    /// geometry does not fit the image.
    pub fn descriptor_for(&self, image_width: u32, image_height: u32) -> FontResult<FontSheetDescriptor> {
        let mut builder = FontSheetDescriptor::builder(image_width, image_height, self.cell_width, self.cell_height)
            .first_code(self.first_code)
            .margin(self.margin)
            .texture_origin(self.texture_origin)
            .missing_glyph(self.missing_glyph);
        if let Some(width) = self.glyph_width {
            builder = builder.glyph_width(width);
        }
        builder.build()
    }

    /// Style described by this configuration
    pub const fn style(&self) -> TextStyle {
        TextStyle {
            color: self.color,
            font_size: self.font_size,
            glyph_aspect: self.glyph_aspect,
        }
    }

    /// Validate values that cannot be checked by the type system
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.font_size <= 0.0 || !self.font_size.is_finite() {
            return invalid(format!("font_size must be positive, got {}", self.font_size));
        }
        if self.glyph_aspect <= 0.0 || !self.glyph_aspect.is_finite() {
            return invalid(format!("glyph_aspect must be positive, got {}", self.glyph_aspect));
        }
        if !self.spacing.is_finite() || !self.line_spacing.is_finite() {
            return invalid(format!(
                "spacing must be finite, got {} and line_spacing {}",
                self.spacing, self.line_spacing
            ));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return invalid(format!(
                "screen size must be non-zero, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        if self.color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return invalid(format!("color components must be within [0, 1], got {:?}", self.color));
        }
        if self.log_level.is_empty() {
            return invalid("log_level cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_sheet_path: None,
            cell_width: 32,
            cell_height: 32,
            first_code: 32,
            margin: 0,
            glyph_width: None,
            texture_origin: TextureOrigin::TopLeft,
            missing_glyph: MissingGlyph::Fail,
            font_size: 16.0,
            glyph_aspect: 0.5,
            spacing: 0.0,
            line_spacing: 1.0,
            color: [1.0, 1.0, 1.0, 1.0],
            screen_width: 500,
            screen_height: 500,
            vertical_axis: VerticalAxis::Up,
            log_level: "info".to_string(),
        }
    }
}

impl Config for TextConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TextConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = TextConfig { font_size: 0.0, ..TextConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = TextConfig { color: [1.5, 0.0, 0.0, 1.0], ..TextConfig::default() };
        assert!(config.validate().is_err());

        let config = TextConfig { screen_height: 0, ..TextConfig::default() };
        assert!(config.validate().is_err());

        let config = TextConfig { line_spacing: f32::NAN, ..TextConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_descriptor_for_image() {
        let config = TextConfig { glyph_width: Some(16), ..TextConfig::default() };
        let descriptor = config.descriptor_for(512, 512).unwrap();

        assert_eq!(descriptor.columns(), 16);
        assert_eq!(descriptor.glyph_width(), 16);
        assert!(config.descriptor_for(500, 512).is_err());
    }

    #[test]
    fn test_huge_margin_is_rejected() {
        let config: TextConfig = toml::from_str("margin = 2147483648\n").unwrap();
        assert!(matches!(
            config.descriptor_for(512, 512),
            Err(crate::font::FontError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text.toml");
        let path = path.to_str().unwrap();

        let config = TextConfig {
            font_sheet_path: Some(PathBuf::from("fonts/mono.bmp")),
            missing_glyph: MissingGlyph::Skip,
            color: [0.2, 0.2, 0.2, 1.0],
            ..TextConfig::default()
        };
        config.save_to_file(path).unwrap();

        assert_eq!(TextConfig::load_from_file(path).unwrap(), config);
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("text.ron");
        let path = path.to_str().unwrap();

        let config = TextConfig {
            vertical_axis: VerticalAxis::Down,
            missing_glyph: MissingGlyph::Substitute(63),
            glyph_width: Some(16),
            ..TextConfig::default()
        };
        config.save_to_file(path).unwrap();

        assert_eq!(TextConfig::load_from_file(path).unwrap(), config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: TextConfig = toml::from_str("font_size = 24.0\nscreen_width = 800\n").unwrap();

        assert_eq!(config.font_size, 24.0);
        assert_eq!(config.screen_width, 800);
        assert_eq!(config.cell_width, 32);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = TextConfig::default().save_to_file("text.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
