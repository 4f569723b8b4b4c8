//! Text rendering front end
//!
//! [`Text2D`] owns a font sheet and its texture handle, turns strings into
//! NDC quad meshes, and hands them to a host [`TextBackend`] that binds the
//! texture and issues the draw calls.

pub mod backend;
pub mod text2d;

pub use backend::*;
pub use text2d::*;

use crate::config::ConfigError;
use crate::font::FontError;

/// Errors from the text rendering front end
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// Font sheet or layout failure
    #[error(transparent)]
    Font(#[from] FontError),

    /// Configuration failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Host backend failure
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Style value that cannot be drawn with
    #[error("Invalid text style: {0}")]
    InvalidStyle(String),

    /// No font sheet path was configured
    #[error("No font sheet path configured")]
    MissingFontSheet,
}

/// Visual style for printed text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Normalized RGBA color
    pub color: [f32; 4],
    /// Glyph height in pixels
    pub font_size: f32,
    /// Glyph width as a fraction of the height
    pub glyph_aspect: f32,
}

impl TextStyle {
    /// Glyph width in pixels
    pub fn glyph_width(&self) -> f32 {
        self.font_size * self.glyph_aspect
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            font_size: 12.0,
            glyph_aspect: 0.5,
        }
    }
}
