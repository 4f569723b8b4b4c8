//! Bitmap font sheets
//!
//! Font sheet geometry, glyph-to-texture-coordinate mapping, and font sheet
//! image loading.

pub mod descriptor;
pub mod glyph;
pub mod sheet;

pub use descriptor::*;
pub use glyph::*;
pub use sheet::*;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FontError {
    /// Font sheet geometry is inconsistent
    #[error("Invalid font sheet descriptor: {0}")]
    InvalidDescriptor(String),

    /// Character code has no cell in the font sheet
    #[error("Character code {code} is outside the font sheet (codes {first}..{first}+{count})")]
    OutOfRangeGlyph {
        /// Requested character code
        code: u32,
        /// First code stored in the sheet
        first: u32,
        /// Number of cells in the sheet
        count: u32,
    },

    /// Screen dimensions cannot be used for coordinate conversion
    #[error("Invalid screen size {width}x{height}")]
    InvalidScreen {
        /// Screen width in pixels
        width: u32,
        /// Screen height in pixels
        height: u32,
    },

    /// Failed to load or decode the font sheet image
    #[error("Failed to load font sheet image: {0}")]
    ImageLoad(String),
}
