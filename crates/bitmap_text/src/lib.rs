//! # Bitmap Text
//!
//! 2D text rendering geometry for fixed-grid bitmap font sheets.
//!
//! A font sheet is a single image holding glyphs in a grid of equally sized
//! cells, laid out row-major starting from a configurable ASCII code. This
//! crate maps characters to normalized texture rectangles within that grid
//! and lays out strings as screen-aligned quads. Issuing the actual draw
//! calls is left to a host [`render::TextBackend`].
//!
//! ## Quick Start
//!
//! ```rust
//! use bitmap_text::prelude::*;
//!
//! # fn main() -> Result<(), FontError> {
//! let sheet = FontSheetDescriptor::builder(256, 256, 16, 16)
//!     .first_code(32)
//!     .build()?;
//!
//! let rect = sheet.glyph_rect(u32::from('A'))?;
//! assert_eq!((rect.row, rect.col), (2, 1));
//!
//! let params = LayoutParams::new(10.0, 10.0, 8.0, 16.0);
//! let quads = layout(&sheet, "Hi", &params).quads()?;
//! assert_eq!(quads.len(), 2);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod console;
pub mod font;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod screen;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, TextConfig},
        console::LineConsole,
        font::{
            glyph_rect, FontError, FontResult, FontSheetDescriptor, FontSheetImage, GlyphRect,
            MissingGlyph, TextureOrigin,
        },
        layout::{
            layout, text_extents, GlyphQuad, LayoutParams, QuadBounds, TextLayout, TextMesh,
            TextVertex, VerticalAxis,
        },
        render::{BackendError, FontTexture, Text2D, TextBackend, TextDrawCommand, TextError, TextStyle},
        screen::ScreenSpace,
    };
}
