//! Glyph to texture coordinate mapping

use nalgebra::Vector2;

use super::{FontError, FontResult, FontSheetDescriptor, TextureOrigin};

/// Normalized texture rectangle of one glyph cell
///
/// `uv_min` is always component-wise smaller than `uv_max`, regardless of
/// the texture origin. Use [`GlyphRect::top_v`] and [`GlyphRect::bottom_v`]
/// to find which v edge holds the top of the glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRect {
    /// UV coordinates of the minimum corner (normalized 0.0-1.0)
    pub uv_min: Vector2<f32>,
    /// UV coordinates of the maximum corner (normalized 0.0-1.0)
    pub uv_max: Vector2<f32>,
    /// Cell row, 0 at the top of the image
    pub row: u32,
    /// Cell column, 0 at the left of the image
    pub col: u32,
    /// Texture origin the v coordinates were computed for
    pub origin: TextureOrigin,
}

impl GlyphRect {
    /// Minimum u
    pub fn u_min(&self) -> f32 {
        self.uv_min.x
    }

    /// Minimum v
    pub fn v_min(&self) -> f32 {
        self.uv_min.y
    }

    /// Maximum u
    pub fn u_max(&self) -> f32 {
        self.uv_max.x
    }

    /// Maximum v
    pub fn v_max(&self) -> f32 {
        self.uv_max.y
    }

    /// v coordinate of the glyph's top edge
    pub fn top_v(&self) -> f32 {
        match self.origin {
            TextureOrigin::TopLeft => self.uv_min.y,
            TextureOrigin::BottomLeft => self.uv_max.y,
        }
    }

    /// v coordinate of the glyph's bottom edge
    pub fn bottom_v(&self) -> f32 {
        match self.origin {
            TextureOrigin::TopLeft => self.uv_max.y,
            TextureOrigin::BottomLeft => self.uv_min.y,
        }
    }
}

/// Compute the texture rectangle of `code` in the font sheet
///
/// Cells are numbered row-major from `first_code`. Edges are computed in
/// whole pixels and divided once, so a cell touching the image border maps
/// to exactly 0.0 or 1.0.
///
/// # Errors
///
/// Returns [`FontError::OutOfRangeGlyph`] if `code` is below `first_code`
/// or past the last cell.
pub fn glyph_rect(sheet: &FontSheetDescriptor, code: u32) -> FontResult<GlyphRect> {
    if !sheet.contains(code) {
        return Err(FontError::OutOfRangeGlyph {
            code,
            first: sheet.first_code(),
            count: sheet.glyph_count(),
        });
    }

    let index = code - sheet.first_code();
    let col = index % sheet.columns();
    let row = index / sheet.columns();

    let cell_left = col * sheet.cell_width();
    let cell_top = row * sheet.cell_height();
    let margin = sheet.margin();

    let left = cell_left + margin;
    let right = cell_left + sheet.glyph_width() - margin;
    let top = cell_top + margin;
    let bottom = cell_top + sheet.cell_height() - margin;

    let width = sheet.image_width() as f32;
    let height = sheet.image_height() as f32;

    let (v_min, v_max) = match sheet.texture_origin() {
        TextureOrigin::TopLeft => (top as f32 / height, bottom as f32 / height),
        TextureOrigin::BottomLeft => {
            let image_height = sheet.image_height();
            (
                (image_height - bottom) as f32 / height,
                (image_height - top) as f32 / height,
            )
        }
    };

    Ok(GlyphRect {
        uv_min: Vector2::new(left as f32 / width, v_min),
        uv_max: Vector2::new(right as f32 / width, v_max),
        row,
        col,
        origin: sheet.texture_origin(),
    })
}
