//! Font sheet geometry
//!
//! A [`FontSheetDescriptor`] describes how glyphs are arranged in a bitmap
//! font image: a grid of `columns × rows` equally sized cells, filled in
//! row-major order starting at `first_code`. Row 0 is always the top row of
//! the image as it appears on screen; [`TextureOrigin`] only decides where
//! the texture coordinate system puts v = 0.

use serde::{Deserialize, Serialize};

use super::{glyph_rect, FontError, FontResult, GlyphRect};

/// Where v = 0 lies in the texture coordinate system of the bound texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureOrigin {
    /// v = 0 is the top image row (image rows uploaded top-down)
    #[default]
    TopLeft,
    /// v = 0 is the bottom image row (OpenGL convention for bottom-up data)
    BottomLeft,
}

/// What to do with a character that has no cell in the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingGlyph {
    /// Report [`FontError::OutOfRangeGlyph`]
    #[default]
    Fail,
    /// Draw the cell of this character code instead
    Substitute(u32),
    /// Emit no quad, but still advance the cursor
    Skip,
}

/// Immutable font sheet geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSheetDescriptor {
    image_width: u32,
    image_height: u32,
    cell_width: u32,
    cell_height: u32,
    columns: u32,
    rows: u32,
    first_code: u32,
    margin: u32,
    glyph_width: Option<u32>,
    texture_origin: TextureOrigin,
    missing_glyph: MissingGlyph,
}

impl FontSheetDescriptor {
    /// Create a descriptor with default options
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidDescriptor`] when any dimension is zero
    /// or the cell size does not evenly divide the image size.
    pub fn new(
        image_width: u32,
        image_height: u32,
        cell_width: u32,
        cell_height: u32,
        first_code: u32,
    ) -> FontResult<Self> {
        Self::builder(image_width, image_height, cell_width, cell_height)
            .first_code(first_code)
            .build()
    }

    /// Start building a descriptor from image and cell pixel sizes
    pub fn builder(
        image_width: u32,
        image_height: u32,
        cell_width: u32,
        cell_height: u32,
    ) -> FontSheetDescriptorBuilder {
        FontSheetDescriptorBuilder::new(
            image_width,
            image_height,
            CellSpec::Pixels { cell_width, cell_height },
        )
    }

    /// Start building a descriptor from image size and grid shape
    ///
    /// Cell size is derived as `image / grid`.
    pub fn grid(image_width: u32, image_height: u32, columns: u32, rows: u32) -> FontSheetDescriptorBuilder {
        FontSheetDescriptorBuilder::new(image_width, image_height, CellSpec::Grid { columns, rows })
    }

    /// Image width in pixels
    pub const fn image_width(&self) -> u32 {
        self.image_width
    }

    /// Image height in pixels
    pub const fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Cell width in pixels
    pub const fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Cell height in pixels
    pub const fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Number of glyph columns
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of glyph rows
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Character code stored in cell (0, 0)
    pub const fn first_code(&self) -> u32 {
        self.first_code
    }

    /// Pixels inset from every cell edge
    pub const fn margin(&self) -> u32 {
        self.margin
    }

    /// Ink width of each glyph from the left cell edge, in pixels
    pub fn glyph_width(&self) -> u32 {
        self.glyph_width.unwrap_or(self.cell_width)
    }

    /// Texture coordinate origin
    pub const fn texture_origin(&self) -> TextureOrigin {
        self.texture_origin
    }

    /// Policy for characters outside the sheet
    pub const fn missing_glyph(&self) -> MissingGlyph {
        self.missing_glyph
    }

    /// Total number of cells
    pub const fn glyph_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Last character code with a cell
    pub const fn last_code(&self) -> u32 {
        self.first_code + self.glyph_count() - 1
    }

    /// Whether `code` has a cell in this sheet
    pub const fn contains(&self, code: u32) -> bool {
        code >= self.first_code && code - self.first_code < self.glyph_count()
    }

    /// Copy of this descriptor with a different missing-glyph policy
    ///
    /// # Errors
    ///
    /// Fails if a substitute code has no cell itself.
    pub fn with_missing_glyph(mut self, policy: MissingGlyph) -> FontResult<Self> {
        self.missing_glyph = policy;
        self.validate()?;
        Ok(self)
    }

    /// Texture rectangle for `code`, failing when it has no cell
    ///
    /// # Errors
    ///
    /// Returns [`FontError::OutOfRangeGlyph`] for codes outside the sheet.
    pub fn glyph_rect(&self, code: u32) -> FontResult<GlyphRect> {
        glyph_rect(self, code)
    }

    /// Texture rectangle for `code` after applying the missing-glyph policy
    ///
    /// `Ok(None)` means the character should be skipped.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::OutOfRangeGlyph`] only under [`MissingGlyph::Fail`].
    pub fn resolve(&self, code: u32) -> FontResult<Option<GlyphRect>> {
        if self.contains(code) {
            return glyph_rect(self, code).map(Some);
        }

        match self.missing_glyph {
            MissingGlyph::Fail => glyph_rect(self, code).map(Some),
            MissingGlyph::Substitute(fallback) => {
                log::debug!("Substituting glyph {} for unmapped code {}", fallback, code);
                glyph_rect(self, fallback).map(Some)
            }
            MissingGlyph::Skip => Ok(None),
        }
    }

    fn validate(&self) -> FontResult<()> {
        let invalid = |msg: String| Err(FontError::InvalidDescriptor(msg));

        if self.image_width == 0 || self.image_height == 0 {
            return invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.image_width, self.image_height
            ));
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return invalid(format!(
                "cell size must be non-zero, got {}x{}",
                self.cell_width, self.cell_height
            ));
        }
        if self.image_width % self.cell_width != 0 || self.image_height % self.cell_height != 0 {
            return invalid(format!(
                "cell size {}x{} does not evenly divide image size {}x{}",
                self.cell_width, self.cell_height, self.image_width, self.image_height
            ));
        }
        if self.columns == 0 || self.rows == 0 {
            return invalid(format!("grid must be non-empty, got {}x{}", self.columns, self.rows));
        }
        let fits = self
            .columns
            .checked_mul(self.rows)
            .and_then(|count| self.first_code.checked_add(count))
            .is_some();
        if !fits {
            return invalid(format!(
                "first code {} plus a {}x{} grid overflows the code range",
                self.first_code, self.columns, self.rows
            ));
        }

        let glyph_width = self.glyph_width();
        if glyph_width == 0 || glyph_width > self.cell_width {
            return invalid(format!(
                "glyph width {} must be within 1..={}",
                glyph_width, self.cell_width
            ));
        }
        let leaves_room = |extent: u32| self.margin.checked_mul(2).is_some_and(|both| both < extent);
        if !leaves_room(glyph_width) || !leaves_room(self.cell_height) {
            return invalid(format!(
                "margin {} leaves no room inside a {}x{} glyph",
                self.margin, glyph_width, self.cell_height
            ));
        }
        if let MissingGlyph::Substitute(fallback) = self.missing_glyph {
            if !self.contains(fallback) {
                return invalid(format!(
                    "substitute glyph {} is outside codes {}..={}",
                    fallback,
                    self.first_code,
                    self.last_code()
                ));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum CellSpec {
    Pixels { cell_width: u32, cell_height: u32 },
    Grid { columns: u32, rows: u32 },
}

/// Builder for [`FontSheetDescriptor`]
#[derive(Debug, Clone)]
pub struct FontSheetDescriptorBuilder {
    image_width: u32,
    image_height: u32,
    cells: CellSpec,
    first_code: u32,
    margin: u32,
    glyph_width: Option<u32>,
    texture_origin: TextureOrigin,
    missing_glyph: MissingGlyph,
}

impl FontSheetDescriptorBuilder {
    const fn new(image_width: u32, image_height: u32, cells: CellSpec) -> Self {
        Self {
            image_width,
            image_height,
            cells,
            first_code: 32,
            margin: 0,
            glyph_width: None,
            texture_origin: TextureOrigin::TopLeft,
            missing_glyph: MissingGlyph::Fail,
        }
    }

    /// Character code of the first cell (default 32, space)
    pub const fn first_code(mut self, code: u32) -> Self {
        self.first_code = code;
        self
    }

    /// Pixels to inset from every cell edge (default 0)
    pub const fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Ink width of each glyph from the left cell edge (default: full cell)
    pub const fn glyph_width(mut self, width: u32) -> Self {
        self.glyph_width = Some(width);
        self
    }

    /// Texture coordinate origin (default [`TextureOrigin::TopLeft`])
    pub const fn texture_origin(mut self, origin: TextureOrigin) -> Self {
        self.texture_origin = origin;
        self
    }

    /// Missing-glyph policy (default [`MissingGlyph::Fail`])
    pub const fn missing_glyph(mut self, policy: MissingGlyph) -> Self {
        self.missing_glyph = policy;
        self
    }

    /// Validate and build the descriptor
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidDescriptor`] describing the first
    /// violated constraint.
    pub fn build(self) -> FontResult<FontSheetDescriptor> {
        let (cell_width, cell_height, columns, rows) = match self.cells {
            CellSpec::Pixels { cell_width, cell_height } => {
                let columns = self.image_width.checked_div(cell_width).unwrap_or(0);
                let rows = self.image_height.checked_div(cell_height).unwrap_or(0);
                (cell_width, cell_height, columns, rows)
            }
            CellSpec::Grid { columns, rows } => {
                if columns == 0 || rows == 0 {
                    return Err(FontError::InvalidDescriptor(format!(
                        "grid must be non-empty, got {columns}x{rows}"
                    )));
                }
                if self.image_width % columns != 0 || self.image_height % rows != 0 {
                    return Err(FontError::InvalidDescriptor(format!(
                        "{columns}x{rows} grid does not evenly divide image size {}x{}",
                        self.image_width, self.image_height
                    )));
                }
                (self.image_width / columns, self.image_height / rows, columns, rows)
            }
        };

        let descriptor = FontSheetDescriptor {
            image_width: self.image_width,
            image_height: self.image_height,
            cell_width,
            cell_height,
            columns,
            rows,
            first_code: self.first_code,
            margin: self.margin,
            glyph_width: self.glyph_width,
            texture_origin: self.texture_origin,
            missing_glyph: self.missing_glyph,
        };
        descriptor.validate()?;

        log::debug!(
            "Font sheet {}x{}: {}x{} cells of {}x{}px, codes {}..={}",
            descriptor.image_width,
            descriptor.image_height,
            descriptor.columns,
            descriptor.rows,
            descriptor.cell_width,
            descriptor.cell_height,
            descriptor.first_code,
            descriptor.last_code()
        );

        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii_sheet() -> FontSheetDescriptor {
        FontSheetDescriptor::new(256, 256, 16, 16, 32).unwrap()
    }

    #[test]
    fn test_grid_derived_from_cells() {
        let sheet = ascii_sheet();
        assert_eq!(sheet.columns(), 16);
        assert_eq!(sheet.rows(), 16);
        assert_eq!(sheet.glyph_count(), 256);
        assert_eq!(sheet.last_code(), 32 + 255);
    }

    #[test]
    fn test_cells_derived_from_grid() {
        let sheet = FontSheetDescriptor::grid(512, 512, 16, 16).build().unwrap();
        assert_eq!(sheet.cell_width(), 32);
        assert_eq!(sheet.cell_height(), 32);
    }

    #[test]
    fn test_rejects_uneven_cells() {
        let err = FontSheetDescriptor::new(250, 256, 16, 16, 32).unwrap_err();
        assert!(matches!(err, FontError::InvalidDescriptor(_)));

        let err = FontSheetDescriptor::grid(256, 256, 16, 3).build().unwrap_err();
        assert!(matches!(err, FontError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(FontSheetDescriptor::new(0, 256, 16, 16, 32).is_err());
        assert!(FontSheetDescriptor::new(256, 256, 0, 16, 32).is_err());
        assert!(FontSheetDescriptor::grid(256, 256, 0, 16).build().is_err());
    }

    #[test]
    fn test_rejects_oversized_margin() {
        let err = FontSheetDescriptor::builder(256, 256, 16, 16).margin(8).build().unwrap_err();
        assert!(matches!(err, FontError::InvalidDescriptor(_)));

        // Half-width glyphs leave less horizontal room for the margin
        let err = FontSheetDescriptor::builder(256, 256, 16, 16)
            .glyph_width(8)
            .margin(4)
            .build()
            .unwrap_err();
        assert!(matches!(err, FontError::InvalidDescriptor(_)));

        let err = FontSheetDescriptor::builder(256, 256, 16, 16)
            .margin(u32::MAX / 2 + 1)
            .build()
            .unwrap_err();
        assert!(matches!(err, FontError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_rejects_glyph_wider_than_cell() {
        assert!(FontSheetDescriptor::builder(256, 256, 16, 16).glyph_width(17).build().is_err());
        assert!(FontSheetDescriptor::builder(256, 256, 16, 16).glyph_width(0).build().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_substitute() {
        let err = FontSheetDescriptor::builder(256, 256, 16, 16)
            .missing_glyph(MissingGlyph::Substitute(10))
            .build()
            .unwrap_err();
        assert!(matches!(err, FontError::InvalidDescriptor(_)));

        assert!(ascii_sheet().with_missing_glyph(MissingGlyph::Substitute(1000)).is_err());
    }

    #[test]
    fn test_rejects_code_overflow() {
        let err = FontSheetDescriptor::new(256, 256, 16, 16, u32::MAX - 10).unwrap_err();
        assert!(matches!(err, FontError::InvalidDescriptor(_)));
    }

    #[test]
    fn test_contains() {
        let sheet = ascii_sheet();
        assert!(!sheet.contains(31));
        assert!(sheet.contains(32));
        assert!(sheet.contains(287));
        assert!(!sheet.contains(288));
    }

    #[test]
    fn test_resolve_policies() {
        let sheet = ascii_sheet();
        assert!(matches!(
            sheet.resolve(10),
            Err(FontError::OutOfRangeGlyph { code: 10, first: 32, count: 256 })
        ));

        let skip = sheet.with_missing_glyph(MissingGlyph::Skip).unwrap();
        assert_eq!(skip.resolve(10).unwrap(), None);
        assert!(skip.resolve(65).unwrap().is_some());

        let substitute = sheet.with_missing_glyph(MissingGlyph::Substitute(63)).unwrap();
        assert_eq!(substitute.resolve(10).unwrap(), Some(sheet.glyph_rect(63).unwrap()));
    }
}
