//! Text layout engine
//!
//! Lays out a string as one quad per glyph on a fixed-pitch grid. The cursor
//! starts at the layout origin, advances by `glyph_width + spacing` per
//! character, and a line separator returns it to `origin_x` one line height
//! further along the vertical axis.
//!
//! # Layout Coordinate System
//!
//! Positions are screen pixels. A quad's `(min_x, min_y)` is the cursor
//! position at which it was placed, and it extends `glyph_width` along +X
//! and `glyph_height` along +Y. With [`VerticalAxis::Down`] that corner is
//! the visual top-left and lines move toward +Y; with [`VerticalAxis::Up`]
//! it is the visual bottom-left and lines move toward -Y.

use std::iter::FusedIterator;
use std::str::Chars;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::font::{FontResult, FontSheetDescriptor, GlyphRect};

/// Direction of screen-space +Y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAxis {
    /// +Y points down the screen (window coordinates)
    #[default]
    Down,
    /// +Y points up the screen (OpenGL pixel coordinates, origin bottom-left)
    Up,
}

/// Parameters for laying out a string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Cursor start position in pixels
    pub origin: Vector2<f32>,
    /// Quad width per glyph in pixels
    pub glyph_width: f32,
    /// Quad height per glyph in pixels
    pub glyph_height: f32,
    /// Extra horizontal space between glyphs
    pub spacing: f32,
    /// Extra vertical space between lines
    pub line_spacing: f32,
    /// Character that starts a new line
    pub line_separator: char,
    /// Direction of screen-space +Y
    pub vertical_axis: VerticalAxis,
}

impl LayoutParams {
    /// Layout at `(origin_x, origin_y)` with no extra spacing
    pub fn new(origin_x: f32, origin_y: f32, glyph_width: f32, glyph_height: f32) -> Self {
        Self {
            origin: Vector2::new(origin_x, origin_y),
            glyph_width,
            glyph_height,
            spacing: 0.0,
            line_spacing: 0.0,
            line_separator: '\n',
            vertical_axis: VerticalAxis::Down,
        }
    }

    /// Set horizontal glyph spacing
    pub const fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set extra line spacing
    pub const fn with_line_spacing(mut self, line_spacing: f32) -> Self {
        self.line_spacing = line_spacing;
        self
    }

    /// Set the line separator character
    pub const fn with_line_separator(mut self, separator: char) -> Self {
        self.line_separator = separator;
        self
    }

    /// Set the vertical axis direction
    pub const fn with_vertical_axis(mut self, axis: VerticalAxis) -> Self {
        self.vertical_axis = axis;
        self
    }

    /// Move the origin, keeping everything else
    pub fn at(mut self, origin_x: f32, origin_y: f32) -> Self {
        self.origin = Vector2::new(origin_x, origin_y);
        self
    }

    /// Horizontal cursor advance per character
    pub fn advance(&self) -> f32 {
        self.glyph_width + self.spacing
    }

    /// Vertical cursor advance per line
    pub fn line_height(&self) -> f32 {
        self.glyph_height + self.line_spacing
    }
}

/// Screen-space bounds of a quad or a group of quads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadBounds {
    /// Minimum X coordinate
    pub min_x: f32,
    /// Minimum Y coordinate
    pub min_y: f32,
    /// Maximum X coordinate
    pub max_x: f32,
    /// Maximum Y coordinate
    pub max_y: f32,
}

impl QuadBounds {
    /// Calculate width of bounding box
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Calculate height of bounding box
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Smallest bounds containing both
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// One positioned glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// Character this quad draws
    pub ch: char,
    /// Screen-space quad bounds
    pub bounds: QuadBounds,
    /// Texture rectangle in the font sheet
    pub uv: GlyphRect,
}

/// Lazily evaluated layout of a string
///
/// Iterating is restartable: every call to [`TextLayout::iter`] starts from
/// the first character again and yields the same sequence.
#[derive(Debug, Clone, Copy)]
pub struct TextLayout<'a> {
    sheet: &'a FontSheetDescriptor,
    text: &'a str,
    params: LayoutParams,
}

/// Lay out `text` against `sheet`
pub fn layout<'a>(sheet: &'a FontSheetDescriptor, text: &'a str, params: &LayoutParams) -> TextLayout<'a> {
    TextLayout { sheet, text, params: *params }
}

impl<'a> TextLayout<'a> {
    /// Iterate over the glyph quads
    ///
    /// Characters outside the sheet follow the sheet's missing-glyph policy;
    /// under `Fail` they produce an `Err` item and iteration continues.
    pub fn iter(&self) -> Glyphs<'a> {
        Glyphs {
            sheet: self.sheet,
            chars: self.text.chars(),
            params: self.params,
            cursor: self.params.origin,
        }
    }

    /// Collect all quads, failing on the first unmapped character
    ///
    /// # Errors
    ///
    /// Returns [`crate::font::FontError::OutOfRangeGlyph`] if the sheet's
    /// policy is `Fail` and a character has no cell.
    pub fn quads(&self) -> FontResult<Vec<GlyphQuad>> {
        self.iter().collect()
    }

    /// Union of all quad bounds, `None` when nothing is drawn
    ///
    /// # Errors
    ///
    /// Same as [`TextLayout::quads`].
    pub fn bounds(&self) -> FontResult<Option<QuadBounds>> {
        let mut bounds: Option<QuadBounds> = None;
        for quad in self.iter() {
            let quad = quad?;
            bounds = Some(bounds.map_or(quad.bounds, |b| b.union(&quad.bounds)));
        }
        Ok(bounds)
    }

    /// Font sheet used for glyph lookup
    pub const fn sheet(&self) -> &'a FontSheetDescriptor {
        self.sheet
    }

    /// Text being laid out
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Layout parameters
    pub const fn params(&self) -> &LayoutParams {
        &self.params
    }
}

impl<'a> IntoIterator for &TextLayout<'a> {
    type Item = FontResult<GlyphQuad>;
    type IntoIter = Glyphs<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the quads of a [`TextLayout`]
#[derive(Debug, Clone)]
pub struct Glyphs<'a> {
    sheet: &'a FontSheetDescriptor,
    chars: Chars<'a>,
    params: LayoutParams,
    cursor: Vector2<f32>,
}

impl Iterator for Glyphs<'_> {
    type Item = FontResult<GlyphQuad>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ch = self.chars.next()?;

            if ch == self.params.line_separator {
                self.cursor.x = self.params.origin.x;
                match self.params.vertical_axis {
                    VerticalAxis::Down => self.cursor.y += self.params.line_height(),
                    VerticalAxis::Up => self.cursor.y -= self.params.line_height(),
                }
                continue;
            }

            let position = self.cursor;
            self.cursor.x += self.params.advance();

            match self.sheet.resolve(u32::from(ch)) {
                Ok(Some(uv)) => {
                    let bounds = QuadBounds {
                        min_x: position.x,
                        min_y: position.y,
                        max_x: position.x + self.params.glyph_width,
                        max_y: position.y + self.params.glyph_height,
                    };
                    return Some(Ok(GlyphQuad { ch, bounds, uv }));
                }
                // Skipped glyphs still take up their cell
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.chars.size_hint().1)
    }
}

impl FusedIterator for Glyphs<'_> {}

/// Pixel size of `text` when laid out with `params`
///
/// Width is the longest line's character count times the advance, so it
/// includes the spacing after the last glyph. Height counts every line,
/// including a trailing empty one.
pub fn text_extents(text: &str, params: &LayoutParams) -> (f32, f32) {
    if text.is_empty() {
        return (0.0, 0.0);
    }

    let mut lines = 0usize;
    let mut longest = 0usize;
    for line in text.split(params.line_separator) {
        lines += 1;
        longest = longest.max(line.chars().count());
    }

    let width = longest as f32 * params.advance();
    let height = lines as f32 * params.glyph_height + (lines - 1) as f32 * params.line_spacing;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontError, MissingGlyph};
    use approx::assert_relative_eq;

    fn ascii_sheet() -> FontSheetDescriptor {
        FontSheetDescriptor::new(256, 256, 16, 16, 32).unwrap()
    }

    #[test]
    fn test_one_quad_per_char() {
        let sheet = ascii_sheet();
        let params = LayoutParams::new(10.0, 20.0, 8.0, 16.0).with_spacing(2.0);
        let quads = layout(&sheet, "Hello", &params).quads().unwrap();

        assert_eq!(quads.len(), 5);
        for pair in quads.windows(2) {
            assert_relative_eq!(pair[1].bounds.min_x, pair[0].bounds.min_x + 10.0);
            assert_eq!(pair[1].bounds.min_y, pair[0].bounds.min_y);
        }
        assert_eq!(quads[0].bounds.min_x, 10.0);
        assert_eq!(quads[0].bounds.width(), 8.0);
        assert_eq!(quads[0].bounds.height(), 16.0);
        assert_eq!(quads[1].uv, sheet.glyph_rect(u32::from('e')).unwrap());
    }

    #[test]
    fn test_line_break_resets_cursor() {
        let sheet = ascii_sheet();
        let params = LayoutParams::new(5.0, 7.0, 8.0, 16.0).with_spacing(1.0);
        let quads = layout(&sheet, "AB\nC", &params).quads().unwrap();

        assert_eq!(quads.len(), 3);
        let c = quads[2];
        assert_eq!(c.ch, 'C');
        assert_eq!(c.bounds.min_x, 5.0);
        assert_eq!(c.bounds.min_y, 7.0 + 16.0);
    }

    #[test]
    fn test_line_break_upward_axis() {
        let sheet = ascii_sheet();
        let params = LayoutParams::new(0.0, 100.0, 8.0, 16.0)
            .with_line_spacing(1.0)
            .with_vertical_axis(VerticalAxis::Up);
        let quads = layout(&sheet, "A\nB", &params).quads().unwrap();

        assert_eq!(quads[1].bounds.min_y, 100.0 - 17.0);
    }

    #[test]
    fn test_custom_line_separator() {
        let sheet = ascii_sheet();
        let params = LayoutParams::new(0.0, 0.0, 8.0, 16.0).with_line_separator('|');
        let quads = layout(&sheet, "A|B", &params).quads().unwrap();

        assert_eq!(quads.len(), 2);
        assert_eq!(quads[1].bounds.min_x, 0.0);
        assert_eq!(quads[1].bounds.min_y, 16.0);
    }

    #[test]
    fn test_layout_is_restartable() {
        let sheet = ascii_sheet();
        let params = LayoutParams::new(0.0, 0.0, 8.0, 16.0);
        let text_layout = layout(&sheet, "abc\ndef", &params);

        let first: Vec<_> = text_layout.iter().collect();
        let second: Vec<_> = (&text_layout).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_fail_policy_reports_each_unmapped_char() {
        let sheet = ascii_sheet();
        let params = LayoutParams::new(0.0, 0.0, 8.0, 16.0);
        let text_layout = layout(&sheet, "a\tb", &params);

        let items: Vec<_> = text_layout.iter().collect();
        assert_eq!(items.len(), 3);
        assert!(matches!(items[1], Err(FontError::OutOfRangeGlyph { code: 9, .. })));
        assert_eq!(items[2].as_ref().unwrap().bounds.min_x, 16.0);

        assert!(text_layout.quads().is_err());
    }

    #[test]
    fn test_skip_policy_keeps_advancing() {
        let sheet = ascii_sheet().with_missing_glyph(MissingGlyph::Skip).unwrap();
        let params = LayoutParams::new(0.0, 0.0, 8.0, 16.0);
        let quads = layout(&sheet, "a\tb", &params).quads().unwrap();

        assert_eq!(quads.len(), 2);
        assert_eq!(quads[1].ch, 'b');
        assert_eq!(quads[1].bounds.min_x, 16.0);
    }

    #[test]
    fn test_substitute_policy() {
        let sheet = ascii_sheet().with_missing_glyph(MissingGlyph::Substitute(u32::from('?'))).unwrap();
        let params = LayoutParams::new(0.0, 0.0, 8.0, 16.0);
        let quads = layout(&sheet, "\u{2603}", &params).quads().unwrap();

        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].ch, '\u{2603}');
        assert_eq!(quads[0].uv, sheet.glyph_rect(u32::from('?')).unwrap());
    }

    #[test]
    fn test_empty_text() {
        let sheet = ascii_sheet();
        let params = LayoutParams::new(0.0, 0.0, 8.0, 16.0);
        let text_layout = layout(&sheet, "", &params);

        assert!(text_layout.quads().unwrap().is_empty());
        assert_eq!(text_layout.bounds().unwrap(), None);
        assert_eq!(text_extents("", &params), (0.0, 0.0));
    }

    #[test]
    fn test_layout_bounds() {
        let sheet = ascii_sheet();
        let params = LayoutParams::new(2.0, 4.0, 8.0, 16.0);
        let bounds = layout(&sheet, "abc\nd", &params).bounds().unwrap().unwrap();

        assert_eq!(bounds.min_x, 2.0);
        assert_eq!(bounds.min_y, 4.0);
        assert_eq!(bounds.width(), 24.0);
        assert_eq!(bounds.height(), 32.0);
    }

    #[test]
    fn test_text_extents() {
        let params = LayoutParams::new(0.0, 0.0, 6.0, 12.0).with_spacing(1.0).with_line_spacing(2.0);

        assert_eq!(text_extents("abcd", &params), (28.0, 12.0));
        assert_eq!(text_extents("ab\nabcde\n", &params), (35.0, 3.0 * 12.0 + 2.0 * 2.0));
    }
}
