//! 2D text printer for a single bitmap font sheet

use super::{TextBackend, TextDrawCommand, TextError, TextStyle, TextureHandle};
use crate::config::TextConfig;
use crate::font::{FontError, FontResult, FontSheetDescriptor, FontSheetImage};
use crate::layout::{layout, text_extents, LayoutParams, TextMesh, VerticalAxis};
use crate::screen::ScreenSpace;

/// Font sheet image plus the backend texture created from it
///
/// The handle is filled in on first use and cleared whenever the sheet is
/// replaced, so the next print uploads the new image.
#[derive(Debug, Clone)]
pub struct FontTexture {
    image: FontSheetImage,
    handle: Option<TextureHandle>,
}

impl FontTexture {
    /// Wrap an image that has not been uploaded yet
    pub const fn new(image: FontSheetImage) -> Self {
        Self { image, handle: None }
    }

    /// Wrap an image the host has already uploaded
    pub const fn uploaded(image: FontSheetImage, handle: TextureHandle) -> Self {
        Self { image, handle: Some(handle) }
    }

    /// Source image
    pub const fn image(&self) -> &FontSheetImage {
        &self.image
    }

    /// Backend handle, if uploaded
    pub const fn handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    fn ensure_uploaded<B: TextBackend + ?Sized>(&mut self, backend: &mut B) -> Result<TextureHandle, TextError> {
        if let Some(handle) = self.handle {
            return Ok(handle);
        }
        let handle = backend.upload_font_sheet(&self.image)?;
        log::info!(
            "Font sheet {}x{} uploaded as {:?}",
            self.image.width(),
            self.image.height(),
            handle
        );
        self.handle = Some(handle);
        Ok(handle)
    }
}

/// Prints strings with one bitmap font sheet
///
/// Positions passed to [`Text2D::print_text`] are absolute pixels of the
/// first glyph's placement corner (see [`crate::layout`] for the coordinate
/// system), converted to NDC using the current screen size.
#[derive(Debug, Clone)]
pub struct Text2D {
    sheet: FontSheetDescriptor,
    texture: FontTexture,
    style: TextStyle,
    spacing: f32,
    line_spacing: f32,
    screen: ScreenSpace,
    axis: VerticalAxis,
}

impl Text2D {
    /// Create a printer for `sheet`, drawn from `texture`
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidDescriptor`] if the descriptor does not
    /// describe an image of the texture's size.
    pub fn new(sheet: FontSheetDescriptor, texture: FontTexture, screen: ScreenSpace) -> FontResult<Self> {
        check_sheet_matches(&sheet, texture.image())?;
        Ok(Self {
            sheet,
            texture,
            style: TextStyle::default(),
            spacing: 0.0,
            line_spacing: 0.0,
            screen,
            axis: VerticalAxis::Up,
        })
    }

    /// Load the configured font sheet and apply the configured style
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid, has no font sheet path, or the
    /// sheet cannot be loaded or does not fit the configured cell size.
    pub fn from_config(config: &TextConfig) -> Result<Self, TextError> {
        config.validate()?;
        let path = config.font_sheet_path.as_ref().ok_or(TextError::MissingFontSheet)?;
        let image = FontSheetImage::from_file(path)?;
        Self::from_config_with_image(config, image)
    }

    /// Apply a configuration to an already loaded font sheet
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or does not fit the image.
    pub fn from_config_with_image(config: &TextConfig, image: FontSheetImage) -> Result<Self, TextError> {
        config.validate()?;
        let sheet = config.descriptor_for(image.width(), image.height())?;
        let screen = ScreenSpace::new(config.screen_width, config.screen_height)?;

        let mut text = Self::new(sheet, FontTexture::new(image), screen)?;
        text.style = config.style();
        text.spacing = config.spacing;
        text.line_spacing = config.line_spacing;
        text.axis = config.vertical_axis;
        Ok(text)
    }

    /// Replace the font sheet; the new image is uploaded on the next print
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidDescriptor`] if `sheet` does not match
    /// the image size. The current sheet is kept in that case.
    pub fn set_font_sheet(&mut self, sheet: FontSheetDescriptor, image: FontSheetImage) -> FontResult<()> {
        check_sheet_matches(&sheet, &image)?;
        self.sheet = sheet;
        self.texture = FontTexture::new(image);
        Ok(())
    }

    /// Set text color (normalized RGBA)
    pub fn set_color(&mut self, color: [f32; 4]) {
        self.style.color = color;
    }

    /// Set glyph height in pixels
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidStyle`] unless `size` is positive and
    /// finite. The current size is kept in that case.
    pub fn set_font_size(&mut self, size: f32) -> Result<(), TextError> {
        if size <= 0.0 || !size.is_finite() {
            return Err(TextError::InvalidStyle(format!("font size must be positive, got {size}")));
        }
        self.style.font_size = size;
        Ok(())
    }

    /// Set extra horizontal pixels between glyphs; negative values tighten the text
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidStyle`] for a non-finite value.
    pub fn set_spacing(&mut self, spacing: f32) -> Result<(), TextError> {
        if !spacing.is_finite() {
            return Err(TextError::InvalidStyle(format!("spacing must be finite, got {spacing}")));
        }
        self.spacing = spacing;
        Ok(())
    }

    /// Set extra vertical pixels between lines
    ///
    /// # Errors
    ///
    /// Returns [`TextError::InvalidStyle`] for a non-finite value.
    pub fn set_line_spacing(&mut self, line_spacing: f32) -> Result<(), TextError> {
        if !line_spacing.is_finite() {
            return Err(TextError::InvalidStyle(format!(
                "line spacing must be finite, got {line_spacing}"
            )));
        }
        self.line_spacing = line_spacing;
        Ok(())
    }

    /// Set the direction of pixel +Y
    pub fn set_vertical_axis(&mut self, axis: VerticalAxis) {
        self.axis = axis;
    }

    /// Update the framebuffer size used for NDC conversion
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidScreen`] for a zero dimension.
    pub fn update_screen_size(&mut self, width: u32, height: u32) -> FontResult<()> {
        self.screen = ScreenSpace::new(width, height)?;
        log::debug!("Text screen size set to {}x{}", width, height);
        Ok(())
    }

    /// Current style
    pub const fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Font sheet geometry
    pub const fn sheet(&self) -> &FontSheetDescriptor {
        &self.sheet
    }

    /// Font texture
    pub const fn texture(&self) -> &FontTexture {
        &self.texture
    }

    /// Current screen size
    pub const fn screen(&self) -> &ScreenSpace {
        &self.screen
    }

    /// Direction of pixel +Y
    pub const fn vertical_axis(&self) -> VerticalAxis {
        self.axis
    }

    /// Vertical distance between consecutive lines in pixels
    pub fn line_height(&self) -> f32 {
        self.style.font_size + self.line_spacing
    }

    /// Layout parameters for text placed at `(x, y)`
    pub fn layout_params(&self, x: f32, y: f32) -> LayoutParams {
        self.style_params().at(x, y)
    }

    /// Pixel size of `text` with the current style
    pub fn text_extents(&self, text: &str) -> (f32, f32) {
        text_extents(text, &self.style_params())
    }

    fn style_params(&self) -> LayoutParams {
        LayoutParams::new(0.0, 0.0, self.style.glyph_width(), self.style.font_size)
            .with_spacing(self.spacing)
            .with_line_spacing(self.line_spacing)
            .with_vertical_axis(self.axis)
    }

    /// NDC mesh for `text` placed at `(x, y)`
    ///
    /// # Errors
    ///
    /// Fails if a character is unmapped under the `Fail` policy.
    pub fn build_mesh(&self, text: &str, x: f32, y: f32) -> FontResult<TextMesh> {
        let params = self.layout_params(x, y);
        let mut mesh = TextMesh::from_layout(&layout(&self.sheet, text, &params))?;
        mesh.to_ndc(&self.screen);
        Ok(mesh)
    }

    /// Print `text` at `(x, y)` with one draw call
    ///
    /// Returns `false` without touching the backend when nothing would be
    /// drawn.
    ///
    /// # Errors
    ///
    /// Fails on unmapped characters under the `Fail` policy, or when the
    /// backend cannot upload the sheet or draw.
    pub fn print_text<B: TextBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        text: &str,
        x: f32,
        y: f32,
    ) -> Result<bool, TextError> {
        let mesh = self.build_mesh(text, x, y)?;
        if mesh.is_empty() {
            return Ok(false);
        }

        let texture = self.texture.ensure_uploaded(backend)?;
        log::trace!("Drawing {} glyphs at ({}, {})", mesh.quad_count(), x, y);

        backend.draw_text(&TextDrawCommand {
            texture,
            vertices: &mesh.vertices,
            indices: &mesh.indices,
            color: self.style.color,
        })?;
        Ok(true)
    }
}

fn check_sheet_matches(sheet: &FontSheetDescriptor, image: &FontSheetImage) -> FontResult<()> {
    if sheet.image_width() != image.width() || sheet.image_height() != image.height() {
        return Err(FontError::InvalidDescriptor(format!(
            "descriptor is for a {}x{} image but the font sheet is {}x{}",
            sheet.image_width(),
            sheet.image_height(),
            image.width(),
            image.height()
        )));
    }
    Ok(())
}
