//! Host rendering seam

use crate::font::FontSheetImage;
use crate::layout::TextVertex;

/// Opaque handle to a font texture owned by the host backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Errors reported by a host backend
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Texture creation or upload failed
    #[error("Failed to upload font texture: {0}")]
    UploadFailed(String),

    /// Draw call failed
    #[error("Failed to draw text: {0}")]
    DrawFailed(String),
}

/// One text draw call: a quad mesh in NDC, textured with a font sheet
#[derive(Debug, Clone, Copy)]
pub struct TextDrawCommand<'a> {
    /// Font texture to bind
    pub texture: TextureHandle,
    /// Vertex data in NDC, 4 per glyph
    pub vertices: &'a [TextVertex],
    /// Triangle indices, 6 per glyph
    pub indices: &'a [u32],
    /// Normalized RGBA color multiplied with the sampled coverage
    pub color: [f32; 4],
}

/// Graphics binding that uploads font sheets and draws text meshes
///
/// Implemented by the host application on top of its OpenGL/Vulkan layer.
pub trait TextBackend {
    /// Upload a font sheet and return a handle to the created texture
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::UploadFailed`] if the texture cannot be created.
    fn upload_font_sheet(&mut self, sheet: &FontSheetImage) -> Result<TextureHandle, BackendError>;

    /// Draw one text mesh
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::DrawFailed`] if the draw call cannot be issued.
    fn draw_text(&mut self, command: &TextDrawCommand<'_>) -> Result<(), BackendError>;
}

/// Backend that records commands instead of drawing, for tests and headless runs
#[derive(Debug, Default)]
pub struct RecordingBackend {
    /// Sizes of uploaded sheets, in upload order
    pub uploads: Vec<(u32, u32)>,
    /// Recorded draw calls
    pub draws: Vec<RecordedDraw>,
}

/// Owned copy of a [`TextDrawCommand`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    /// Bound texture
    pub texture: TextureHandle,
    /// Vertex data in NDC
    pub vertices: Vec<TextVertex>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// Text color
    pub color: [f32; 4],
}

impl TextBackend for RecordingBackend {
    fn upload_font_sheet(&mut self, sheet: &FontSheetImage) -> Result<TextureHandle, BackendError> {
        self.uploads.push((sheet.width(), sheet.height()));
        Ok(TextureHandle(self.uploads.len() as u64))
    }

    fn draw_text(&mut self, command: &TextDrawCommand<'_>) -> Result<(), BackendError> {
        self.draws.push(RecordedDraw {
            texture: command.texture,
            vertices: command.vertices.to_vec(),
            indices: command.indices.to_vec(),
            color: command.color,
        });
        Ok(())
    }
}
