//! Quad mesh generation for laid out text

use bytemuck::{Pod, Zeroable};
use nalgebra::Vector2;

use super::{GlyphQuad, TextLayout, VerticalAxis};
use crate::font::FontResult;
use crate::screen::ScreenSpace;

/// Vertex data for text rendering
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TextVertex {
    /// Position in pixels, or NDC after [`TextMesh::to_ndc`]
    pub position: [f32; 2],
    /// Texture coordinates in the font sheet
    pub uv: [f32; 2],
}

/// Indexed quad geometry for a run of text
///
/// Each glyph generates 4 vertices (bottom-left, top-left, top-right,
/// bottom-right) and 6 indices (2 triangles).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMesh {
    /// Vertex data, 4 per glyph
    pub vertices: Vec<TextVertex>,
    /// Triangle indices, 6 per glyph
    pub indices: Vec<u32>,
    axis: VerticalAxis,
}

impl TextMesh {
    /// Build the mesh for every quad of a layout
    ///
    /// # Errors
    ///
    /// Fails if the layout yields an unmapped glyph under the `Fail` policy.
    pub fn from_layout(text_layout: &TextLayout<'_>) -> FontResult<Self> {
        let axis = text_layout.params().vertical_axis;
        let mut mesh = Self::with_axis(axis);
        for quad in text_layout {
            mesh.push_quad(&quad?);
        }

        log::trace!("Text mesh: {} glyphs for {:?}", mesh.quad_count(), text_layout.text());

        Ok(mesh)
    }

    /// Build the mesh for already collected quads
    pub fn from_quads(quads: &[GlyphQuad], axis: VerticalAxis) -> Self {
        let mut mesh = Self::with_axis(axis);
        for quad in quads {
            mesh.push_quad(quad);
        }
        mesh
    }

    fn with_axis(axis: VerticalAxis) -> Self {
        Self { vertices: Vec::new(), indices: Vec::new(), axis }
    }

    /// Append one glyph quad
    pub fn push_quad(&mut self, quad: &GlyphQuad) {
        let b = &quad.bounds;
        let (top_y, bottom_y) = match self.axis {
            VerticalAxis::Down => (b.min_y, b.max_y),
            VerticalAxis::Up => (b.max_y, b.min_y),
        };
        let (u_min, u_max) = (quad.uv.u_min(), quad.uv.u_max());
        let (top_v, bottom_v) = (quad.uv.top_v(), quad.uv.bottom_v());

        #[allow(clippy::cast_possible_truncation)]
        let base_index = self.vertices.len() as u32;

        self.vertices.extend_from_slice(&[
            // Bottom-left
            TextVertex { position: [b.min_x, bottom_y], uv: [u_min, bottom_v] },
            // Top-left
            TextVertex { position: [b.min_x, top_y], uv: [u_min, top_v] },
            // Top-right
            TextVertex { position: [b.max_x, top_y], uv: [u_max, top_v] },
            // Bottom-right
            TextVertex { position: [b.max_x, bottom_y], uv: [u_max, bottom_v] },
        ]);
        self.indices.extend_from_slice(&[
            base_index, base_index + 2, base_index + 1,
            base_index, base_index + 3, base_index + 2,
        ]);
    }

    /// Number of glyph quads
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Whether the mesh has no quads
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertical axis the pixel positions were laid out with
    pub const fn axis(&self) -> VerticalAxis {
        self.axis
    }

    /// Convert pixel positions to NDC in place
    pub fn to_ndc(&mut self, screen: &ScreenSpace) {
        for vertex in &mut self.vertices {
            let ndc = screen.to_ndc(Vector2::new(vertex.position[0], vertex.position[1]), self.axis);
            vertex.position = [ndc.x, ndc.y];
        }
    }

    /// Expand to a non-indexed triangle list, 6 vertices per glyph
    pub fn triangle_list(&self) -> Vec<TextVertex> {
        self.indices
            .iter()
            .filter_map(|&index| self.vertices.get(index as usize).copied())
            .collect()
    }

    /// Raw vertex bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
