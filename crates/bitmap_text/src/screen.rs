//! Screen pixel to normalized device coordinate conversion

use nalgebra::Vector2;

use crate::font::{FontError, FontResult};
use crate::layout::VerticalAxis;

/// Absolute pixel size of the framebuffer text is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSpace {
    width: u32,
    height: u32,
}

impl ScreenSpace {
    /// Create a screen space
    ///
    /// # Errors
    ///
    /// Returns [`FontError::InvalidScreen`] if either dimension is zero.
    pub const fn new(width: u32, height: u32) -> FontResult<Self> {
        if width == 0 || height == 0 {
            return Err(FontError::InvalidScreen { width, height });
        }
        Ok(Self { width, height })
    }

    /// Screen width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Screen height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Convert a pixel position to NDC in [-1, 1]
    ///
    /// NDC +Y always points up, so with [`VerticalAxis::Down`] pixel row 0
    /// maps to y = +1.
    pub fn to_ndc(&self, position: Vector2<f32>, axis: VerticalAxis) -> Vector2<f32> {
        let half = Vector2::new(self.width as f32 / 2.0, self.height as f32 / 2.0);
        let ndc = (position - half).component_div(&half);
        match axis {
            VerticalAxis::Up => ndc,
            VerticalAxis::Down => Vector2::new(ndc.x, -ndc.y),
        }
    }

    /// Convert a pixel size to an NDC extent
    pub fn size_to_ndc(&self, width: f32, height: f32) -> Vector2<f32> {
        Vector2::new(width / self.width as f32 * 2.0, height / self.height as f32 * 2.0)
    }
}
