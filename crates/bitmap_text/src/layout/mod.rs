//! Text layout
//!
//! Converts strings into positioned glyph quads and quad meshes.

pub mod mesh;
pub mod text_layout;

pub use mesh::*;
pub use text_layout::*;
