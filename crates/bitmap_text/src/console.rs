//! Scrolling line console
//!
//! Keeps as many lines of text as fit in the screen height and drops the
//! oldest when a new one arrives, like a terminal that scrolls upward.

use std::collections::VecDeque;

use crate::layout::VerticalAxis;
use crate::render::{Text2D, TextBackend, TextError};

/// Fixed-height buffer of lines drawn top-down
#[derive(Debug, Clone)]
pub struct LineConsole {
    lines: VecDeque<String>,
    capacity: usize,
    line_height: f32,
}

impl LineConsole {
    /// Console for a screen of `screen_height` pixels and lines `line_height` apart
    pub fn new(screen_height: u32, line_height: f32) -> Self {
        let capacity = capacity_for(screen_height, line_height);
        Self {
            lines: VecDeque::new(),
            capacity,
            line_height,
        }
    }

    /// Console sized to the screen and line height of `text`
    pub fn fitting(text: &Text2D) -> Self {
        Self::new(text.screen().height(), text.line_height())
    }

    /// Append a line, scrolling off the oldest lines when full
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        self.trim();
    }

    /// Remove every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Recompute capacity for a new screen height, dropping the oldest lines that no longer fit
    pub fn resize(&mut self, screen_height: u32) {
        self.capacity = capacity_for(screen_height, self.line_height);
        self.trim();
        log::debug!("Console resized to {} lines", self.capacity);
    }

    /// Maximum number of lines kept
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of lines held
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the console is empty
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines from oldest (top) to newest (bottom)
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Print every line, oldest at the top, and return the number of draw calls issued
    ///
    /// The first line sits one line height plus `top_margin` below the top
    /// edge of the screen; lines are `text.line_height()` apart.
    ///
    /// # Errors
    ///
    /// Stops at the first line that fails to print.
    pub fn draw<B: TextBackend + ?Sized>(
        &self,
        text: &mut Text2D,
        backend: &mut B,
        left: f32,
        top_margin: f32,
    ) -> Result<usize, TextError> {
        let screen_height = text.screen().height() as f32;
        let font_size = text.style().font_size;
        let step = text.line_height();

        let mut draws = 0;
        for (i, line) in self.lines.iter().enumerate() {
            let offset = top_margin + i as f32 * step;
            let y = match text.vertical_axis() {
                VerticalAxis::Down => offset,
                VerticalAxis::Up => screen_height - font_size - offset,
            };
            if text.print_text(backend, line, left, y)? {
                draws += 1;
            }
        }
        Ok(draws)
    }

    fn trim(&mut self) {
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn capacity_for(screen_height: u32, line_height: f32) -> usize {
    if line_height <= 0.0 || !line_height.is_finite() {
        return 1;
    }
    ((screen_height as f32 / line_height).floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontSheetDescriptor, FontSheetImage};
    use crate::render::{FontTexture, RecordingBackend};
    use crate::screen::ScreenSpace;
    use approx::assert_relative_eq;

    fn printer() -> Text2D {
        let sheet = FontSheetDescriptor::new(256, 256, 16, 16, 32).unwrap();
        let image = FontSheetImage::from_coverage(256, 256, vec![0; 256 * 256]).unwrap();
        let mut text = Text2D::new(sheet, FontTexture::new(image), ScreenSpace::new(100, 100).unwrap()).unwrap();
        text.set_font_size(10.0).unwrap();
        text
    }

    #[test]
    fn test_capacity_from_height() {
        assert_eq!(LineConsole::new(500, 16.0).capacity(), 31);
        assert_eq!(LineConsole::new(5, 16.0).capacity(), 1);
        assert_eq!(LineConsole::new(500, 0.0).capacity(), 1);
    }

    #[test]
    fn test_tiny_line_height_does_not_allocate_capacity() {
        let mut console = LineConsole::new(500, 1e-30);
        assert_eq!(console.capacity(), usize::MAX);

        console.push_line("only");
        assert_eq!(console.len(), 1);
    }

    #[test]
    fn test_rolls_oldest_line() {
        let mut console = LineConsole::new(30, 10.0);
        for i in 0..5 {
            console.push_line(format!("line {i}"));
        }

        assert_eq!(console.len(), 3);
        assert_eq!(console.lines().collect::<Vec<_>>(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_resize_trims_front() {
        let mut console = LineConsole::new(50, 10.0);
        for i in 0..5 {
            console.push_line(i.to_string());
        }

        console.resize(20);
        assert_eq!(console.capacity(), 2);
        assert_eq!(console.lines().collect::<Vec<_>>(), vec!["3", "4"]);

        console.resize(100);
        assert_eq!(console.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut console = LineConsole::new(50, 10.0);
        console.push_line("x");
        console.clear();
        assert!(console.is_empty());
    }

    #[test]
    fn test_draw_top_down() {
        let mut text = printer();
        let mut backend = RecordingBackend::default();
        let mut console = LineConsole::fitting(&text);
        assert_eq!(console.capacity(), 10);

        console.push_line("a");
        console.push_line("");
        console.push_line("b");

        let draws = console.draw(&mut text, &mut backend, 0.0, 0.0).unwrap();
        assert_eq!(draws, 2);

        // y up: first line's bottom edge at 100 - 10 = 90px, i.e. NDC 0.8
        assert_relative_eq!(backend.draws[0].vertices[0].position[1], 0.8);
        // third line is two line heights lower: 70px -> NDC 0.4
        assert_relative_eq!(backend.draws[1].vertices[0].position[1], 0.4);
    }
}
