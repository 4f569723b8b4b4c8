//! Scrolling terminal demo
//!
//! Prints a line of random numbers every frame into a [`LineConsole`] and
//! draws the console through a headless backend that logs each draw call.
//! Halfway through, the screen is resized to show the console trimming.
//!
//! Usage: `text2d_demo [config.toml|config.ron]`

use bitmap_text::config::{Config, ConfigError, TextConfig};
use bitmap_text::font::FontSheetImage;
use bitmap_text::foundation::logging;
use bitmap_text::prelude::{LineConsole, Text2D, TextBackend, TextDrawCommand, TextError};
use bitmap_text::render::{BackendError, TextureHandle};
use rand::prelude::*;

const FRAMES: usize = 60;
const LEFT_MARGIN: f32 = 10.0;
const TOP_MARGIN: f32 = 2.0;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("text: {0}")]
    Text(#[from] TextError),
}

/// Backend that only logs what it would draw
#[derive(Default)]
struct LogBackend {
    next_handle: u64,
    draw_calls: usize,
    glyphs: usize,
}

impl TextBackend for LogBackend {
    fn upload_font_sheet(&mut self, sheet: &FontSheetImage) -> Result<TextureHandle, BackendError> {
        self.next_handle += 1;
        log::info!(
            "Uploading {}x{} font sheet as texture {}",
            sheet.width(),
            sheet.height(),
            self.next_handle
        );
        Ok(TextureHandle(self.next_handle))
    }

    fn draw_text(&mut self, command: &TextDrawCommand<'_>) -> Result<(), BackendError> {
        if command.indices.len() % 6 != 0 {
            return Err(BackendError::DrawFailed(format!(
                "index count {} is not a whole number of quads",
                command.indices.len()
            )));
        }
        self.draw_calls += 1;
        self.glyphs += command.indices.len() / 6;
        log::trace!(
            "draw {:?}: {} vertices, color {:?}",
            command.texture,
            command.vertices.len(),
            command.color
        );
        Ok(())
    }
}

fn load_config() -> Result<TextConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => TextConfig::load_from_file(&path),
        None => Ok(TextConfig {
            color: [0.2, 0.2, 0.2, 1.0],
            glyph_width: Some(16),
            ..TextConfig::default()
        }),
    }
}

fn create_printer(config: &TextConfig) -> Result<Text2D, TextError> {
    if config.font_sheet_path.is_some() {
        return Text2D::from_config(config);
    }

    log::warn!("No font_sheet_path configured, using a blank 512x512 sheet");
    let blank = FontSheetImage::from_coverage(512, 512, vec![0; 512 * 512])?;
    Text2D::from_config_with_image(config, blank)
}

fn random_line(rng: &mut impl Rng) -> String {
    let a: f64 = rng.gen_range(-1.0..1.0);
    let b: f64 = rng.gen_range(-10.0..10.0);
    let c: f64 = rng.gen_range(-5.0..5.0);
    let d: f64 = rng.gen_range(-20.0..20.0);
    format!("a: {a} - b: {b} c: {c} d: {d}")
}

fn run() -> Result<(), DemoError> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);

    let mut text = create_printer(&config)?;
    let mut console = LineConsole::fitting(&text);
    let mut backend = LogBackend::default();
    let mut rng = thread_rng();

    log::info!(
        "Console holds {} lines of {}px text on a {}x{} screen",
        console.capacity(),
        text.style().font_size,
        text.screen().width(),
        text.screen().height()
    );

    for frame in 0..FRAMES {
        if frame == FRAMES / 2 {
            let width = text.screen().width();
            let height = text.screen().height() / 2;
            text.update_screen_size(width, height).map_err(TextError::from)?;
            console.resize(height);
            log::info!("Resized to {}x{}, console now holds {} lines", width, height, console.capacity());
        }

        console.push_line(random_line(&mut rng));
        let draws = console.draw(&mut text, &mut backend, LEFT_MARGIN, TOP_MARGIN)?;
        log::debug!("frame {frame}: {draws} lines drawn");
    }

    let (width, height) = text.text_extents(console.lines().last().unwrap_or_default());
    log::info!(
        "Done: {} draw calls, {} glyphs, last line {}x{}px",
        backend.draw_calls,
        backend.glyphs,
        width,
        height
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("text2d_demo failed: {e}");
        eprintln!("text2d_demo failed: {e}");
        std::process::exit(1);
    }
}
