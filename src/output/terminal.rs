//! Terminal preview of a rendered frame (ASCII/Unicode/ANSI).
//!
//! Rasterized scenes are mostly background with one-pixel strokes, so plain
//! nearest-pixel downsampling drops most of the drawing. When a background
//! color is set, each character cell shows the first non-background pixel it
//! covers instead of a single sample.
//!
//! Modes:
//! - ASCII: grayscale ramp ` .:-=+*#%@`
//! - Unicode: half blocks (▀) with 24-bit color, two pixel rows per line
//! - ANSI: one colored space per cell

use std::fmt::Write as FmtWrite;

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// ASCII grayscale characters (widest compatibility)
    #[default]
    Ascii,
    /// Unicode half-block characters (2x vertical resolution)
    UnicodeHalfBlock,
    /// Colored cells with ANSI 24-bit color
    AnsiTrueColor,
}

impl std::str::FromStr for TerminalMode {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ascii" => Ok(Self::Ascii),
            "unicode" => Ok(Self::UnicodeHalfBlock),
            "ansi" => Ok(Self::AnsiTrueColor),
            other => Err(crate::error::Error::parse(format!(
                "unknown preview mode '{other}', expected ascii, unicode or ansi"
            ))),
        }
    }
}

/// Terminal encoder configuration.
#[derive(Debug, Clone, Default)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    width: Option<u32>,
    height: Option<u32>,
    invert: bool,
    background: Option<Rgba>,
}

/// Cell rectangle in framebuffer pixels, half-open.
struct Cell {
    x0: u32,
    x1: u32,
    y0: u32,
    y1: u32,
}

impl TerminalEncoder {
    /// ASCII grayscale ramp from dark to light (10 levels).
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    /// Create a new terminal encoder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Target width in characters; defaults to at most 80.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width.max(1));
        self
    }

    /// Target height in lines; derived from the width when unset.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height.max(1));
        self
    }

    /// Invert the output (light on dark vs dark on light).
    #[must_use]
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Treat `color` as empty space so thin strokes survive downsampling.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = Some(color);
        self
    }

    /// Render a framebuffer to a string.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        match self.mode {
            TerminalMode::Ascii => self.render_ascii(fb),
            TerminalMode::UnicodeHalfBlock => self.render_unicode_half_block(fb),
            TerminalMode::AnsiTrueColor => self.render_ansi_true_color(fb),
        }
    }

    fn render_ascii(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.compute_dimensions(fb, 2.0);
        let mut output = String::with_capacity((cols + 1) as usize * rows as usize);

        for row in 0..rows {
            for col in 0..cols {
                let color = self.sample(fb, &Self::cell(fb, col, row, cols, rows));
                output.push(Self::ASCII_RAMP[self.ramp_index(color)]);
            }
            output.push('\n');
        }
        output
    }

    fn render_unicode_half_block(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.compute_dimensions(fb, 1.0);
        // Round up to even height for half-blocks
        let rows = (rows + 1) & !1;
        let mut output = String::with_capacity((cols * 40 + 5) as usize * (rows / 2) as usize);

        for row in (0..rows).step_by(2) {
            for col in 0..cols {
                let top = self.tone(self.sample(fb, &Self::cell(fb, col, row, cols, rows)));
                let bottom = self.tone(self.sample(fb, &Self::cell(fb, col, row + 1, cols, rows)));
                let _ = write!(
                    output,
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                    top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                );
            }
            output.push_str("\x1b[0m\n");
        }
        output
    }

    fn render_ansi_true_color(&self, fb: &Framebuffer) -> String {
        let (cols, rows) = self.compute_dimensions(fb, 2.0);
        let mut output = String::with_capacity((cols * 20 + 5) as usize * rows as usize);

        for row in 0..rows {
            for col in 0..cols {
                let c = self.tone(self.sample(fb, &Self::cell(fb, col, row, cols, rows)));
                let _ = write!(output, "\x1b[48;2;{};{};{}m ", c.r, c.g, c.b);
            }
            output.push_str("\x1b[0m\n");
        }
        output
    }

    /// Target dimensions preserving aspect ratio; `char_aspect` is the
    /// height/width ratio of one character cell in pixels.
    fn compute_dimensions(&self, fb: &Framebuffer, char_aspect: f32) -> (u32, u32) {
        let fb_aspect = fb.width() as f32 / fb.height() as f32;
        let rows_for = |w: u32| ((w as f32 / fb_aspect / char_aspect).round() as u32).max(1);

        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, rows_for(w)),
            (None, Some(h)) => (((h as f32 * fb_aspect * char_aspect).round() as u32).max(1), h),
            (None, None) => {
                let w = 80u32.min(fb.width());
                (w, rows_for(w))
            }
        }
    }

    fn cell(fb: &Framebuffer, col: u32, row: u32, cols: u32, rows: u32) -> Cell {
        let span = |i: u32, n: u32, len: u32| {
            let start = (u64::from(i) * u64::from(len) / u64::from(n)) as u32;
            let end = (u64::from(i + 1) * u64::from(len) / u64::from(n)) as u32;
            (start.min(len - 1), end.clamp(start + 1, len))
        };
        let (x0, x1) = span(col, cols, fb.width());
        let (y0, y1) = span(row, rows, fb.height());
        Cell { x0, x1, y0, y1 }
    }

    /// Representative color of a cell.
    fn sample(&self, fb: &Framebuffer, cell: &Cell) -> Rgba {
        let first = fb.get_pixel(cell.x0, cell.y0).unwrap_or(Rgba::BLACK);
        let Some(bg) = self.background else {
            return first;
        };
        (cell.y0..cell.y1)
            .flat_map(|y| (cell.x0..cell.x1).map(move |x| (x, y)))
            .filter_map(|(x, y)| fb.get_pixel(x, y))
            .find(|&c| c != bg)
            .unwrap_or(first)
    }

    fn tone(&self, c: Rgba) -> Rgba {
        if self.invert {
            Rgba::new(255 - c.r, 255 - c.g, 255 - c.b, c.a)
        } else {
            c
        }
    }

    fn ramp_index(&self, c: Rgba) -> usize {
        let luma = self.tone(c).luminance() / 255.0;
        let last = Self::ASCII_RAMP.len() - 1;
        ((luma * last as f32).round() as usize).min(last)
    }
}
