//! Framebuffer and style types for terminal rendering.

use crate::types::BlockColor;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same hue at `percent` brightness
    pub const fn scaled(self, percent: u8) -> Self {
        let p = percent as u16;
        Self {
            r: ((self.r as u16 * p) / 100) as u8,
            g: ((self.g as u16 * p) / 100) as u8,
            b: ((self.b as u16 * p) / 100) as u8,
        }
    }
}

impl From<BlockColor> for Rgb {
    fn from(color: BlockColor) -> Self {
        let (r, g, b) = color.rgb();
        Rgb::new(r, g, b)
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn on(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }

    pub const fn glyph(self, ch: char) -> Glyph {
        Glyph { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::fg(Rgb::new(220, 220, 220))
    }
}

/// A single terminal character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Glyph::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Glyph::default());
    }

    pub fn cells(&self) -> &[Glyph] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = glyph;
        }
    }

    pub fn clear(&mut self, glyph: Glyph) {
        self.cells.fill(glyph);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Glyph { ch, style });
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    /// Write `s` centered within the `w` columns starting at `x`
    pub fn put_str_centered(&mut self, x: u16, y: u16, w: u16, s: &str, style: CellStyle) {
        let len = s.chars().count() as u16;
        self.put_str(x.saturating_add(w.saturating_sub(len) / 2), y, s, style);
    }

    /// Decimal digits without going through a `String`
    pub fn put_u32(&mut self, x: u16, y: u16, mut v: u32, style: CellStyle) {
        let mut digits = [0u8; 10];
        let mut n = 0;
        loop {
            digits[n] = b'0' + (v % 10) as u8;
            n += 1;
            v /= 10;
            if v == 0 {
                break;
            }
        }
        for (i, d) in digits[..n].iter().rev().enumerate() {
            self.put_char(x.saturating_add(i as u16), y, *d as char, style);
        }
    }

    /// `m:ss.t`
    pub fn put_time(&mut self, x: u16, y: u16, seconds: f32, style: CellStyle) {
        let tenths = (seconds.max(0.0) * 10.0) as u32;
        let minutes = tenths / 600;
        let secs = (tenths / 10) % 60;

        let mut cx = x;
        let digits = |v: u32| if v == 0 { 1 } else { v.ilog10() as u16 + 1 };
        self.put_u32(cx, y, minutes, style);
        cx = cx.saturating_add(digits(minutes));
        self.put_char(cx, y, ':', style);
        cx = cx.saturating_add(1);
        if secs < 10 {
            self.put_char(cx, y, '0', style);
            cx = cx.saturating_add(1);
        }
        self.put_u32(cx, y, secs, style);
        cx = cx.saturating_add(digits(secs));
        self.put_char(cx, y, '.', style);
        self.put_u32(cx.saturating_add(1), y, tenths % 10, style);
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Row `y` as a plain string (styles dropped)
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|g| g.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_clips_at_right_edge() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(1, 0, "abcdef", CellStyle::default());
        assert_eq!(fb.row_text(0), " abc");
    }

    #[test]
    fn put_u32_writes_digits() {
        let mut fb = FrameBuffer::new(8, 2);
        fb.put_u32(0, 0, 40210, CellStyle::default());
        fb.put_u32(0, 1, 0, CellStyle::default());
        assert_eq!(fb.row_text(0), "40210   ");
        assert_eq!(fb.row_text(1), "0       ");
    }

    #[test]
    fn put_time_formats_minutes_seconds_tenths() {
        let mut fb = FrameBuffer::new(8, 2);
        fb.put_time(0, 0, 65.25, CellStyle::default());
        fb.put_time(0, 1, 4.0, CellStyle::default());
        assert_eq!(fb.row_text(0), "1:05.2  ");
        assert_eq!(fb.row_text(1), "0:04.0  ");
    }

    #[test]
    fn centered_text_and_resize() {
        let mut fb = FrameBuffer::new(10, 1);
        fb.put_str_centered(0, 0, 10, "ab", CellStyle::default());
        assert_eq!(fb.row_text(0), "    ab    ");

        fb.resize(3, 2);
        assert_eq!(fb.cells().len(), 6);
    }

    #[test]
    fn block_colors_convert_to_rgb() {
        assert_eq!(Rgb::from(BlockColor::Yellow), Rgb::new(253, 249, 0));
        assert_eq!(Rgb::new(200, 100, 50).scaled(50), Rgb::new(100, 50, 25));
    }
}
