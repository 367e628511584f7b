pub mod font;
pub mod scene;
pub mod screens;

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};
use std::io::{self, Write};

use crate::config::{SCREEN_H, SCREEN_W};
use font::Font;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    pub const fn dim(self, t_256: u16) -> Rgb {
        Rgb::lerp(BLACK, self, t_256)
    }
}

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![BLACK; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, BLACK);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Mixes `c` over the pixel at `alpha_256` opacity.
    pub fn blend(&mut self, x: i32, y: i32, c: Rgb, alpha_256: u16) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            let under = self.get(x as usize, y as usize);
            self.set(x, y, Rgb::lerp(under, c, alpha_256));
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Halves every pixel, for overlays drawn on a frozen frame.
    pub fn darken(&mut self) {
        for p in &mut self.px {
            *p = Rgb(p.0 / 2, p.1 / 2, p.2 / 2);
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = BLACK;
        let mut prev_bg = BLACK;
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(term_color(top)))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(term_color(top)))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(term_color(bot)))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

fn term_color(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Logical surface ─────────────────────────────────────────────────────────

/// Draws in logical 800×600 coordinates onto whatever pixel grid the
/// terminal currently offers.
pub struct Canvas<'a> {
    buf: &'a mut PixelBuf,
    sx: f64,
    sy: f64,
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut PixelBuf) -> Self {
        let sx = buf.w as f64 / SCREEN_W;
        let sy = buf.h as f64 / SCREEN_H;
        Self { buf, sx, sy }
    }

    fn px(&self, x: f64) -> i32 {
        (x * self.sx).floor() as i32
    }

    fn py(&self, y: f64) -> i32 {
        (y * self.sy).floor() as i32
    }

    /// Pixel-space size of one glyph dot for the body font.
    pub fn text_scale(&self) -> u32 {
        (self.buf.h / 120).max(1) as u32
    }

    pub fn darken(&mut self) {
        self.buf.darken();
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, c: Rgb) {
        let (x0, y0) = (self.px(x), self.py(y));
        let x1 = self.px(x + w).max(x0 + 1);
        let y1 = self.py(y + h).max(y0 + 1);
        self.buf.fill_rect(x0, y0, x1 - x0, y1 - y0, c);
    }

    pub fn blend_rect(&mut self, x: f64, y: f64, w: f64, h: f64, c: Rgb, alpha_256: u16) {
        let (x0, y0) = (self.px(x), self.py(y));
        let x1 = self.px(x + w).max(x0 + 1);
        let y1 = self.py(y + h).max(y0 + 1);
        for py in y0..y1 {
            for px in x0..x1 {
                self.buf.blend(px, py, c, alpha_256);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, c: Rgb) {
        self.circle_with(cx, cy, r, |buf, x, y| buf.set(x, y, c));
    }

    /// Soft glow: opacity fades from `alpha_256` at the center to zero at `r`.
    pub fn glow(&mut self, cx: f64, cy: f64, r: f64, c: Rgb, alpha_256: u16) {
        let r_sq = r * r;
        let (sx, sy) = (self.sx, self.sy);
        self.circle_with(cx, cy, r, |buf, x, y| {
            let lx = (x as f64 + 0.5) / sx - cx;
            let ly = (y as f64 + 0.5) / sy - cy;
            let falloff = 1.0 - (lx * lx + ly * ly) / r_sq;
            buf.blend(x, y, c, (alpha_256 as f64 * falloff.max(0.0)) as u16);
        });
    }

    fn circle_with(&mut self, cx: f64, cy: f64, r: f64, mut plot: impl FnMut(&mut PixelBuf, i32, i32)) {
        let (x0, x1) = (self.px(cx - r), self.px(cx + r));
        let (y0, y1) = (self.py(cy - r), self.py(cy + r));
        let r_sq = r * r;
        let mut plotted = false;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let lx = (x as f64 + 0.5) / self.sx - cx;
                let ly = (y as f64 + 0.5) / self.sy - cy;
                if lx * lx + ly * ly <= r_sq {
                    plot(self.buf, x, y);
                    plotted = true;
                }
            }
        }
        // Circles smaller than a pixel still show up as one dot.
        if !plotted {
            let (x, y) = (self.px(cx), self.py(cy));
            plot(self.buf, x, y);
        }
    }

    pub fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, c: Rgb) {
        let (mut x, mut y) = (self.px(x0), self.py(y0));
        let (tx, ty) = (self.px(x1), self.py(y1));
        let dx = (tx - x).abs();
        let dy = -(ty - y).abs();
        let step_x = if x < tx { 1 } else { -1 };
        let step_y = if y < ty { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.buf.set(x, y, c);
            if x == tx && y == ty {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    /// Logical width of `text` set in `font`.
    pub fn text_width(&self, font: &Font, text: &str) -> f64 {
        let dots = font.advance() * text.chars().count() as u32;
        (dots.saturating_sub(font.scale()) * self.text_scale()) as f64 / self.sx
    }

    pub fn text_height(&self, font: &Font) -> f64 {
        (font.line_height() * self.text_scale()) as f64 / self.sy
    }

    /// Renders `text` with its top-left corner at logical `(x, y)`.
    pub fn text(&mut self, font: &Font, text: &str, x: f64, y: f64, c: Rgb) {
        let dot = (font.scale() * self.text_scale()) as i32;
        let (mut pen_x, pen_y) = (self.px(x), self.py(y));
        for ch in text.chars() {
            let rows = font::glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..3 {
                    if bits & (0b100 >> col) != 0 {
                        self.buf.fill_rect(
                            pen_x + col * dot,
                            pen_y + row as i32 * dot,
                            dot,
                            dot,
                            c,
                        );
                    }
                }
            }
            pen_x += 4 * dot;
        }
    }

    pub fn text_centered(&mut self, font: &Font, text: &str, cx: f64, y: f64, c: Rgb) {
        let w = self.text_width(font, text);
        self.text(font, text, cx - w / 2.0, y, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_scales_logical_to_pixels() {
        let mut buf = PixelBuf::new(80, 60);
        {
            let mut canvas = Canvas::new(&mut buf);
            canvas.fill_rect(400.0, 300.0, 100.0, 100.0, WHITE);
        }
        assert_eq!(buf.get(40, 30), WHITE);
        assert_eq!(buf.get(49, 39), WHITE);
        assert_eq!(buf.get(50, 30), BLACK);
        assert_eq!(buf.get(39, 30), BLACK);
    }

    #[test]
    fn tiny_shapes_still_plot() {
        let mut buf = PixelBuf::new(8, 6);
        let mut canvas = Canvas::new(&mut buf);
        canvas.fill_circle(400.0, 300.0, 2.0, WHITE);
        canvas.fill_rect(0.0, 0.0, 1.0, 1.0, WHITE);
        assert_eq!(buf.get(4, 3), WHITE);
        assert_eq!(buf.get(0, 0), WHITE);
    }

    #[test]
    fn blend_mixes_toward_color() {
        let mut buf = PixelBuf::new(2, 2);
        buf.blend(0, 0, Rgb(200, 100, 0), 128);
        assert_eq!(buf.get(0, 0), Rgb(100, 50, 0));
        buf.blend(5, 5, WHITE, 256);
    }

    #[test]
    fn line_reaches_both_ends() {
        let mut buf = PixelBuf::new(80, 60);
        let mut canvas = Canvas::new(&mut buf);
        canvas.line(0.0, 0.0, 790.0, 590.0, WHITE);
        assert_eq!(buf.get(0, 0), WHITE);
        assert_eq!(buf.get(79, 59), WHITE);
    }

    #[test]
    fn render_emits_half_blocks() {
        let mut buf = PixelBuf::new(2, 2);
        buf.set(0, 0, WHITE);
        let mut out = Vec::new();
        buf.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\u{2580}'));
        assert!(text.contains(' '));
    }

    #[test]
    fn text_width_matches_glyph_advance() {
        let mut buf = PixelBuf::new(800, 600);
        let canvas = Canvas::new(&mut buf);
        let font = Font::system(1);
        // 3 dots per glyph, 1 dot gap between glyphs
        assert_eq!(canvas.text_width(&font, "AB"), 7.0 * canvas.text_scale() as f64);
    }
}
