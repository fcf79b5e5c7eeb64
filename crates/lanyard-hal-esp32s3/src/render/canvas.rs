use core::convert::Infallible;

use lanyard_core::canvas::{Canvas, Font, Pen};
use uc8151::FrameBuffer;

use super::{PanelFlush, font};

/// No-hardware panel used in tests and bring-up.
#[derive(Default, Debug, Clone, Copy)]
pub struct NullPanel;

impl PanelFlush for NullPanel {
    type Error = Infallible;

    fn flush(&mut self, _frame: &FrameBuffer) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Framebuffer-backed [`Canvas`] flushing through a [`PanelFlush`].
///
/// Both typefaces rasterize from the same pixel font; the face
/// selection is kept as a layout hook and does not change glyph
/// shapes.
pub struct EinkCanvas<P> {
    panel: P,
    frame: FrameBuffer,
    pen: Pen,
    font: Font,
    thickness: u8,
}

impl<P> EinkCanvas<P>
where
    P: PanelFlush,
{
    pub fn new(panel: P) -> Self {
        Self {
            panel,
            frame: FrameBuffer::new(),
            pen: Pen::Black,
            font: Font::Sans,
            thickness: 1,
        }
    }

    /// Current frame contents, mainly for inspection in tests.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Currently selected typeface.
    pub fn font(&self) -> Font {
        self.font
    }

    pub fn release(self) -> (P, FrameBuffer) {
        (self.panel, self.frame)
    }

    fn ink(&self) -> bool {
        self.pen == Pen::Black
    }

    fn fill_signed(&mut self, x: i32, y: i32, w: i32, h: i32, ink: bool) {
        if w <= 0 || h <= 0 {
            return;
        }

        for py in y..y + h {
            for px in x..x + w {
                if px >= 0 && py >= 0 {
                    let _ = self.frame.set_pixel(px as usize, py as usize, ink);
                }
            }
        }
    }

    fn dab(&mut self, x: i32, y: i32, ink: bool) {
        let size = self.thickness.max(1) as i32;
        self.fill_signed(x, y, size, size, ink);
    }
}

impl<P> Canvas for EinkCanvas<P>
where
    P: PanelFlush,
{
    type Error = P::Error;

    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_thickness(&mut self, thickness: u8) {
        self.thickness = thickness.max(1);
    }

    fn clear(&mut self) {
        self.frame.clear(self.ink());
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let ink = self.ink();

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.dab(x, y, ink);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += step_x;
            }
            if doubled <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn rect(&mut self, x: i32, y: i32, w: u32, h: u32) {
        let ink = self.ink();
        self.fill_signed(x, y, w as i32, h as i32, ink);
    }

    fn text(&mut self, text: &str, x: i32, y: i32, wrap_width: u32, scale: u16) {
        let ink = self.ink();
        let cell = font::cell_px(scale) as i32;
        let glyph_h = font::GLYPH_ROWS as i32 * cell;
        let advance = font::CELL_COLS as i32 * cell;
        let right_edge = x + wrap_width as i32;

        let mut cursor_x = x;
        let mut top = y - glyph_h / 2;

        for word in text.split(' ') {
            let word_width = font::text_width(word, scale) as i32;
            if cursor_x > x && cursor_x + word_width > right_edge {
                cursor_x = x;
                top += font::line_height(scale) as i32;
            }

            font::draw_text(&mut self.frame, cursor_x, top, word, scale, ink);
            // Trailing glyph gap plus one space-character advance.
            cursor_x += word_width + cell + advance;
        }
    }

    fn measure_text(&self, text: &str, scale: u16) -> u32 {
        font::text_width(text, scale)
    }

    fn update(&mut self) -> Result<(), Self::Error> {
        self.panel.flush(&self.frame)
    }
}
