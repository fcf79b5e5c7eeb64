//! Abstract drawing surface consumed by the layout composer.

/// Color index used by subsequent drawing calls.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Pen {
    #[default]
    Black,
    White,
}

/// Typeface selection.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Font {
    #[default]
    Sans,
    Serif,
}

/// Drawing capability set of the badge display.
///
/// Text scale is in hundredths of the nominal glyph size, so `100` is
/// the base size and `200` doubles it. Only [`Canvas::update`] can
/// fail; drawing calls clip silently at the surface bounds.
pub trait Canvas {
    type Error;

    fn set_pen(&mut self, pen: Pen);

    fn set_font(&mut self, font: Font);

    /// Stroke thickness hint for vector-style fonts. Optional.
    fn set_thickness(&mut self, _thickness: u8) {}

    /// Fills the whole surface with the current pen.
    fn clear(&mut self);

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32);

    /// Filled rectangle.
    fn rect(&mut self, x: i32, y: i32, w: u32, h: u32);

    /// Draws `text` with its vertical center on `y`, wrapping at
    /// `wrap_width` pixels from `x`.
    fn text(&mut self, text: &str, x: i32, y: i32, wrap_width: u32, scale: u16);

    /// Rendered width of `text` at `scale`, in pixels.
    fn measure_text(&self, text: &str, scale: u16) -> u32;

    /// Pushes the composed frame to the panel. Ends a render pass.
    fn update(&mut self) -> Result<(), Self::Error>;
}

/// One recorded drawing call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DrawOp {
    Clear {
        pen: Pen,
    },
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        pen: Pen,
    },
    Rect {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        pen: Pen,
    },
    Text {
        x: i32,
        y: i32,
        chars: u32,
        scale: u16,
        pen: Pen,
        font: Font,
    },
    Update,
}

/// No-hardware canvas used in tests and bring-up.
///
/// Records every drawing call and models text width as a linear
/// function of character count and scale.
pub struct RecordingCanvas {
    pen: Pen,
    font: Font,
    pub ops: heapless::Vec<DrawOp, 2048>,
}

impl RecordingCanvas {
    /// Pixel advance of one character at scale 100.
    pub const CHAR_ADVANCE_PX: u32 = 6;

    pub const fn new() -> Self {
        Self {
            pen: Pen::Black,
            font: Font::Sans,
            ops: heapless::Vec::new(),
        }
    }

    pub fn update_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Update))
            .count()
    }

    fn record(&mut self, op: DrawOp) {
        // Capacity is sized for a full badge pass.
        let pushed = self.ops.push(op);
        debug_assert!(pushed.is_ok(), "recording canvas op capacity exceeded");
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RecordingCanvas {
    type Error = core::convert::Infallible;

    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn clear(&mut self) {
        let pen = self.pen;
        self.record(DrawOp::Clear { pen });
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let pen = self.pen;
        self.record(DrawOp::Line { x0, y0, x1, y1, pen });
    }

    fn rect(&mut self, x: i32, y: i32, w: u32, h: u32) {
        let pen = self.pen;
        self.record(DrawOp::Rect { x, y, w, h, pen });
    }

    fn text(&mut self, text: &str, x: i32, y: i32, _wrap_width: u32, scale: u16) {
        let pen = self.pen;
        let font = self.font;
        self.record(DrawOp::Text {
            x,
            y,
            chars: text.chars().count() as u32,
            scale,
            pen,
            font,
        });
    }

    fn measure_text(&self, text: &str, scale: u16) -> u32 {
        let chars = text.chars().count() as u32;
        (chars * Self::CHAR_ADVANCE_PX * scale as u32) / 100
    }

    fn update(&mut self) -> Result<(), Self::Error> {
        self.record(DrawOp::Update);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_is_monotone_in_scale_and_length() {
        let canvas = RecordingCanvas::new();

        assert!(canvas.measure_text("ab", 100) < canvas.measure_text("abc", 100));
        assert!(canvas.measure_text("ab", 50) < canvas.measure_text("ab", 100));
        assert_eq!(canvas.measure_text("", 200), 0);
    }

    #[test]
    fn recorded_ops_carry_the_active_pen() {
        let mut canvas = RecordingCanvas::new();

        canvas.set_pen(Pen::White);
        canvas.rect(1, 2, 3, 4);
        canvas.set_pen(Pen::Black);
        canvas.line(0, 0, 5, 5);

        assert_eq!(
            canvas.ops[0],
            DrawOp::Rect {
                x: 1,
                y: 2,
                w: 3,
                h: 4,
                pen: Pen::White
            }
        );
        assert!(matches!(canvas.ops[1], DrawOp::Line { pen: Pen::Black, .. }));
    }
}
