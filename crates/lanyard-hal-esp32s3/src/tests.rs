//! End-to-end render pass over the real font, encoder, and
//! framebuffer.

use lanyard_core::{
    canvas::Canvas,
    content::{BadgeContent, DEFAULT_CONTENT},
    layout::{self, LayoutPolicy},
    qr::BadgeCode,
};
use uc8151::FrameBuffer;

use crate::{
    qr::{QrScratch, encode_url},
    render::{EinkCanvas, PanelFlush},
};

struct CountingPanel {
    flushes: usize,
}

impl PanelFlush for CountingPanel {
    type Error = core::convert::Infallible;

    fn flush(&mut self, _frame: &FrameBuffer) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

fn inked_in_region(frame: &FrameBuffer, x0: usize, y0: usize, x1: usize, y1: usize) -> usize {
    let mut count = 0;
    for y in y0..y1.min(uc8151::protocol::HEIGHT) {
        for x in x0..x1.min(uc8151::protocol::WIDTH) {
            if frame.pixel(x, y) == Some(true) {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn default_badge_renders_end_to_end_with_one_flush() {
    let content = BadgeContent::parse(DEFAULT_CONTENT);

    let mut scratch = QrScratch::new();
    let code = BadgeCode::Ready(encode_url(&content.url, &mut scratch).unwrap());
    assert!(!code.is_degraded());

    let mut canvas = EinkCanvas::new(CountingPanel { flushes: 0 });
    canvas.set_thickness(2);
    layout::draw_badge(&mut canvas, &content, &code, &LayoutPolicy::default()).unwrap();

    // The code column carries both dark modules and its light quiet
    // zone; the name band carries ink on its white background.
    let frame = canvas.frame();
    let code_dark = inked_in_region(frame, 172, 8, 296, 120);
    let code_light = {
        let total = (296 - 172) * (120 - 8);
        total - code_dark
    };
    assert!(code_dark > 100);
    assert!(code_light > 100);

    let name_band_dark = inked_in_region(frame, 1, 31, 168, 106);
    assert!(name_band_dark > 0);

    let (panel, _) = canvas.release();
    assert_eq!(panel.flushes, 1);
}

#[test]
fn degraded_code_still_renders_a_full_pass() {
    let content = BadgeContent::parse(DEFAULT_CONTENT);
    let code: BadgeCode<crate::qr::UrlCode<'_>> = BadgeCode::Empty;
    assert!(code.is_degraded());

    let mut canvas = EinkCanvas::new(CountingPanel { flushes: 0 });
    layout::draw_badge(&mut canvas, &content, &code, &LayoutPolicy::default()).unwrap();

    // The blank matrix leaves the inside of the code box fully light.
    assert_eq!(inked_in_region(canvas.frame(), 174, 2, 294, 126), 0);

    let (panel, _) = canvas.release();
    assert_eq!(panel.flushes, 1);
}
