//! Single-pass badge composition.

use log::debug;

use crate::{
    canvas::{Canvas, Font, Pen},
    content::BadgeContent,
    qr::{self, BadgeCode, CodeMatrix},
    text_fit,
};

/// Canvas width in pixels.
pub const WIDTH: u32 = 296;
/// Canvas height in pixels.
pub const HEIGHT: u32 = 128;

/// Width of the right-hand column reserved for the badge code.
pub const CODE_COLUMN_WIDTH: u32 = 128;
/// Target box for the code matrix.
pub const CODE_TARGET_PX: u32 = 128;
// The code box sits 124px from the right edge, slightly inside its column.
const CODE_LEFT_INSET: u32 = 124;

/// Width of the text column.
pub const TEXT_WIDTH: u32 = WIDTH - CODE_COLUMN_WIDTH - 1;

const HEADER_HEIGHT: u32 = 30;
const FOOTER_HEIGHT: u32 = 20;
const NAME_HEIGHT: u32 = HEIGHT - HEADER_HEIGHT - FOOTER_HEIGHT - 2;

const HEADER_TEXT_SCALE: u16 = 60;
const FOOTER_TEXT_SCALE: u16 = 50;

const NAME_PADDING: u32 = 20;
const FOOTER_INSET: i32 = 10;
const DETAIL_SPACING: i32 = 10;

/// Horizontal placement of the header line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum HeaderStyle {
    /// Centered in the text column.
    #[default]
    Centered,
    /// Fixed left offset.
    Inset(i32),
}

/// What the footer band shows.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FooterStyle {
    /// The title line alone.
    #[default]
    Title,
    /// The title as a measured label, then the detail line offset by
    /// the label width.
    LabeledDetail,
}

/// Presentation policy unifying the two upstream badge variants.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LayoutPolicy {
    pub header: HeaderStyle,
    pub footer: FooterStyle,
}

/// Composes one full badge frame and ends the pass with a single
/// flush.
pub fn draw_badge<C, M>(
    canvas: &mut C,
    content: &BadgeContent,
    code: &BadgeCode<M>,
    policy: &LayoutPolicy,
) -> Result<(), C::Error>
where
    C: Canvas,
    M: CodeMatrix,
{
    debug!(
        "badge pass: names={} code_modules={} degraded={}",
        content.names.len(),
        code.size(),
        code.is_degraded()
    );

    canvas.set_pen(Pen::Black);
    canvas.clear();

    // Badge code, vertically centered in its column.
    let fit = qr::measure(CODE_TARGET_PX, code.size());
    let code_left = (WIDTH - CODE_LEFT_INSET) as i32;
    let code_top = (HEIGHT as i32 - fit.drawn_px as i32) / 2;
    qr::draw(canvas, code_left, code_top, CODE_TARGET_PX, code);

    // Border around the code column.
    canvas.set_pen(Pen::Black);
    let border_left = (WIDTH - CODE_COLUMN_WIDTH) as i32;
    let right = WIDTH as i32 - 1;
    let bottom = HEIGHT as i32 - 1;
    canvas.line(border_left, 0, right, 0);
    canvas.line(border_left, 0, border_left, bottom);
    canvas.line(border_left, bottom, right, bottom);
    canvas.line(right, 0, right, bottom);

    // Header line.
    canvas.set_pen(Pen::White);
    canvas.set_font(Font::Serif);
    let header = text_fit::fit_to_width(canvas, &content.header, HEADER_TEXT_SCALE, TEXT_WIDTH);
    let header_x = match policy.header {
        HeaderStyle::Centered => {
            let width = canvas.measure_text(header, HEADER_TEXT_SCALE);
            (TEXT_WIDTH as i32 - width as i32) / 2 + 3
        }
        HeaderStyle::Inset(x) => x,
    };
    canvas.text(
        header,
        header_x,
        HEADER_HEIGHT as i32 / 2 + 1,
        WIDTH,
        HEADER_TEXT_SCALE,
    );

    // Name band: white background, then each token auto-scaled and
    // centered on its own line.
    canvas.set_pen(Pen::White);
    canvas.rect(1, HEADER_HEIGHT as i32 + 1, TEXT_WIDTH, NAME_HEIGHT);

    canvas.set_pen(Pen::Black);
    canvas.set_font(Font::Sans);
    let mut name_offset: i32 = -10;
    for name in &content.names {
        let scale = text_fit::autoscale(canvas, name, TEXT_WIDTH - NAME_PADDING);
        let width = canvas.measure_text(name, scale);
        let x = (TEXT_WIDTH as i32 - width as i32) / 2;
        let y = (NAME_HEIGHT / 2 + HEADER_HEIGHT) as i32 + name_offset;
        canvas.text(name, x, y, WIDTH, scale);
        name_offset += text_fit::name_line_advance(scale);
    }

    // Footer band.
    canvas.set_pen(Pen::White);
    canvas.rect(
        1,
        (HEIGHT - FOOTER_HEIGHT) as i32,
        TEXT_WIDTH,
        FOOTER_HEIGHT - 1,
    );

    canvas.set_pen(Pen::Black);
    canvas.set_font(Font::Sans);
    let footer_y = (HEIGHT - FOOTER_HEIGHT / 2) as i32;
    match policy.footer {
        FooterStyle::Title => {
            let budget = TEXT_WIDTH - FOOTER_INSET as u32;
            let title = text_fit::fit_to_width(canvas, &content.title, FOOTER_TEXT_SCALE, budget);
            canvas.text(title, FOOTER_INSET, footer_y, WIDTH, FOOTER_TEXT_SCALE);
        }
        FooterStyle::LabeledDetail => {
            let label_budget = TEXT_WIDTH / 2;
            let label =
                text_fit::fit_to_width(canvas, &content.title, FOOTER_TEXT_SCALE, label_budget);
            canvas.text(label, FOOTER_INSET, footer_y, WIDTH, FOOTER_TEXT_SCALE);

            let label_width = canvas.measure_text(label, FOOTER_TEXT_SCALE);
            let detail_x = FOOTER_INSET + label_width as i32 + DETAIL_SPACING;
            let budget = TEXT_WIDTH.saturating_sub(detail_x as u32);
            let detail = text_fit::fit_to_width(canvas, &content.detail, FOOTER_TEXT_SCALE, budget);
            canvas.text(detail, detail_x, footer_y, WIDTH, FOOTER_TEXT_SCALE);
        }
    }

    canvas.update()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};
    use crate::content::BadgeContent;
    use crate::text_fit::{MAX_NAME_SCALE, MIN_NAME_SCALE};

    /// Fixture matrix with dark modules on both diagonals.
    struct DiagonalMatrix(u32);

    impl CodeMatrix for DiagonalMatrix {
        fn size(&self) -> u32 {
            self.0
        }

        fn module(&self, x: u32, y: u32) -> bool {
            x == y || x + y == self.0 - 1
        }
    }

    fn default_content() -> BadgeContent {
        BadgeContent::parse(crate::content::DEFAULT_CONTENT)
    }

    #[test]
    fn pass_ends_in_exactly_one_flush() {
        let mut canvas = RecordingCanvas::new();
        let code = BadgeCode::Ready(DiagonalMatrix(21));

        draw_badge(&mut canvas, &default_content(), &code, &LayoutPolicy::default()).unwrap();

        assert_eq!(canvas.update_count(), 1);
        assert_eq!(canvas.ops.last(), Some(&DrawOp::Update));
        assert_eq!(canvas.ops.first(), Some(&DrawOp::Clear { pen: Pen::Black }));
    }

    #[test]
    fn code_box_fits_the_target_square() {
        let mut canvas = RecordingCanvas::new();
        let code = BadgeCode::Ready(DiagonalMatrix(21));

        draw_badge(&mut canvas, &default_content(), &code, &LayoutPolicy::default()).unwrap();

        let Some(DrawOp::Rect { x, y, w, h, .. }) = canvas
            .ops
            .iter()
            .find(|op| matches!(op, DrawOp::Rect { pen: Pen::White, .. }))
        else {
            panic!("missing code background");
        };

        assert!(*w <= CODE_TARGET_PX && *h <= CODE_TARGET_PX);
        // The box starts inside the code column; the canvas clips the
        // couple of pixels the upstream geometry hangs past the edge.
        assert!(*x >= (WIDTH - CODE_COLUMN_WIDTH) as i32);
        assert!(*x + *w as i32 <= (WIDTH - CODE_COLUMN_WIDTH) as i32 + CODE_TARGET_PX as i32 + 4);
        assert!(*y >= 0 && *y + *h as i32 <= HEIGHT as i32);
    }

    #[test]
    fn every_name_token_is_drawn_within_scale_bounds() {
        let mut canvas = RecordingCanvas::new();
        let content =
            BadgeContent::parse("h\nPeter Fernandez Exceptionallylongfamilyname\nt\nu\n");
        let code = BadgeCode::Ready(DiagonalMatrix(21));

        draw_badge(&mut canvas, &content, &code, &LayoutPolicy::default()).unwrap();

        let name_ops: std::vec::Vec<_> = canvas
            .ops
            .iter()
            .filter(|op| {
                matches!(
                    op,
                    DrawOp::Text {
                        pen: Pen::Black,
                        font: Font::Sans,
                        ..
                    }
                )
            })
            .collect();
        assert_eq!(name_ops.len(), 3 + 1); // three names plus the footer

        for op in &name_ops[..3] {
            let DrawOp::Text { scale, .. } = op else {
                unreachable!();
            };
            assert!((MIN_NAME_SCALE..=MAX_NAME_SCALE).contains(scale));
        }
    }

    #[test]
    fn degraded_code_still_renders_a_full_pass() {
        let mut canvas = RecordingCanvas::new();
        let code: BadgeCode<DiagonalMatrix> = BadgeCode::Empty;

        draw_badge(&mut canvas, &default_content(), &code, &LayoutPolicy::default()).unwrap();

        assert_eq!(canvas.update_count(), 1);
        // Blank matrix: the only black rect inside the code column is none;
        // background square still reserves the region.
        assert!(canvas.ops.iter().any(|op| matches!(
            op,
            DrawOp::Rect {
                w: 126,
                h: 126,
                pen: Pen::White,
                ..
            }
        )));
    }

    #[test]
    fn labeled_detail_footer_offsets_text_by_the_label_width() {
        let mut canvas = RecordingCanvas::new();
        let content = BadgeContent::parse("Acme\nJo Badger\nRole\nEngineering\nhttps://acme.test\n");
        let code = BadgeCode::Ready(DiagonalMatrix(21));
        let policy = LayoutPolicy {
            header: HeaderStyle::Inset(5),
            footer: FooterStyle::LabeledDetail,
        };

        draw_badge(&mut canvas, &content, &code, &policy).unwrap();

        let footer_ops: std::vec::Vec<_> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, scale, .. } if *scale == FOOTER_TEXT_SCALE => Some(*x),
                _ => None,
            })
            .collect();
        assert_eq!(footer_ops.len(), 2);

        let label_width = canvas.measure_text("Role", FOOTER_TEXT_SCALE);
        assert_eq!(footer_ops[0], FOOTER_INSET);
        assert_eq!(footer_ops[1], FOOTER_INSET + label_width as i32 + DETAIL_SPACING);
    }

    #[test]
    fn inset_header_uses_the_fixed_offset() {
        let mut canvas = RecordingCanvas::new();
        let policy = LayoutPolicy {
            header: HeaderStyle::Inset(5),
            footer: FooterStyle::Title,
        };
        let code = BadgeCode::Ready(DiagonalMatrix(21));

        draw_badge(&mut canvas, &default_content(), &code, &policy).unwrap();

        let header = canvas
            .ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { font: Font::Serif, .. }))
            .unwrap();
        assert!(matches!(header, DrawOp::Text { x: 5, .. }));
    }
}
