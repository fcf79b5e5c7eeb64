//! Scannable code-matrix scaling and rasterization.

use crate::canvas::{Canvas, Pen};

/// Module count of the blank fallback matrix (a version-1 code).
pub const EMPTY_MODULE_COUNT: u32 = 21;

/// Square boolean module grid, a pure function of the encoded text.
pub trait CodeMatrix {
    /// Modules per side.
    fn size(&self) -> u32;

    /// Whether the module at `(x, y)` is dark. Out-of-range
    /// coordinates are light.
    fn module(&self, x: u32, y: u32) -> bool;
}

/// Outcome of code generation for one render pass.
///
/// Generation failure degrades to `Empty`, a blank matrix of
/// [`EMPTY_MODULE_COUNT`] modules, instead of aborting the pass; the
/// degradation stays visible to callers and tests.
pub enum BadgeCode<M> {
    Ready(M),
    Empty,
}

impl<M: CodeMatrix> BadgeCode<M> {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl<M: CodeMatrix> CodeMatrix for BadgeCode<M> {
    fn size(&self) -> u32 {
        match self {
            Self::Ready(matrix) => matrix.size(),
            Self::Empty => EMPTY_MODULE_COUNT,
        }
    }

    fn module(&self, x: u32, y: u32) -> bool {
        match self {
            Self::Ready(matrix) => matrix.module(x, y),
            Self::Empty => false,
        }
    }
}

/// Pixel geometry of a matrix scaled into a square target box.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CodeFit {
    /// Side of one module in pixels.
    pub module_px: u32,
    /// Side of the drawn square; integer rounding may leave it short
    /// of the target.
    pub drawn_px: u32,
}

/// Scales `module_count` modules into a `target_px` box.
pub fn measure(target_px: u32, module_count: u32) -> CodeFit {
    let modules = module_count.max(1);
    let module_px = target_px / modules;
    CodeFit {
        module_px,
        drawn_px: module_px * modules,
    }
}

/// Draws `code` at `(x, y)`: a light square of the effective size,
/// then one dark square per set module.
pub fn draw<C, M>(canvas: &mut C, x: i32, y: i32, target_px: u32, code: &M)
where
    C: Canvas,
    M: CodeMatrix,
{
    let fit = measure(target_px, code.size());

    canvas.set_pen(Pen::White);
    canvas.rect(x, y, fit.drawn_px, fit.drawn_px);

    canvas.set_pen(Pen::Black);
    for module_x in 0..code.size() {
        for module_y in 0..code.size() {
            if code.module(module_x, module_y) {
                canvas.rect(
                    x + (module_x * fit.module_px) as i32,
                    y + (module_y * fit.module_px) as i32,
                    fit.module_px,
                    fit.module_px,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas};

    /// Deterministic fixture: dark modules on the two diagonals.
    pub(crate) struct DiagonalMatrix(pub u32);

    impl CodeMatrix for DiagonalMatrix {
        fn size(&self) -> u32 {
            self.0
        }

        fn module(&self, x: u32, y: u32) -> bool {
            x == y || x + y == self.0 - 1
        }
    }

    #[test]
    fn drawn_size_never_exceeds_the_target() {
        for modules in 1..=60 {
            for target in [0u32, 1, 21, 64, 128] {
                let fit = measure(target, modules);
                assert_eq!(fit.drawn_px, (target / modules) * modules);
                assert!(fit.drawn_px <= target);
            }
        }
    }

    #[test]
    fn rounding_shortfall_is_accepted_not_corrected() {
        let fit = measure(128, 21);
        assert_eq!(fit.module_px, 6);
        assert_eq!(fit.drawn_px, 126);
    }

    #[test]
    fn draw_emits_background_then_one_rect_per_dark_module() {
        let mut canvas = RecordingCanvas::new();
        let code = DiagonalMatrix(5);
        draw(&mut canvas, 10, 20, 50, &code);

        assert_eq!(
            canvas.ops[0],
            DrawOp::Rect {
                x: 10,
                y: 20,
                w: 50,
                h: 50,
                pen: Pen::White
            }
        );

        let dark: std::vec::Vec<&DrawOp> = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { pen: Pen::Black, .. }))
            .collect();
        // Two five-module diagonals sharing the center module.
        assert_eq!(dark.len(), 9);
        for op in dark {
            let DrawOp::Rect { x, y, w, h, .. } = op else {
                unreachable!();
            };
            assert_eq!((*w, *h), (10, 10));
            assert!(*x >= 10 && x + *w as i32 <= 60);
            assert!(*y >= 20 && y + *h as i32 <= 70);
        }
    }

    #[test]
    fn degraded_code_draws_only_the_background() {
        let mut canvas = RecordingCanvas::new();
        let code: BadgeCode<DiagonalMatrix> = BadgeCode::Empty;
        assert!(code.is_degraded());

        draw(&mut canvas, 0, 0, 128, &code);

        assert_eq!(canvas.ops.len(), 1);
        assert!(matches!(
            canvas.ops[0],
            DrawOp::Rect {
                w: 126,
                h: 126,
                pen: Pen::White,
                ..
            }
        ));
    }
}
