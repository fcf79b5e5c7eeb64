pub mod font;

mod canvas;

pub use canvas::{EinkCanvas, NullPanel};

use uc8151::FrameBuffer;

/// Sink for composed frames. The canvas flushes through this once per
/// render pass.
pub trait PanelFlush {
    type Error;

    fn flush(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}
