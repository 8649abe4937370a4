mod frame;
mod null_renderer;
mod primitives;

pub use frame::{FrameTransform, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PathPrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::CarouselResult;

/// Paints one carousel scene.
///
/// Frames arrive fully resolved (card focus transforms and dot widths already
/// applied), so a backend never sees station data or controller state.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> CarouselResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
