mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    ClipIdGenerator, ClipRegion, Color, RectPrimitive, RectRole, TextHAlign, TextPrimitive,
};

use crate::error::TeleperiodResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized `RenderFrame` so drawing code stays
/// isolated from the calendar's interval algebra and navigation state.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> TeleperiodResult<()>;
}
