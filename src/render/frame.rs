use crate::core::Viewport;
use crate::error::{TeleperiodError, TeleperiodResult};
use crate::render::{ClipRegion, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one calendar draw pass.
///
/// Coordinates are in the sliding layer's space; `layer_x` is where the host
/// places that layer inside the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub layer_x: f64,
    pub layer_width: f64,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
    pub clips: Vec<ClipRegion>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layer_x: 0.0,
            layer_width: 0.0,
            rects: Vec::new(),
            texts: Vec::new(),
            clips: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    pub fn validate(&self) -> TeleperiodResult<()> {
        if !self.viewport.is_valid() {
            return Err(TeleperiodError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.layer_x.is_finite() || !self.layer_width.is_finite() {
            return Err(TeleperiodError::InvalidData(
                "layer geometry must be finite".to_owned(),
            ));
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
            if let Some(clip_id) = &text.clip_id {
                if !self.clips.iter().any(|clip| &clip.id == clip_id) {
                    return Err(TeleperiodError::InvalidData(format!(
                        "text references unknown clip `{clip_id}`"
                    )));
                }
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.texts.is_empty()
    }
}
