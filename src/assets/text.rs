use std::sync::Arc;

use crate::foundation::error::{StoryError, StoryResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Straight-alpha RGBA8 brush carried through Parley layouts.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextBrushRgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// A shaped paragraph plus the face its glyph ids refer to.
pub struct TextBlock {
    pub layout: parley::Layout<TextBrushRgba8>,
    pub font: vello_cpu::peniko::FontData,
}

impl TextBlock {
    pub fn width(&self) -> f64 {
        f64::from(self.layout.width())
    }

    pub fn height(&self) -> f64 {
        f64::from(self.layout.height())
    }

    pub fn line_count(&self) -> usize {
        self.layout.lines().count()
    }
}

impl std::fmt::Debug for TextBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBlock")
            .field("width", &self.layout.width())
            .field("height", &self.layout.height())
            .field("lines", &self.line_count())
            .finish_non_exhaustive()
    }
}

/// Parley contexts bound to a single font face.
///
/// One engine per face keeps every glyph run on the face the block renders with.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and resolve its family name.
    pub fn new(font_bytes: &Arc<Vec<u8>>) -> StoryResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.as_ref().clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| StoryError::asset("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StoryError::asset("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
            0,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape `text` at `size_px`, breaking lines at `max_width_px` when given.
    pub fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> StoryResult<TextBlock> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StoryError::validation("text size_px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        if let Some(w) = max_width_px {
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        }

        Ok(TextBlock {
            layout,
            font: self.font.clone(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
