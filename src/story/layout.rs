//! Static box layout of the story strip, measured once at mount.
//!
//! Sections sit side by side, each one viewport wide and one viewport tall, and stack their
//! content vertically centered: optional morph SVG, title, body paragraph, optional vector
//! animation. Titles and bodies are shaped with Parley, so their boxes are the laid-out text.

use std::sync::Arc;

use crate::assets::store::StoryFonts;
use crate::assets::text::{TextBlock, TextBrushRgba8, TextLayoutEngine};
use crate::config::model::{SectionSpec, StoryConfig};
use crate::foundation::core::{Rect, RgbColor, Viewport};
use crate::foundation::error::StoryResult;

pub const TITLE_SIZE_PX: f32 = 36.0;
pub const BODY_SIZE_PX: f32 = 18.0;
pub const BODY_MAX_WIDTH_PX: f64 = 448.0;
pub const BODY_MARGIN_TOP_PX: f64 = 16.0;

pub const TITLE_BRUSH: TextBrushRgba8 = TextBrushRgba8::rgb(255, 255, 255);
pub const BODY_BRUSH: TextBrushRgba8 = TextBrushRgba8::rgb(0xd1, 0xd5, 0xdb);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    MorphSvg,
    Title,
    Body,
    Vector,
}

impl ElementKind {
    /// Whether the element gets a scroll-triggered entrance.
    pub fn fades_in(self) -> bool {
        !matches!(self, Self::MorphSvg)
    }
}

/// A content box in page coordinates, with the strip at rest.
#[derive(Clone, Debug)]
pub struct ElementBox {
    pub section: usize,
    pub kind: ElementKind,
    pub rect: Rect,
    /// Shaped text, `None` for graphics.
    pub text: Option<Arc<TextBlock>>,
}

#[derive(Clone, Debug)]
pub struct SectionLayout {
    pub rect: Rect,
    pub background: RgbColor,
    pub elements: Vec<ElementBox>,
}

#[derive(Clone, Debug)]
pub struct StoryLayout {
    container: Rect,
    sections: Vec<SectionLayout>,
}

impl StoryLayout {
    /// Lay out every section at `viewport`, shaping titles in bold and bodies in regular.
    pub fn measure(
        config: &StoryConfig,
        viewport: Viewport,
        fonts: &StoryFonts,
    ) -> StoryResult<Self> {
        let vw = viewport.width;
        let vh = viewport.height;
        let top = config.offset_top;
        let n = config.sections.len();

        let mut text = Typesetter {
            title: TextLayoutEngine::new(&fonts.bold).map_err(|e| e.context("title font"))?,
            body: TextLayoutEngine::new(&fonts.regular).map_err(|e| e.context("body font"))?,
        };

        let sections = config
            .sections
            .iter()
            .enumerate()
            .map(|(i, spec)| -> StoryResult<SectionLayout> {
                let rect = Rect::new(i as f64 * vw, top, (i + 1) as f64 * vw, top + vh);
                Ok(SectionLayout {
                    rect,
                    background: spec.background,
                    elements: stack_content(i, spec, rect, config, &mut text)?,
                })
            })
            .collect::<StoryResult<Vec<_>>>()?;

        Ok(Self {
            container: Rect::new(0.0, top, n as f64 * vw, top + vh),
            sections,
        })
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    /// Measured pixel width of the container: every section side by side.
    pub fn container_offset_width(&self) -> f64 {
        self.container.width()
    }

    pub fn sections(&self) -> &[SectionLayout] {
        &self.sections
    }

    pub fn elements(&self) -> impl Iterator<Item = &ElementBox> {
        self.sections.iter().flat_map(|s| s.elements.iter())
    }

    pub fn fade_targets(&self) -> impl Iterator<Item = &ElementBox> {
        self.elements().filter(|e| e.kind.fades_in())
    }

    fn first_of(&self, kind: ElementKind) -> Option<Rect> {
        self.elements().find(|e| e.kind == kind).map(|e| e.rect)
    }

    pub fn morph_box(&self) -> Option<Rect> {
        self.first_of(ElementKind::MorphSvg)
    }

    pub fn vector_box(&self) -> Option<Rect> {
        self.first_of(ElementKind::Vector)
    }
}

struct Typesetter {
    title: TextLayoutEngine,
    body: TextLayoutEngine,
}

fn stack_content(
    section: usize,
    spec: &SectionSpec,
    area: Rect,
    config: &StoryConfig,
    text: &mut Typesetter,
) -> StoryResult<Vec<ElementBox>> {
    let title = text.title.layout_plain(
        &spec.title,
        TITLE_SIZE_PX,
        TITLE_BRUSH,
        Some(area.width() as f32),
    )?;
    let body = text.body.layout_plain(
        &spec.body,
        BODY_SIZE_PX,
        BODY_BRUSH,
        Some(BODY_MAX_WIDTH_PX.min(area.width()) as f32),
    )?;

    // (kind, width, height, margin above, text)
    let mut items: Vec<(ElementKind, f64, f64, f64, Option<TextBlock>)> = Vec::new();
    if spec.morph {
        let s = config.morph.box_size;
        items.push((ElementKind::MorphSvg, s, s, 0.0, None));
    }
    items.push((ElementKind::Title, title.width(), title.height(), 0.0, Some(title)));
    items.push((ElementKind::Body, body.width(), body.height(), BODY_MARGIN_TOP_PX, Some(body)));
    if spec.vector {
        let s = config.vector.box_size;
        items.push((ElementKind::Vector, s, s, 0.0, None));
    }

    let total: f64 = items.iter().map(|(_, _, h, m, _)| h + m).sum();
    let mut y = area.y0 + (area.height() - total) / 2.0;
    let cx = area.center().x;
    Ok(items
        .into_iter()
        .map(|(kind, w, h, margin, block)| {
            y += margin;
            let rect = Rect::new(cx - w / 2.0, y, cx + w / 2.0, y + h);
            y += h;
            ElementBox {
                section,
                kind,
                rect,
                text: block.map(Arc::new),
            }
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/story/layout.rs"]
mod tests;
