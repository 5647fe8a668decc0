use std::sync::Arc;

use crate::assets::text::TextBlock;
use crate::foundation::core::{Affine, BezPath, Rgba8Premul};
use crate::foundation::error::StoryResult;
use crate::foundation::math::premul_over_in_place;
use crate::render::raster::{CpuCanvas, fill_solid, fill_text};

/// A rendered viewport, RGBA8 row-major.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// One vector fill or text block in frame pixel coordinates.
#[derive(Clone, Debug)]
pub enum DrawOp {
    FillPath {
        path: BezPath,
        transform: Affine,
        color: Rgba8Premul,
        opacity: f32,
    },
    /// Shaped text; `transform` places the layout's top-left corner.
    Text {
        block: Arc<TextBlock>,
        transform: Affine,
        opacity: f32,
    },
}

/// A premultiplied pixel layer placed at a vertical offset in the frame.
#[derive(Clone, Copy, Debug)]
pub struct PixelLayer<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
    pub offset_y: i64,
}

/// Everything on screen, back to front: backdrop fills, an optional pixel layer, content fills.
#[derive(Clone, Debug, Default)]
pub struct FrameLayers<'a> {
    pub backdrop: Vec<DrawOp>,
    pub canvas: Option<PixelLayer<'a>>,
    pub content: Vec<DrawOp>,
}

pub fn compose(width: u32, height: u32, layers: &FrameLayers<'_>) -> StoryResult<FrameRGBA> {
    let mut canvas = CpuCanvas::new(width, height)?;
    canvas.draw(|ctx| draw_ops(ctx, &layers.backdrop));
    let mut data = canvas.data().to_vec();

    if let Some(layer) = layers.canvas {
        blend_rows(&mut data, width, height, layer)?;
    }

    if !layers.content.is_empty() {
        canvas.draw(|ctx| draw_ops(ctx, &layers.content));
        premul_over_in_place(&mut data, canvas.data(), 1.0)?;
    }

    Ok(FrameRGBA {
        width,
        height,
        data,
        premultiplied: true,
    })
}

fn draw_ops(ctx: &mut vello_cpu::RenderContext, ops: &[DrawOp]) {
    for op in ops {
        match op {
            DrawOp::FillPath {
                path,
                transform,
                color,
                opacity,
            } => fill_solid(ctx, path, *transform, *color, *opacity),
            DrawOp::Text {
                block,
                transform,
                opacity,
            } => fill_text(ctx, block, *transform, *opacity),
        }
    }
}

fn blend_rows(dst: &mut [u8], width: u32, height: u32, layer: PixelLayer<'_>) -> StoryResult<()> {
    if layer.width != width {
        tracing::debug!(
            frame = width,
            layer = layer.width,
            "pixel layer width differs from frame, skipped"
        );
        return Ok(());
    }
    let row = width as usize * 4;
    for src_y in 0..layer.height as i64 {
        let dst_y = src_y + layer.offset_y;
        if dst_y < 0 || dst_y >= i64::from(height) {
            continue;
        }
        let s = src_y as usize * row;
        let d = dst_y as usize * row;
        let (Some(src), Some(dst)) = (layer.data.get(s..s + row), dst.get_mut(d..d + row)) else {
            continue;
        };
        premul_over_in_place(dst, src, 1.0)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
