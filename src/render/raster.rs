use crate::assets::text::TextBlock;
use crate::foundation::core::{Affine, BezPath, Point, Rgba8Premul};
use crate::foundation::error::{StoryError, StoryResult};

/// A CPU pixmap plus its dimensions, redrawn whole on every [`CpuCanvas::draw`].
pub(crate) struct CpuCanvas {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuCanvas {
    pub(crate) fn new(width: u32, height: u32) -> StoryResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| StoryError::surface("canvas width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| StoryError::surface("canvas height exceeds u16"))?;
        Ok(Self {
            width: width_u16,
            height: height_u16,
            pixmap: vello_cpu::Pixmap::new(width_u16, height_u16),
        })
    }

    pub(crate) fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub(crate) fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Record a scene with `paint` and rasterize it over a transparent pixmap.
    pub(crate) fn draw(&mut self, paint: impl FnOnce(&mut vello_cpu::RenderContext)) {
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        paint(&mut ctx);
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub(crate) fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }
}

pub(crate) fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

pub(crate) fn set_solid_paint(ctx: &mut vello_cpu::RenderContext, c: Rgba8Premul) {
    // peniko colors are straight alpha.
    let straight = |v: u8| -> u8 {
        if c.a == 0 {
            0
        } else {
            ((u16::from(v) * 255 + u16::from(c.a) / 2) / u16::from(c.a)).min(255) as u8
        }
    };
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        straight(c.r),
        straight(c.g),
        straight(c.b),
        c.a,
    ));
}

/// Fill `path` under `transform` with a solid color, honoring group opacity.
pub(crate) fn fill_solid(
    ctx: &mut vello_cpu::RenderContext,
    path: &BezPath,
    transform: Affine,
    color: Rgba8Premul,
    opacity: f32,
) {
    if opacity <= 0.0 {
        return;
    }
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(transform));
    set_solid_paint(ctx, color);
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    ctx.fill_path(&bezpath_to_cpu(path));
    if opacity < 1.0 {
        ctx.pop_layer();
    }
}

/// Fill every glyph run of `block` under `transform`, honoring group opacity.
pub(crate) fn fill_text(
    ctx: &mut vello_cpu::RenderContext,
    block: &TextBlock,
    transform: Affine,
    opacity: f32,
) {
    if opacity <= 0.0 {
        return;
    }
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(transform));
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }

    for line in block.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));

            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&block.font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }

    if opacity < 1.0 {
        ctx.pop_layer();
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
