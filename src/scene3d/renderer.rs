use glam::{Mat4, Vec3, Vec4};

use crate::foundation::core::{Affine, BezPath, Point, Rgba8Premul, Viewport};
use crate::foundation::error::StoryResult;
use crate::host::{Host, SurfaceLease};
use crate::render::raster::{CpuCanvas, fill_solid};
use crate::scene3d::{camera::PerspectiveCamera, mesh::Mesh, scene::Scene};

/// Software renderer drawing a [`Scene`] into a host canvas surface.
///
/// The canvas is cleared to transparent on every frame. Triangles facing away from the
/// camera are culled, the rest are drawn back to front with flat Lambert shading.
pub struct SceneRenderer {
    lease: Option<SurfaceLease>,
    canvas: Option<CpuCanvas>,
    frames: u64,
}

struct ShadedTriangle {
    depth: f32,
    path: BezPath,
    color: Rgba8Premul,
}

impl SceneRenderer {
    #[tracing::instrument(skip(host))]
    pub fn new(host: &Host, viewport: Viewport) -> StoryResult<Self> {
        let (w, h) = viewport.pixel_size();
        let lease = host.acquire_surface(w, h)?;
        let canvas = CpuCanvas::new(w, h)?;
        tracing::debug!(width = w, height = h, "scene renderer ready");
        Ok(Self {
            lease: Some(lease),
            canvas: Some(canvas),
            frames: 0,
        })
    }

    /// Surface size in pixels, `None` once disposed.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.lease.as_ref().map(|l| (l.width(), l.height()))
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn set_size(&mut self, viewport: Viewport) -> StoryResult<()> {
        let Some(lease) = self.lease.as_mut() else {
            return Ok(());
        };
        let (w, h) = viewport.pixel_size();
        if (lease.width(), lease.height()) == (w, h) {
            return Ok(());
        }
        lease.resize(w, h)?;
        self.canvas = Some(CpuCanvas::new(w, h)?);
        Ok(())
    }

    /// Draw one animation frame.
    pub fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        if self.repaint(scene, camera) {
            self.frames += 1;
        }
    }

    /// Redraw the current state without counting a frame. Returns `false` once disposed.
    pub fn repaint(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);
        let view_proj = camera.view_projection();

        let mut tris = Vec::new();
        for mesh in &scene.meshes {
            shade_mesh(mesh, scene, camera, view_proj, (w, h), &mut tris);
        }
        // Painter's order: farthest first.
        tris.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        canvas.draw(|ctx| {
            for t in &tris {
                fill_solid(ctx, &t.path, Affine::IDENTITY, t.color, 1.0);
            }
        });
        true
    }

    /// Premultiplied RGBA8 of the last frame.
    pub fn pixels(&self) -> Option<&[u8]> {
        self.canvas.as_ref().map(CpuCanvas::data)
    }

    /// Release the surface back to the host. Rendering afterwards is a no-op.
    pub fn dispose(&mut self) {
        self.canvas = None;
        self.lease = None;
    }

    pub fn is_disposed(&self) -> bool {
        self.lease.is_none()
    }
}

fn shade_mesh(
    mesh: &Mesh,
    scene: &Scene,
    camera: &PerspectiveCamera,
    view_proj: Mat4,
    (w, h): (f32, f32),
    out: &mut Vec<ShadedTriangle>,
) {
    let geo = &mesh.geometry;
    let model = mesh.model_matrix();
    let albedo = Vec3::from(mesh.material.color.to_f32()).map(srgb_to_linear);

    let world: Vec<Vec3> = geo
        .positions
        .iter()
        .map(|p| model.transform_point3(*p))
        .collect();
    let normals: Vec<Vec3> = geo
        .normals
        .iter()
        .map(|n| model.transform_vector3(*n))
        .collect();
    let clip: Vec<Vec4> = world.iter().map(|p| view_proj * p.extend(1.0)).collect();

    for &[a, b, c] in &geo.indices {
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let (Some(ca), Some(cb), Some(cc)) = (clip.get(a), clip.get(b), clip.get(c)) else {
            continue;
        };
        if [ca, cb, cc].iter().any(|v| v.w <= camera.znear) {
            continue;
        }

        let centroid = (world[a] + world[b] + world[c]) / 3.0;
        let normal = (normals[a] + normals[b] + normals[c]).normalize_or_zero();
        if normal.dot(camera.position - centroid) <= 0.0 {
            continue;
        }

        let mut irradiance = Vec3::ZERO;
        for light in &scene.lights {
            irradiance += light.irradiance(centroid, normal);
        }
        let lit = (albedo * irradiance).map(linear_to_srgb);
        let color = Rgba8Premul::from_straight_rgba(
            to_u8(lit.x),
            to_u8(lit.y),
            to_u8(lit.z),
            255,
        );

        let to_screen = |v: &Vec4| {
            let ndc = v.truncate() / v.w;
            Point::new(
                f64::from((ndc.x + 1.0) * 0.5 * w),
                f64::from((1.0 - ndc.y) * 0.5 * h),
            )
        };
        let mut path = BezPath::new();
        path.move_to(to_screen(ca));
        path.line_to(to_screen(cb));
        path.line_to(to_screen(cc));
        path.close_path();

        out.push(ShadedTriangle {
            depth: (ca.w + cb.w + cc.w) / 3.0,
            path,
            color,
        });
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/scene3d/renderer.rs"]
mod tests;
