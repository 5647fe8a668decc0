use glam::Vec3;

use crate::config::model::KnotSettings;

/// Indexed triangle mesh data.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<[u32; 3]>,
    disposed: bool,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Drop the vertex buffers; the geometry stays empty afterwards.
    pub fn dispose(&mut self) {
        self.positions = Vec::new();
        self.normals = Vec::new();
        self.indices = Vec::new();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Tube swept along a `(p, q)` torus knot.
///
/// Produces `(tubular + 1) * (radial + 1)` vertices (seams duplicated) and
/// `tubular * radial * 2` triangles.
pub fn torus_knot(k: &KnotSettings) -> Geometry {
    let tubular = k.tubular_segments as usize;
    let radial = k.radial_segments as usize;
    let radius = k.radius as f32;
    let tube = k.tube as f32;
    let p = k.p as f32;
    let q = k.q as f32;

    let curve = |u: f32| {
        let cu = u.cos();
        let su = u.sin();
        let qu_over_p = q / p * u;
        let cs = qu_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * cu,
            radius * (2.0 + cs) * su * 0.5,
            radius * qu_over_p.sin() * 0.5,
        )
    };

    let mut geo = Geometry::default();
    geo.positions.reserve((tubular + 1) * (radial + 1));
    geo.normals.reserve((tubular + 1) * (radial + 1));

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p * std::f32::consts::TAU;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);

        // Frame along the curve: tangent, then binormal and normal from it.
        let t = p2 - p1;
        let n = p2 + p1;
        let b = t.cross(n).normalize_or_zero();
        let n = b.cross(t).normalize_or_zero();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * std::f32::consts::TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let vertex = p1 + n * cx + b * cy;
            geo.positions.push(vertex);
            geo.normals.push((vertex - p1).normalize_or_zero());
        }
    }

    let stride = (radial + 1) as u32;
    for j in 1..=tubular as u32 {
        for i in 1..=radial as u32 {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;
            geo.indices.push([a, b, d]);
            geo.indices.push([b, c, d]);
        }
    }
    geo
}

#[cfg(test)]
#[path = "../../tests/unit/scene3d/geometry.rs"]
mod tests;
