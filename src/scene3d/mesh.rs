use glam::Mat4;

use crate::foundation::core::RgbColor;
use crate::foundation::math::wrap_turn;
use crate::scene3d::geometry::Geometry;

/// Diffuse surface material.
#[derive(Clone, Debug)]
pub struct StandardMaterial {
    pub color: RgbColor,
    disposed: bool,
}

impl StandardMaterial {
    pub fn new(color: RgbColor) -> Self {
        Self {
            color,
            disposed: false,
        }
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

/// Euler rotation in radians, applied X then Y then Z.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: StandardMaterial,
    rotation: Rotation,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: StandardMaterial) -> Self {
        Self {
            geometry,
            material,
            rotation: Rotation::default(),
        }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Add `dx`/`dy` to the x/y rotation, keeping both within one turn.
    pub fn rotate_by(&mut self, dx: f64, dy: f64) {
        self.rotation.x = wrap_turn(self.rotation.x + dx);
        self.rotation.y = wrap_turn(self.rotation.y + dy);
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation.x as f32)
            * Mat4::from_rotation_y(self.rotation.y as f32)
            * Mat4::from_rotation_z(self.rotation.z as f32)
    }

    pub fn dispose(&mut self) {
        self.geometry.dispose();
        self.material.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.geometry.is_disposed() && self.material.is_disposed()
    }
}
