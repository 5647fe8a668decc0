use glam::{Mat4, Vec3};

/// Perspective camera looking down `-z` from its position.
///
/// Changing `aspect` does not touch the cached projection; call
/// [`PerspectiveCamera::update_projection`] afterwards.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Eye position in world space.
    pub position: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fovy: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let mut cam = Self {
            fovy,
            aspect,
            znear,
            zfar,
            position: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        cam.update_projection();
        cam
    }

    pub fn update_projection(&mut self) {
        // perspective_rh uses the [0,1] depth range
        self.projection =
            Mat4::perspective_rh(self.fovy.to_radians(), self.aspect, self.znear, self.zfar);
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    /// Combined view-projection matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }
}
