use glam::Vec3;

use crate::config::model::SceneSettings;
use crate::foundation::core::Viewport;
use crate::foundation::error::StoryResult;
use crate::host::Host;
use crate::scene3d::{
    camera::PerspectiveCamera,
    geometry::torus_knot,
    light::PointLight,
    mesh::{Mesh, Rotation, StandardMaterial},
    renderer::SceneRenderer,
    scene::Scene,
};

/// The rotating torus knot behind the story content: scene, camera and renderer together.
pub struct BackgroundScene {
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: SceneRenderer,
    knot: usize,
    rotation_step: f64,
}

impl BackgroundScene {
    /// Build the scene and acquire a viewport-sized surface. Fails only on surface errors.
    pub fn new(host: &Host, viewport: Viewport, settings: &SceneSettings) -> StoryResult<Self> {
        let renderer = SceneRenderer::new(host, viewport)?;

        let mut camera = PerspectiveCamera::new(
            settings.fov_deg as f32,
            viewport.aspect() as f32,
            settings.near as f32,
            settings.far as f32,
        );
        camera.position = Vec3::new(0.0, 0.0, settings.camera_z as f32);

        let mut scene = Scene::new();
        let knot = scene.add_mesh(Mesh::new(
            torus_knot(&settings.knot),
            StandardMaterial::new(settings.color),
        ));
        scene.add_light(PointLight::from_settings(&settings.light));

        Ok(Self {
            scene,
            camera,
            renderer,
            knot,
            rotation_step: settings.rotation_step,
        })
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Knot rotation; zero once the scene has been cleared.
    pub fn rotation(&self) -> Rotation {
        self.scene
            .meshes
            .get(self.knot)
            .map(Mesh::rotation)
            .unwrap_or_default()
    }

    /// Follow a viewport change: new aspect, new projection, resized surface, redrawn at once.
    pub fn on_resize(&mut self, viewport: Viewport) -> StoryResult<()> {
        self.camera.aspect = viewport.aspect() as f32;
        self.camera.update_projection();
        let resized = self.renderer.set_size(viewport);
        self.renderer.repaint(&self.scene, &self.camera);
        resized
    }

    /// One animation frame: advance the rotation, then draw.
    pub fn frame(&mut self) {
        if let Some(mesh) = self.scene.meshes.get_mut(self.knot) {
            mesh.rotate_by(self.rotation_step, self.rotation_step);
        }
        self.renderer.render(&self.scene, &self.camera);
    }

    /// Release the surface and clear the scene.
    pub fn dispose(&mut self) {
        self.renderer.dispose();
        self.scene.clear();
        tracing::debug!("background scene disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.renderer.is_disposed() && self.scene.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene3d/background.rs"]
mod tests;
