use crate::scene3d::{light::PointLight, mesh::Mesh};

/// Flat scene graph: meshes and point lights, owned exclusively.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
    pub lights: Vec<PointLight>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Dispose every mesh's buffers and remove all children.
    pub fn clear(&mut self) {
        for mesh in &mut self.meshes {
            mesh.dispose();
        }
        self.meshes.clear();
        self.lights.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty() && self.lights.is_empty()
    }
}
