//! Minimal 3D pipeline for the story background: one mesh, one point light, one camera.

pub mod background;
pub mod camera;
pub mod geometry;
pub mod light;
pub mod mesh;
pub mod renderer;
pub mod scene;
