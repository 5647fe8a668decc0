use super::*;
use crate::config::model::{KnotSettings, LightSettings};
use crate::foundation::core::RgbColor;
use crate::scene3d::{geometry::torus_knot, light::PointLight, mesh::StandardMaterial};

fn knot_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_mesh(Mesh::new(
        torus_knot(&KnotSettings::default()),
        StandardMaterial::new(RgbColor::from_hex(0x00ffcc)),
    ));
    scene.add_light(PointLight::from_settings(&LightSettings::default()));
    scene
}

fn camera(vp: Viewport) -> PerspectiveCamera {
    let mut cam = PerspectiveCamera::new(75.0, vp.aspect() as f32, 0.1, 1000.0);
    cam.position = Vec3::new(0.0, 0.0, 10.0);
    cam
}

#[test]
fn acquires_a_viewport_sized_surface() {
    let vp = Viewport::new(64.0, 48.0).unwrap();
    let host = Host::new(vp);
    let r = SceneRenderer::new(&host, vp).unwrap();
    assert_eq!(r.size(), Some((64, 48)));
    assert_eq!(host.live_surfaces(), 1);
    drop(r);
    assert_eq!(host.live_surfaces(), 0);
}

#[test]
fn fails_without_graphics() {
    let vp = Viewport::new(64.0, 48.0).unwrap();
    let host = Host::without_graphics(vp);
    assert!(SceneRenderer::new(&host, vp).is_err());
    assert_eq!(host.live_surfaces(), 0);
}

#[test]
fn draws_knot_at_center_over_transparent_corners() {
    let vp = Viewport::new(96.0, 96.0).unwrap();
    let host = Host::new(vp);
    let mut r = SceneRenderer::new(&host, vp).unwrap();
    r.render(&knot_scene(), &camera(vp));
    assert_eq!(r.frames_rendered(), 1);

    let px = r.pixels().unwrap();
    let alpha = |x: usize, y: usize| px[(y * 96 + x) * 4 + 3];
    assert_eq!(alpha(0, 0), 0);
    assert_eq!(alpha(95, 95), 0);

    let covered = px.chunks_exact(4).filter(|p| p[3] > 0).count();
    assert!(covered > 96 * 96 / 20, "knot covers too little: {covered}");
    // Lit green-cyan, no red channel in the material.
    let brightest = px.chunks_exact(4).max_by_key(|p| p[1]).unwrap();
    assert!(brightest[1] > brightest[0]);
}

#[test]
fn resize_reacquires_at_new_size() {
    let vp = Viewport::new(64.0, 48.0).unwrap();
    let host = Host::new(vp);
    let mut r = SceneRenderer::new(&host, vp).unwrap();
    r.set_size(Viewport::new(32.0, 32.0).unwrap()).unwrap();
    assert_eq!(r.size(), Some((32, 32)));
    assert_eq!(host.live_surfaces(), 1);
    r.render(&knot_scene(), &camera(vp));
    assert_eq!(r.pixels().unwrap().len(), 32 * 32 * 4);
}

#[test]
fn dispose_releases_surface_and_stops_rendering() {
    let vp = Viewport::new(32.0, 32.0).unwrap();
    let host = Host::new(vp);
    let mut r = SceneRenderer::new(&host, vp).unwrap();
    r.dispose();
    assert!(r.is_disposed());
    assert_eq!(host.live_surfaces(), 0);
    r.render(&knot_scene(), &camera(vp));
    assert_eq!(r.frames_rendered(), 0);
    assert!(r.pixels().is_none());
}
