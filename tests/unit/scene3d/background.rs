use super::*;

fn setup() -> (Host, BackgroundScene) {
    let vp = Viewport::new(80.0, 60.0).unwrap();
    let host = Host::new(vp);
    let bg = BackgroundScene::new(&host, vp, &SceneSettings::default()).unwrap();
    (host, bg)
}

#[test]
fn builds_camera_from_settings() {
    let (_host, bg) = setup();
    let cam = bg.camera();
    assert_eq!(cam.fovy, 75.0);
    assert!((cam.aspect - 80.0 / 60.0).abs() < 1e-6);
    assert_eq!(cam.position, Vec3::new(0.0, 0.0, 10.0));
    assert_eq!(bg.scene().meshes.len(), 1);
    assert_eq!(bg.scene().lights.len(), 1);
}

#[test]
fn each_frame_rotates_then_renders() {
    let (_host, mut bg) = setup();
    for _ in 0..5 {
        bg.frame();
    }
    let r = bg.rotation();
    assert!((r.x - 0.05).abs() < 1e-12);
    assert!((r.y - 0.05).abs() < 1e-12);
    assert_eq!(r.z, 0.0);
    assert_eq!(bg.renderer().frames_rendered(), 5);
}

#[test]
fn resize_updates_aspect_projection_and_surface() {
    let (_host, mut bg) = setup();
    let before = bg.camera().projection();
    bg.on_resize(Viewport::new(120.0, 60.0).unwrap()).unwrap();
    assert!((bg.camera().aspect - 2.0).abs() < 1e-6);
    assert_ne!(bg.camera().projection(), before);
    assert_eq!(bg.renderer().size(), Some((120, 60)));
}

#[test]
fn dispose_releases_everything() {
    let (host, mut bg) = setup();
    assert_eq!(host.live_surfaces(), 1);
    bg.dispose();
    assert!(bg.is_disposed());
    assert_eq!(host.live_surfaces(), 0);
    assert_eq!(bg.rotation(), Rotation::default());
    bg.frame();
    assert_eq!(bg.renderer().frames_rendered(), 0);
}

#[test]
fn resize_redraws_without_counting_a_frame() {
    let (_host, mut bg) = setup();
    bg.frame();
    bg.on_resize(Viewport::new(120.0, 90.0).unwrap()).unwrap();
    let pixels = bg.renderer().pixels().unwrap();
    assert_eq!(pixels.len(), 120 * 90 * 4);
    assert!(pixels.chunks_exact(4).any(|p| p[3] > 0), "resized canvas is blank");
    assert_eq!(bg.renderer().frames_rendered(), 1);
}
