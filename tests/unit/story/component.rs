use super::*;

const DT: f64 = 1.0 / 60.0;

fn viewport() -> Viewport {
    Viewport::new(1000.0, 800.0).unwrap()
}

fn mount_with(host: &Host, config: StoryConfig) -> MountedStory {
    ProductStory::mount(host, config, StoryAssets::builtin().unwrap()).unwrap()
}

fn below_the_fold() -> StoryConfig {
    StoryConfig {
        offset_top: 2000.0,
        ..StoryConfig::default()
    }
}

#[test]
fn mount_registers_listeners_loops_and_surface() {
    let host = Host::new(viewport());
    let story = mount_with(&host, StoryConfig::default());
    assert!(story.is_mounted());
    assert!(story.has_background());
    assert_eq!(host.resize_listener_count(), 1);
    assert_eq!(host.scroll_listener_count(), 2);
    assert_eq!(host.pending_frames(), 2);
    assert_eq!(host.live_surfaces(), 1);

    let snap = story.snapshot();
    assert_eq!(snap.strip.sections, 4);
    assert_eq!(snap.strip.scroll_start, 0.0);
    assert_eq!(snap.strip.scroll_end, 4000.0);
    assert_eq!(snap.fades.len(), 9);
    assert!(snap.morph.is_some());
    assert!(snap.vector_frame.is_some());
}

#[test]
fn unmount_releases_everything_and_ignores_later_events() {
    let host = Host::new(viewport());
    let mut story = mount_with(&host, StoryConfig::default());
    host.run_frames(3, DT);
    story.unmount();

    assert!(!story.is_mounted());
    assert_eq!(host.resize_listener_count(), 0);
    assert_eq!(host.scroll_listener_count(), 0);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.live_surfaces(), 0);

    let before = story.snapshot();
    assert!(before.background.as_ref().unwrap().released);

    host.scroll_to(2000.0);
    host.end_scroll();
    host.resize(Viewport::new(400.0, 300.0).unwrap());
    host.run_frames(10, DT);

    let after = story.snapshot();
    assert!(!after.mounted);
    assert_eq!(after.scroll_y, before.scroll_y);
    assert_eq!(after.viewport, before.viewport);
    assert_eq!(after.time_s, before.time_s);
    assert_eq!(host.scroll_y(), 2000.0);

    // Second unmount is a no-op.
    story.unmount();
}

#[test]
fn dropping_the_story_unmounts() {
    let host = Host::new(viewport());
    drop(mount_with(&host, StoryConfig::default()));
    assert_eq!(host.resize_listener_count(), 0);
    assert_eq!(host.scroll_listener_count(), 0);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.live_surfaces(), 0);
}

#[test]
fn mounts_without_background_when_surface_is_unavailable() {
    let host = Host::without_graphics(viewport());
    let story = mount_with(&host, StoryConfig::default());
    assert!(!story.has_background());
    assert_eq!(story.rotation(), None);
    assert!(story.snapshot().background.is_none());
    // Only the animation ticker is queued.
    assert_eq!(host.pending_frames(), 1);

    let limited = Host::new(viewport());
    limited.set_max_surface_side(512);
    let story = mount_with(&limited, StoryConfig::default());
    assert!(!story.has_background());
    assert_eq!(limited.live_surfaces(), 0);
}

#[test]
fn background_rotates_one_step_per_frame() {
    let host = Host::new(Viewport::new(160.0, 120.0).unwrap());
    let story = mount_with(&host, StoryConfig::default());
    // The first frame is drawn during mount.
    let k = 120;
    host.run_frames(k, DT);
    let r = story.rotation().unwrap();
    let expected = ((k + 1) as f64 * 0.01).rem_euclid(std::f64::consts::TAU);
    assert!((r.x - expected).abs() < 1e-9);
    assert!((r.y - expected).abs() < 1e-9);
    let snap = story.snapshot();
    assert_eq!(snap.background.unwrap().frames_rendered, k as u64 + 1);
}

#[test]
fn strip_scrubs_with_lag_and_snaps_when_scrolling_ends() {
    let host = Host::without_graphics(viewport());
    let story = mount_with(&host, StoryConfig::default());

    host.scroll_to(1200.0);
    let snap = story.snapshot();
    assert!((snap.strip.scroll_progress - 0.3).abs() < 1e-12);
    assert_eq!(snap.strip.displayed_progress, 0.0);
    assert!(snap.strip.pinned);
    assert_eq!(snap.strip.container_top, 0.0);

    host.end_scroll();
    assert!((host.scroll_y() - 4000.0 / 3.0).abs() < 1e-9);

    host.run_frames(900, DT);
    let snap = story.snapshot();
    assert!((snap.strip.displayed_progress - 1.0 / 3.0).abs() < 1e-9);
    assert!((snap.strip.x_percent - -100.0).abs() < 1e-6);
    assert!((snap.strip.translate_px - -1000.0).abs() < 1e-3);
}

#[test]
fn fades_fire_once_at_their_trigger() {
    let host = Host::without_graphics(viewport());
    let story = mount_with(&host, below_the_fold());

    let snap = story.snapshot();
    assert!(snap.fades.iter().all(|f| !f.fired && f.opacity == 0.0 && f.y == 50.0));

    host.scroll_to(1800.0);
    let snap = story.snapshot();
    assert!(snap.fades.iter().any(|f| f.fired));

    host.run_frames(90, DT);
    host.scroll_to(0.0);
    host.run_frames(10, DT);
    let snap = story.snapshot();
    for f in snap.fades.iter().filter(|f| f.element == ElementKind::Title) {
        assert!(f.fired);
        assert_eq!(f.opacity, 1.0);
        assert_eq!(f.y, 0.0);
    }
}

#[test]
fn morph_round_trips_to_the_exact_source_path() {
    let host = Host::without_graphics(viewport());
    let story = mount_with(&host, below_the_fold());
    let assets = StoryAssets::builtin().unwrap();

    assert_eq!(story.snapshot().morph.unwrap().d, assets.morph.path1);
    host.scroll_to(2000.0);
    let mid = story.snapshot().morph.unwrap();
    assert!(mid.progress > 0.0 && mid.progress < 1.0);
    host.scroll_to(5000.0);
    assert_eq!(story.snapshot().morph.unwrap().d, assets.morph.path2);
    host.scroll_to(0.0);
    assert_eq!(story.snapshot().morph.unwrap().d, assets.morph.path1);
}

#[test]
fn resize_follows_viewport_but_keeps_the_timeline() {
    let host = Host::new(viewport());
    let story = mount_with(&host, StoryConfig::default());
    host.resize(Viewport::new(500.0, 400.0).unwrap());
    let snap = story.snapshot();
    assert_eq!(snap.viewport, Viewport::new(500.0, 400.0).unwrap());
    assert_eq!(snap.strip.scroll_end, 4000.0);
    let frame = story.render_frame().unwrap();
    assert_eq!((frame.width, frame.height), (500, 400));
}

#[test]
fn vector_animation_loops_on_wall_clock() {
    let host = Host::without_graphics(viewport());
    let story = mount_with(&host, StoryConfig::default());
    host.run_frames(60, DT);
    let frame = story.snapshot().vector_frame.unwrap();
    assert!((frame - 30.0).abs() < 1e-6);
    host.run_frames(60, DT);
    let frame = story.snapshot().vector_frame.unwrap();
    assert!(frame < 1e-6 || (60.0 - frame) < 1e-6);
}

#[test]
fn invalid_config_fails_to_mount() {
    let host = Host::new(viewport());
    let mut cfg = StoryConfig::default();
    cfg.fade.start = "sideways".to_string();
    assert!(ProductStory::mount(&host, cfg, StoryAssets::builtin().unwrap()).is_err());
    assert_eq!(host.resize_listener_count(), 0);
    assert_eq!(host.live_surfaces(), 0);
}

#[test]
fn snapped_section_stays_on_screen_after_resize() {
    let host = Host::without_graphics(viewport());
    let story = mount_with(&host, StoryConfig::default());
    host.scroll_to(1300.0);
    host.end_scroll();
    host.run_frames(900, DT);
    let second = [0x14, 0x53, 0x2d, 255];
    assert_eq!(story.render_frame().unwrap().pixel(0, 0), Some(second));

    host.resize(Viewport::new(500.0, 400.0).unwrap());
    let snap = story.snapshot();
    assert!((snap.strip.x_percent - -100.0).abs() < 1e-6);
    // Sections keep their measured width, so one section over is still 1000 px.
    assert!((snap.strip.translate_px - -1000.0).abs() < 1e-3);
    let frame = story.render_frame().unwrap();
    assert_eq!(frame.pixel(0, 0), Some(second));
    assert_eq!(frame.pixel(499, 0), Some(second));
}

#[test]
fn resized_background_is_drawn_before_the_next_frame() {
    let small = Viewport::new(160.0, 120.0).unwrap();
    let large = Viewport::new(200.0, 150.0).unwrap();
    let render_after_resize = |host: Host| {
        let story = mount_with(&host, StoryConfig::default());
        host.resize(large);
        story.render_frame().unwrap()
    };
    let plain = render_after_resize(Host::without_graphics(small));
    let with_bg = render_after_resize(Host::new(small));
    let differing = plain
        .data
        .chunks_exact(4)
        .zip(with_bg.data.chunks_exact(4))
        .filter(|(a, b)| a != b)
        .count();
    assert!(differing > 0, "3D layer is blank right after resize");
}

#[test]
fn text_is_drawn_as_glyphs_that_fade_in() {
    let host = Host::without_graphics(viewport());
    let story = mount_with(&host, below_the_fold());
    let white = |f: &FrameRGBA| {
        f.data
            .chunks_exact(4)
            .filter(|p| p[..3] == [255, 255, 255])
            .count()
    };

    // Pinned at the top of the story, nothing has faded in yet.
    host.scroll_to(2000.0);
    let hidden = story.render_frame().unwrap();

    host.run_frames(120, DT);
    let shown = story.render_frame().unwrap();
    assert!(white(&shown) > white(&hidden) + 50, "title glyphs never appeared");
    // Glyph coverage leaves partially covered edge pixels, unlike a solid fill.
    let edge = |p: &[u8]| p[0] > 0 && p[0] < 255 && p[1] == p[0] && p[2] == p[0];
    assert!(shown.data.chunks_exact(4).any(edge));
}
