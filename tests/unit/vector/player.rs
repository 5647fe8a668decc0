use super::*;
use crate::foundation::core::Point;

fn anim(width: f64, height: f64) -> VectorAnimation {
    VectorAnimation::from_json_str(&format!(
        r##"{{
            "width": {width}, "height": {height}, "fps": 30, "in_frame": 10, "out_frame": 70,
            "layers": [{{"d": "M0 0 L10 0 L10 10 Z", "fill": "#ffffff"}}]
        }}"##
    ))
    .unwrap()
}

#[test]
fn playback_loops_forever() {
    let p = LoopedPlayer::new(anim(100.0, 100.0), 200.0, 5.0).unwrap();
    assert_eq!(p.frame_at(5.0), 10.0);
    assert_eq!(p.frame_at(6.0), 40.0);
    assert_eq!(p.frame_at(7.0), 10.0);
    assert_eq!(p.frame_at(7.5), 25.0);
    assert!((p.frame_at(5.0 + 3600.0 + 0.5) - 25.0).abs() < 1e-6);
    assert_eq!(p.frame_at(0.0), 10.0);
}

#[test]
fn tick_moves_the_playhead() {
    let mut p = LoopedPlayer::new(anim(100.0, 100.0), 200.0, 0.0).unwrap();
    assert_eq!(p.current_frame(), 10.0);
    p.tick(0.5);
    assert_eq!(p.current_frame(), 25.0);
}

#[test]
fn fit_centers_non_square_canvas() {
    let p = LoopedPlayer::new(anim(200.0, 100.0), 200.0, 0.0).unwrap();
    let fit = p.fit_transform();
    assert_eq!(fit * Point::new(0.0, 0.0), Point::new(0.0, 50.0));
    assert_eq!(fit * Point::new(200.0, 100.0), Point::new(200.0, 150.0));
}

#[test]
fn sample_places_every_layer() {
    let p = LoopedPlayer::new(anim(100.0, 100.0), 200.0, 0.0).unwrap();
    let shapes = p.sample(10.0).unwrap();
    assert_eq!(shapes.len(), 1);
    assert_eq!(shapes[0].opacity, 1.0);
    assert_eq!(shapes[0].transform * Point::new(10.0, 10.0), Point::new(20.0, 20.0));
}
