use super::*;

fn fade_at(top: f64) -> FadeIn {
    FadeIn::new(
        Rect::new(100.0, top, 500.0, top + 40.0),
        Viewport::new(1000.0, 1000.0).unwrap(),
        &FadeSettings::default(),
    )
    .unwrap()
}

#[test]
fn initial_state_before_threshold() {
    let mut f = fade_at(2000.0);
    assert!(!f.on_scroll(1199.0, 0.0));
    assert_eq!(f.state(5.0), FadeState { opacity: 0.0, y: 50.0 });
    assert!(!f.has_fired());
}

#[test]
fn fires_at_eighty_percent_and_completes() {
    let mut f = fade_at(2000.0);
    assert!(f.on_scroll(1200.0, 1.0));
    assert_eq!(f.state(1.0), FadeState { opacity: 0.0, y: 50.0 });

    let mut prev = f.state(1.0);
    let mut t = 1.0;
    while t < 2.2 {
        t += 0.05;
        let s = f.state(t);
        assert!(s.opacity >= prev.opacity);
        assert!(s.y <= prev.y);
        prev = s;
    }
    assert!(f.is_complete(2.2));
    assert_eq!(f.state(2.2), FadeState { opacity: 1.0, y: 0.0 });
}

#[test]
fn never_replays_after_scrolling_back() {
    let mut f = fade_at(2000.0);
    assert!(f.on_scroll(1500.0, 0.0));
    assert!(!f.on_scroll(0.0, 3.0));
    assert!(!f.on_scroll(1500.0, 4.0));
    assert_eq!(f.state(4.0), FadeState { opacity: 1.0, y: 0.0 });
}

#[test]
fn element_already_in_view_fires_on_first_check() {
    let mut f = fade_at(100.0);
    assert!(f.on_scroll(0.0, 0.0));
}
