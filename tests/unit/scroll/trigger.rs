use super::*;

fn vp() -> Viewport {
    Viewport::new(1000.0, 800.0).unwrap()
}

#[test]
fn parse_edges_and_relative_positions() {
    assert_eq!(
        TriggerPosition::parse("top 80%").unwrap(),
        TriggerPosition::edges(Edge::Top, Edge::Percent(80.0))
    );
    assert_eq!(
        TriggerPosition::parse("top center").unwrap(),
        TriggerPosition::edges(Edge::Top, Edge::Center)
    );
    assert_eq!(
        TriggerPosition::parse("bottom 100px").unwrap(),
        TriggerPosition::edges(Edge::Bottom, Edge::Pixels(100.0))
    );
    assert_eq!(
        TriggerPosition::parse("+=1000").unwrap(),
        TriggerPosition::Relative(1000.0)
    );
    assert!(TriggerPosition::parse("top").is_err());
    assert!(TriggerPosition::parse("top sideways").is_err());
    assert!(TriggerPosition::parse("+=-5").is_err());
}

#[test]
fn top_80_percent_fires_when_element_top_crosses_threshold() {
    let el = Rect::new(0.0, 2000.0, 300.0, 2040.0);
    let t = ScrollTrigger::resolve(
        el,
        vp(),
        TriggerPosition::parse("top 80%").unwrap(),
        TriggerPosition::DEFAULT_END,
    )
    .unwrap();
    assert_eq!(t.start, 2000.0 - 640.0);
    assert!(!t.is_past_start(1359.0));
    assert!(t.is_past_start(1360.0));
}

#[test]
fn relative_end_extends_from_start() {
    let container = Rect::new(0.0, 500.0, 4000.0, 1300.0);
    let t = ScrollTrigger::resolve(
        container,
        vp(),
        TriggerPosition::parse("top top").unwrap(),
        TriggerPosition::parse("+=4000").unwrap(),
    )
    .unwrap();
    assert_eq!(t.start, 500.0);
    assert_eq!(t.end, 4500.0);
    assert_eq!(t.progress(2500.0), 0.5);
    assert_eq!(t.scroll_for(0.25), 1500.0);
}

#[test]
fn progress_clamps_and_handles_empty_span() {
    let t = ScrollTrigger {
        start: 100.0,
        end: 300.0,
    };
    assert_eq!(t.progress(0.0), 0.0);
    assert_eq!(t.progress(200.0), 0.5);
    assert_eq!(t.progress(10_000.0), 1.0);

    let empty = ScrollTrigger {
        start: 100.0,
        end: 100.0,
    };
    assert_eq!(empty.progress(99.0), 0.0);
    assert_eq!(empty.progress(100.0), 1.0);
}

#[test]
fn relative_start_is_rejected() {
    let err = ScrollTrigger::resolve(
        Rect::new(0.0, 0.0, 1.0, 1.0),
        vp(),
        TriggerPosition::Relative(10.0),
        TriggerPosition::DEFAULT_END,
    );
    assert!(err.is_err());
}
