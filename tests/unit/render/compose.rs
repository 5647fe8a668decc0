use super::*;
use crate::foundation::core::Rect;
use kurbo::Shape;

fn fill(rect: Rect, color: Rgba8Premul, opacity: f32) -> DrawOp {
    DrawOp::FillPath {
        path: rect.to_path(0.1),
        transform: Affine::IDENTITY,
        color,
        opacity,
    }
}

const RED: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

#[test]
fn empty_layers_give_a_transparent_frame() {
    let frame = compose(4, 3, &FrameLayers::default()).unwrap();
    assert_eq!(frame.data.len(), 4 * 3 * 4);
    assert!(frame.premultiplied);
    assert!(frame.data.iter().all(|&b| b == 0));
    assert_eq!(frame.pixel(4, 0), None);
}

#[test]
fn content_draws_over_canvas_over_backdrop() {
    let blue = vec![0u8, 0, 255, 255].repeat(8 * 8);
    let layers = FrameLayers {
        backdrop: vec![fill(Rect::new(0.0, 0.0, 8.0, 8.0), RED, 1.0)],
        canvas: Some(PixelLayer {
            width: 8,
            height: 4,
            data: &blue[..8 * 4 * 4],
            offset_y: 2,
        }),
        content: vec![fill(
            Rect::new(0.0, 0.0, 2.0, 8.0),
            Rgba8Premul::from_straight_rgba(0, 255, 0, 255),
            1.0,
        )],
    };
    let frame = compose(8, 8, &layers).unwrap();
    assert_eq!(frame.pixel(5, 0), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(5, 3), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(5, 7), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(0, 3), Some([0, 255, 0, 255]));
}

#[test]
fn canvas_rows_outside_the_frame_are_clipped() {
    let blue = vec![0u8, 0, 255, 255].repeat(4 * 4);
    let layers = FrameLayers {
        canvas: Some(PixelLayer {
            width: 4,
            height: 4,
            data: &blue,
            offset_y: -3,
        }),
        ..FrameLayers::default()
    };
    let frame = compose(4, 4, &layers).unwrap();
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(0, 1), Some([0, 0, 0, 0]));
}

#[test]
fn straight_conversion_undoes_premultiplication() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight(), vec![128, 0, 0, 128]);
}
