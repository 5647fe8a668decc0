use super::*;
use crate::assets::store::StoryFonts;

const WHITE: TextBrushRgba8 = TextBrushRgba8::rgb(255, 255, 255);

fn engine() -> TextLayoutEngine {
    TextLayoutEngine::new(&StoryFonts::builtin().regular).unwrap()
}

#[test]
fn resolves_the_bundled_family() {
    assert_eq!(engine().family_name(), "DejaVu Sans");
}

#[test]
fn narrower_width_breaks_into_more_lines() {
    let mut e = engine();
    let text = "Big data meets biology, making sense of genomic data like never before.";
    let wide = e.layout_plain(text, 18.0, WHITE, None).unwrap();
    let narrow = e.layout_plain(text, 18.0, WHITE, Some(160.0)).unwrap();
    assert_eq!(wide.line_count(), 1);
    assert!(narrow.line_count() > 1);
    assert!(narrow.width() <= 160.0);
    assert!(narrow.height() > wide.height());
}

#[test]
fn size_scales_the_block() {
    let mut e = engine();
    let small = e.layout_plain("Gene Editing", 18.0, WHITE, None).unwrap();
    let large = e.layout_plain("Gene Editing", 36.0, WHITE, None).unwrap();
    assert!(large.width() > small.width() * 1.8);
    assert!(large.height() > small.height() * 1.8);
}

#[test]
fn rejects_bad_sizes_and_fonts() {
    let mut e = engine();
    assert!(e.layout_plain("x", 0.0, WHITE, None).is_err());
    assert!(e.layout_plain("x", f32::NAN, WHITE, None).is_err());
    assert!(TextLayoutEngine::new(&Arc::new(b"not a font".to_vec())).is_err());
}
