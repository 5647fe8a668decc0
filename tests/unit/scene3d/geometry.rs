use super::*;

#[test]
fn default_knot_has_expected_counts() {
    let geo = torus_knot(&KnotSettings::default());
    assert_eq!(geo.vertex_count(), 101 * 17);
    assert_eq!(geo.normals.len(), geo.vertex_count());
    assert_eq!(geo.triangle_count(), 100 * 16 * 2);
    let max = geo.vertex_count() as u32;
    assert!(geo.indices.iter().flatten().all(|&i| i < max));
}

#[test]
fn vertices_sit_on_the_tube_surface() {
    let k = KnotSettings::default();
    let geo = torus_knot(&k);
    // Every ring of radial+1 vertices is equidistant (the tube radius) from its centre.
    for ring in geo.positions.chunks(k.radial_segments as usize + 1).take(10) {
        let centre = ring[..ring.len() - 1].iter().copied().sum::<Vec3>() / (ring.len() - 1) as f32;
        for v in ring {
            assert!(((*v - centre).length() - k.tube as f32).abs() < 1e-3);
        }
    }
}

#[test]
fn normals_are_unit_length() {
    let geo = torus_knot(&KnotSettings::default());
    assert!(geo.normals.iter().all(|n| (n.length() - 1.0).abs() < 1e-4));
}

#[test]
fn dispose_releases_buffers() {
    let mut geo = torus_knot(&KnotSettings::default());
    geo.dispose();
    assert!(geo.is_disposed());
    assert_eq!(geo.vertex_count(), 0);
    assert_eq!(geo.triangle_count(), 0);
}
