//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Segment count for a circle of the given on-screen radius
pub fn segments_for(radius: f32) -> u32 {
    ((radius * 0.75) as u32).clamp(8, 64)
}

#[inline]
fn rim(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    Vec2::new(center.x + radius * theta.cos(), center.y + radius * theta.sin())
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    radial_gradient(center, radius, color, color, segments)
}

/// Filled circle shading from `inner` at `focus` to `outer` at the rim.
///
/// `focus` may sit off-center to fake a lit sphere.
pub fn radial_gradient_at(
    focus: Vec2,
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let p1 = rim(center, radius, theta1);
        let p2 = rim(center, radius, theta2);

        // Triangle from focus to edge
        vertices.push(Vertex::new(focus.x, focus.y, inner));
        vertices.push(Vertex::new(p1.x, p1.y, outer));
        vertices.push(Vertex::new(p2.x, p2.y, outer));
    }

    vertices
}

/// Centered radial gradient
pub fn radial_gradient(
    center: Vec2,
    radius: f32,
    inner: [f32; 4],
    outer: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    radial_gradient_at(center, center, radius, inner, outer, segments)
}

/// Generate vertices for a ring (hollow circle), colors graded inner to outer
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    band(
        (center, inner_radius, inner_color),
        (center, outer_radius, outer_color),
        segments,
    )
}

/// Band between two circles given as (center, radius, color). The inner
/// circle must lie inside the outer one.
fn band(
    (inner_center, inner_radius, inner_color): (Vec2, f32, [f32; 4]),
    (outer_center, outer_radius, outer_color): (Vec2, f32, [f32; 4]),
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = rim(inner_center, inner_radius, theta1);
        let outer1 = rim(outer_center, outer_radius, theta1);
        let inner2 = rim(inner_center, inner_radius, theta2);
        let outer2 = rim(outer_center, outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));

        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }

    vertices
}

/// Two-circle gradient from a point at `focus` out to the circle
/// (`center`, `radius`): `inner` at the focus, `mid` on the halfway circle,
/// `outer` at the rim.
pub fn focal_gradient(
    focus: Vec2,
    center: Vec2,
    radius: f32,
    [inner, mid, outer]: [[f32; 4]; 3],
    segments: u32,
) -> Vec<Vertex> {
    let mid_center = focus.lerp(center, 0.5);
    let mid_radius = radius * 0.5;

    let mut vertices = radial_gradient_at(focus, mid_center, mid_radius, inner, mid, segments);
    vertices.extend(band(
        (mid_center, mid_radius, mid),
        (center, radius, outer),
        segments,
    ));
    vertices
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertices_on_rim() {
        let center = Vec2::new(10.0, 20.0);
        let verts = circle(center, 5.0, [1.0; 4], 12);
        assert_eq!(verts.len(), 36);
        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [10.0, 20.0]);
            for v in &tri[1..] {
                let d = Vec2::from(v.position).distance(center);
                assert!((d - 5.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_ring_colors() {
        let verts = ring(Vec2::ZERO, 2.0, 4.0, [1.0; 4], [0.0; 4], 8);
        assert_eq!(verts.len(), 48);
        for v in &verts {
            let d = Vec2::from(v.position).length();
            if (d - 2.0).abs() < 1e-4 {
                assert_eq!(v.color, [1.0; 4]);
            } else {
                assert!((d - 4.0).abs() < 1e-4);
                assert_eq!(v.color, [0.0; 4]);
            }
        }
    }

    #[test]
    fn test_focal_gradient_stops() {
        let center = Vec2::new(50.0, 50.0);
        let focus = Vec2::new(41.0, 41.0);
        let (light, main) = ([1.0; 4], [0.5, 0.0, 0.0, 1.0]);
        let verts = focal_gradient(focus, center, 30.0, [light, main, main], 16);
        assert_eq!(verts.len(), 16 * 3 + 16 * 6);

        let mid_center = Vec2::new(45.5, 45.5);
        for v in &verts {
            let p = Vec2::from(v.position);
            if p == focus {
                assert_eq!(v.color, light);
            } else if (p.distance(mid_center) - 15.0).abs() < 1e-3 {
                assert_eq!(v.color, main);
            } else {
                assert!((p.distance(center) - 30.0).abs() < 1e-3);
                assert_eq!(v.color, main);
            }
        }
    }

    #[test]
    fn test_segments_clamped() {
        assert_eq!(segments_for(1.0), 8);
        assert_eq!(segments_for(40.0), 30);
        assert_eq!(segments_for(1000.0), 64);
    }
}
